//! Resource-path authorization gate.
//!
//! [`ResourceAuthorizer`] decides, per request path, whether the request must be
//! redirected and whether it must pass authentication. Decisions come from four
//! rule sets:
//!
//! - `restrict`: resources requiring authentication (segment-prefix match)
//! - `permit`: resources exempted from restriction (segment-prefix match)
//! - `permit_extension`: suffixes exempted from restriction
//! - `force_redirect`: resources redirected even when redirects are omitted
//!   (exact match)
//!
//! All rule sets and the `omit_redirect` flag sit behind one reader-writer lock.
//! Registration takes the write side; every query takes the read side.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::ResourceAuthConfig;
use crate::resource::{ResourceSet, normalize_resource};
use crate::traits::{ResourceRequest, UserDirectory};
use crate::types::{AccessDecision, RuleKind};

#[derive(Debug, Default)]
struct ResourceRules {
    restrict: ResourceSet,
    permit: ResourceSet,
    permit_extension: ResourceSet,
    force_redirect: ResourceSet,
    omit_redirect: bool,
}

impl ResourceRules {
    fn set(&self, kind: RuleKind) -> &ResourceSet {
        match kind {
            RuleKind::Restrict => &self.restrict,
            RuleKind::Permit => &self.permit,
            RuleKind::PermitExtension => &self.permit_extension,
            RuleKind::ForceRedirect => &self.force_redirect,
        }
    }

    fn set_mut(&mut self, kind: RuleKind) -> &mut ResourceSet {
        match kind {
            RuleKind::Restrict => &mut self.restrict,
            RuleKind::Permit => &mut self.permit,
            RuleKind::PermitExtension => &mut self.permit_extension,
            RuleKind::ForceRedirect => &mut self.force_redirect,
        }
    }

    fn needs_redirect(&self, resource: &str) -> bool {
        if !self.omit_redirect {
            return true;
        }
        self.force_redirect.matches_exact(resource)
    }

    fn is_restricted(&self, resource: &str) -> bool {
        if self.restrict.is_empty() || !self.restrict.matches_prefix(resource) {
            return false;
        }

        if !self.permit.is_empty() && self.permit.matches_prefix(resource) {
            return false;
        }

        if !self.permit_extension.is_empty() && self.permit_extension.matches_extension(resource) {
            return false;
        }

        true
    }
}

/// Decides redirect and authentication requirements for request paths.
///
/// Shared across request handlers as `Arc<ResourceAuthorizer>`; all methods
/// take `&self`.
pub struct ResourceAuthorizer {
    rules: RwLock<ResourceRules>,
    users: Arc<dyn UserDirectory>,
}

impl std::fmt::Debug for ResourceAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceAuthorizer")
            .field("rules", &*self.rules.read())
            .field("users_empty", &self.users.is_empty())
            .finish()
    }
}

impl ResourceAuthorizer {
    /// Empty gate: nothing restricted, every request redirected.
    #[must_use]
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self {
            rules: RwLock::new(ResourceRules::default()),
            users,
        }
    }

    /// Build a gate from configuration. Every entry goes through
    /// [`add_rule`](Self::add_rule), so it is normalized and logged.
    #[must_use]
    pub fn from_config(config: &ResourceAuthConfig, users: Arc<dyn UserDirectory>) -> Self {
        let authorizer = Self::new(users);
        for kind in RuleKind::ALL {
            for resource in config.entries(kind) {
                authorizer.add_rule(kind, resource);
            }
        }
        authorizer.set_omit_redirect(config.omit_redirect);
        authorizer
    }

    /// Register `resource` in the rule set for `kind`.
    ///
    /// One trailing `/` is stripped first. Re-registering is a no-op.
    pub fn add_rule(&self, kind: RuleKind, resource: &str) {
        let clean = normalize_resource(resource);
        self.rules.write().set_mut(kind).insert(resource);
        tracing::info!(kind = %kind, resource = %clean, "Registered HTTP resource rule");
    }

    /// Require authentication for `resource` and everything beneath it.
    pub fn add_restrict(&self, resource: &str) {
        self.add_rule(RuleKind::Restrict, resource);
    }

    /// Exempt `resource` and everything beneath it from restriction.
    pub fn add_permit(&self, resource: &str) {
        self.add_rule(RuleKind::Permit, resource);
    }

    /// Exempt every path ending with `suffix` (e.g. `.js`) from restriction.
    pub fn add_permit_extension(&self, suffix: &str) {
        self.add_rule(RuleKind::PermitExtension, suffix);
    }

    /// Always redirect requests for exactly `resource`.
    pub fn add_force_redirect(&self, resource: &str) {
        self.add_rule(RuleKind::ForceRedirect, resource);
    }

    pub fn set_omit_redirect(&self, omit: bool) {
        self.rules.write().omit_redirect = omit;
        tracing::info!(omit_redirect = omit, "Updated redirect policy");
    }

    #[must_use]
    pub fn omit_redirect(&self) -> bool {
        self.rules.read().omit_redirect
    }

    /// Whether a request for `resource` must be redirected.
    ///
    /// Always `true` unless redirects are omitted; then only for resources
    /// registered literally via [`add_force_redirect`](Self::add_force_redirect).
    #[must_use]
    pub fn needs_redirect(&self, resource: &str) -> bool {
        let resource = normalize_resource(resource);
        self.rules.read().needs_redirect(resource)
    }

    /// Whether a request for `resource` must be authenticated.
    ///
    /// `false` when no users are registered, when nothing is restricted, when
    /// the resource is outside every restriction, or when a permit rule
    /// (prefix first, then extension) covers it.
    #[must_use]
    pub fn needs_authentication(&self, resource: &str) -> bool {
        if self.users.is_empty() {
            return false;
        }

        let resource = normalize_resource(resource);
        self.rules.read().is_restricted(resource)
    }

    #[must_use]
    pub fn needs_redirect_for<R: ResourceRequest + ?Sized>(&self, request: &R) -> bool {
        self.needs_redirect(request.resource())
    }

    #[must_use]
    pub fn needs_authentication_for<R: ResourceRequest + ?Sized>(&self, request: &R) -> bool {
        self.needs_authentication(request.resource())
    }

    /// Evaluate both policies for `resource` against one view of the rules.
    #[must_use]
    pub fn evaluate(&self, resource: &str) -> AccessDecision {
        let users_empty = self.users.is_empty();
        let resource = normalize_resource(resource);

        let decision = {
            let rules = self.rules.read();
            AccessDecision {
                redirect: rules.needs_redirect(resource),
                authenticate: !users_empty && rules.is_restricted(resource),
            }
        };

        tracing::debug!(
            resource,
            redirect = decision.redirect,
            authenticate = decision.authenticate,
            "Evaluated resource access"
        );
        decision
    }

    #[must_use]
    pub fn evaluate_for<R: ResourceRequest + ?Sized>(&self, request: &R) -> AccessDecision {
        self.evaluate(request.resource())
    }

    /// Registered entries of one rule set, in lexicographic order.
    #[must_use]
    pub fn rules(&self, kind: RuleKind) -> Vec<String> {
        self.rules
            .read()
            .set(kind)
            .iter()
            .map(str::to_owned)
            .collect()
    }

    /// Export the current rules and flag as a configuration.
    #[must_use]
    pub fn snapshot(&self) -> ResourceAuthConfig {
        let rules = self.rules.read();
        let mut config = ResourceAuthConfig {
            omit_redirect: rules.omit_redirect,
            ..ResourceAuthConfig::default()
        };
        for kind in RuleKind::ALL {
            config
                .entries_mut(kind)
                .extend(rules.set(kind).iter().map(str::to_owned));
        }
        config
    }
}
