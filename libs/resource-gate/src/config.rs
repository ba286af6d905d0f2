use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::config_error::ConfigError;
use crate::types::RuleKind;

/// Declarative gate configuration, typically a section of the host's YAML config.
///
/// ```yaml
/// omit_redirect: true
/// restrict: ["/admin", "/api"]
/// permit: ["/api/public"]
/// permit_extensions: [".css", ".js"]
/// force_redirect: ["/login"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResourceAuthConfig {
    /// When false (default), every request must redirect.
    pub omit_redirect: bool,

    /// Resources requiring authentication (prefix match).
    pub restrict: Vec<String>,

    /// Resources exempted from restriction (prefix match).
    pub permit: Vec<String>,

    /// Suffixes exempted from restriction, e.g. `.css`.
    pub permit_extensions: Vec<String>,

    /// Resources redirected even when `omit_redirect` is set (exact match).
    pub force_redirect: Vec<String>,
}

impl ResourceAuthConfig {
    /// Extract the config from the root of a figment.
    ///
    /// # Errors
    /// Returns [`ConfigError::Extract`] if the merged providers do not
    /// deserialize into this struct.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// Extract the config nested under `key` (e.g. `"server.resource_auth"`).
    /// A missing key yields the default config.
    ///
    /// # Errors
    /// Returns [`ConfigError::Extract`] if the value under `key` does not
    /// deserialize into this struct.
    pub fn from_figment_at(figment: &Figment, key: &str) -> Result<Self, ConfigError> {
        if !figment.contains(key) {
            tracing::debug!(key, "No resource gate config section, using defaults");
            return Ok(Self::default());
        }
        Ok(figment.extract_inner(key)?)
    }

    /// Entries configured for one rule set.
    #[must_use]
    pub fn entries(&self, kind: RuleKind) -> &[String] {
        match kind {
            RuleKind::Restrict => &self.restrict,
            RuleKind::Permit => &self.permit,
            RuleKind::PermitExtension => &self.permit_extensions,
            RuleKind::ForceRedirect => &self.force_redirect,
        }
    }

    pub(crate) fn entries_mut(&mut self, kind: RuleKind) -> &mut Vec<String> {
        match kind {
            RuleKind::Restrict => &mut self.restrict,
            RuleKind::Permit => &mut self.permit,
            RuleKind::PermitExtension => &mut self.permit_extensions,
            RuleKind::ForceRedirect => &mut self.force_redirect,
        }
    }
}
