use std::fmt;

use serde::{Deserialize, Serialize};

/// Which rule set a registered resource belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Requires authentication unless overridden by a permit rule.
    Restrict,
    /// Exempted from restriction by path-segment prefix.
    Permit,
    /// Exempted from restriction by filename suffix (e.g. `.css`).
    PermitExtension,
    /// Redirected even when redirects are globally omitted.
    ForceRedirect,
}

impl RuleKind {
    pub const ALL: [RuleKind; 4] = [
        RuleKind::Restrict,
        RuleKind::Permit,
        RuleKind::PermitExtension,
        RuleKind::ForceRedirect,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Restrict => "restrict",
            RuleKind::Permit => "permit",
            RuleKind::PermitExtension => "permit_extension",
            RuleKind::ForceRedirect => "force_redirect",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating both gate policies for one request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessDecision {
    /// The request must be redirected before it is serviced.
    pub redirect: bool,
    /// The request must pass authentication before it is serviced.
    pub authenticate: bool,
}

impl AccessDecision {
    /// Neither a redirect nor authentication is required.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.redirect && !self.authenticate
    }
}
