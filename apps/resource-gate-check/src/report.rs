use resource_gate::{AccessDecision, ResourceAuthorizer};
use serde::Serialize;

/// Gate decision for one queried path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathReport {
    pub path: String,
    pub redirect: bool,
    pub authenticate: bool,
}

impl PathReport {
    fn new(path: &str, decision: AccessDecision) -> Self {
        Self {
            path: path.to_owned(),
            redirect: decision.redirect,
            authenticate: decision.authenticate,
        }
    }

    /// One tab-separated line: path, redirect verdict, authentication verdict.
    pub fn to_line(&self) -> String {
        let redirect = if self.redirect { "redirect" } else { "-" };
        let authenticate = if self.authenticate { "auth" } else { "open" };
        format!("{}\t{redirect}\t{authenticate}", self.path)
    }
}

pub fn evaluate_paths(gate: &ResourceAuthorizer, paths: &[String]) -> Vec<PathReport> {
    paths
        .iter()
        .map(|path| PathReport::new(path, gate.evaluate(path)))
        .collect()
}
