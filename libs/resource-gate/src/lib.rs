#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Resource-path authorization gate for HTTP servers.
//!
//! Register path rules once at startup, then ask per request whether it must
//! be redirected and whether it must be authenticated:
//!
//! ```
//! use std::sync::Arc;
//! use resource_gate::{InMemoryUserDirectory, ResourceAuthorizer};
//!
//! let users: InMemoryUserDirectory = ["alice"].into_iter().collect();
//! let users = Arc::new(users);
//! let gate = ResourceAuthorizer::new(users);
//! gate.add_restrict("/admin");
//! gate.add_permit("/admin/help");
//! gate.add_permit_extension(".css");
//!
//! assert!(gate.needs_authentication("/admin/users"));
//! assert!(!gate.needs_authentication("/admin/help/faq"));
//! assert!(!gate.needs_authentication("/admin/theme.css"));
//! assert!(!gate.needs_authentication("/administrator"));
//! ```

pub mod authorizer;
pub mod config;
pub mod config_error;
pub mod resource;
pub mod traits;
pub mod types;
pub mod users;

pub use authorizer::ResourceAuthorizer;
pub use config::ResourceAuthConfig;
pub use config_error::ConfigError;
pub use resource::{ResourceSet, normalize_resource};
pub use traits::{ResourceRequest, UserDirectory};
pub use types::{AccessDecision, RuleKind};
pub use users::InMemoryUserDirectory;
