use std::sync::Arc;

/// Registered-user store consulted by the authentication policy.
///
/// Only emptiness is observed; credential checks happen elsewhere.
pub trait UserDirectory: Send + Sync {
    /// `true` when no user is registered.
    fn is_empty(&self) -> bool;
}

impl<T: UserDirectory + ?Sized> UserDirectory for Arc<T> {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

/// An inbound request as seen by the gate: just its resource path.
pub trait ResourceRequest {
    /// Path component of the request target, without query string.
    fn resource(&self) -> &str;
}

impl ResourceRequest for str {
    fn resource(&self) -> &str {
        self
    }
}

impl ResourceRequest for String {
    fn resource(&self) -> &str {
        self.as_str()
    }
}

impl ResourceRequest for http::Uri {
    fn resource(&self) -> &str {
        self.path()
    }
}

impl<B> ResourceRequest for http::Request<B> {
    fn resource(&self) -> &str {
        self.uri().path()
    }
}
