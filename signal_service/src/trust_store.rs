use serde::Serialize;
use signal_configuration::TrustStores;

/// A keystore bundled with the client.
///
/// Only the handle lives here, the transport opens `resource` with `password`
/// when it sets up certificate validation for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrustStore {
    resource: &'static str,
    #[serde(skip)]
    password: &'static str,
}

impl TrustStore {
    /// Pinned on every signal.org endpoint
    pub const fn signal_service() -> Self {
        Self {
            resource: TrustStores::SERVICE_RESOURCE,
            password: TrustStores::KEYSTORE_PASSWORD,
        }
    }

    /// Validates remote attestation reports of the contact discovery enclave
    pub const fn ias() -> Self {
        Self {
            resource: TrustStores::IAS_RESOURCE,
            password: TrustStores::KEYSTORE_PASSWORD,
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn password(&self) -> &'static str {
        self.password
    }
}

impl std::fmt::Display for TrustStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_stores() {
        assert_eq!(TrustStore::signal_service().resource(), "whisper.store");
        assert_eq!(TrustStore::ias().resource(), "ias.store");
        assert_eq!(TrustStore::ias().password(), "whisper");
        assert_ne!(TrustStore::ias(), TrustStore::signal_service());
    }

    #[test]
    fn password_is_not_serialized() {
        let json = serde_json::to_value(TrustStore::signal_service()).unwrap();
        assert_eq!(json, serde_json::json!({ "resource": "whisper.store" }));
    }
}
