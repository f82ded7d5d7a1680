//! Configuration values for API related actions

/// Names of the properties which may override the compiled-in service configuration
pub struct PropertyKeys;
impl PropertyKeys {
    pub const UNIDENTIFIED_SENDER_TRUST_ROOT: &'static str = "UNIDENTIFIED_SENDER_TRUST_ROOT";
    pub const CDS_MRENCLAVE: &'static str = "CDS_MRENCLAVE";
    /// Base64 encoded, despite the name
    pub const ZK_GROUP_SERVER_PUBLIC_PARAMS: &'static str = "zkGroupServerPublicParamsHex";
    /// Presence of this key switches every endpoint to the custom, unpinned configuration
    pub const URL: &'static str = "URL";
    pub const CDN_URL: &'static str = "CDN_URL";
    pub const CDN2_URL: &'static str = "CDN2_URL";
    pub const CONTACT_DISCOVERY_URL: &'static str = "SIGNAL_CONTACT_DISCOVERY_URL";
    pub const KEY_BACKUP_URL: &'static str = "SIGNAL_KEY_BACKUP_URL";
    pub const STORAGE_URL: &'static str = "STORAGE_URL";

    /// Environment variables carry a key behind this prefix, `SIGNAL_CLI_URL` sets `URL`
    pub const ENV_PREFIX: &'static str = "SIGNAL_CLI_";

    pub const ALL: [&'static str; 9] = [
        Self::UNIDENTIFIED_SENDER_TRUST_ROOT,
        Self::CDS_MRENCLAVE,
        Self::ZK_GROUP_SERVER_PUBLIC_PARAMS,
        Self::URL,
        Self::CDN_URL,
        Self::CDN2_URL,
        Self::CONTACT_DISCOVERY_URL,
        Self::KEY_BACKUP_URL,
        Self::STORAGE_URL,
    ];
}

/// CDN numbers the service hands out attachment locations for
pub struct CdnNumbers;
impl CdnNumbers {
    pub const CDN0: u32 = 0;
    pub const CDN2: u32 = 2;
}

/// Keystores bundled with the client, loaded by the transport
pub struct TrustStores;
impl TrustStores {
    /// pinned on every production endpoint
    pub const SERVICE_RESOURCE: &'static str = "whisper.store";
    /// remote attestation of the contact discovery enclave
    pub const IAS_RESOURCE: &'static str = "ias.store";
    pub const KEYSTORE_PASSWORD: &'static str = "whisper";
}
