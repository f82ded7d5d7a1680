//! Production defaults for the signal.org deployment

/// Hosts of the signal.org service
pub struct SignalOrgUrls;
impl SignalOrgUrls {
    pub const SERVICE: &'static str = "https://textsecure-service.whispersystems.org";
    pub const CDN: &'static str = "https://cdn.signal.org";
    pub const CDN2: &'static str = "https://cdn2.signal.org";
    pub const CONTACT_DISCOVERY: &'static str = "https://api.directory.signal.org";
    pub const KEY_BACKUP: &'static str = "https://api.backup.signal.org";
    pub const STORAGE: &'static str = "https://storage.signal.org";
}

pub const SIGNAL_ORG_UNIDENTIFIED_SENDER_TRUST_ROOT: &str =
    "BXu6QIKVz5MA8gstzfOgRQGqyLqOwNKHL6INkv3IHWMF";

pub const SIGNAL_ORG_CDS_MRENCLAVE: &str =
    "c98e00a4e3ff977a56afefe7362a27e4961e4f19e211febfbb19b897e6b80b15";

/// Standard base64 with padding
pub const SIGNAL_ORG_ZK_GROUP_SERVER_PUBLIC_PARAMS: &str = "AMhf5ywVwITZMsff/eCyudZx9JDmkkkbV6PInzG4p8x3VqVJSFiMvnvlEKWuRob/1eaIetR31IYeAbm0NdOuHH8Qi+Rexi1wLlpzIo1gstHWBfZzy1+qHRV5A4TqPp15YzBPm0WSggW6PbSn+F4lf57VCnHF7p8SvzAA2ZZJPYJURt8X7bbg+H3i+PEjH9DXItNEqs2sNcug37xZQDLm7X0=";
