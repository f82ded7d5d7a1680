use serde::{Deserialize, Serialize};

/// Capabilities advertised in the account attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub uuid: bool,
    #[serde(rename = "gv2-3")]
    pub gv2: bool,
    pub storage: bool,
    #[serde(rename = "gv1-migration")]
    pub gv1_migration: bool,
}

impl Capabilities {
    /// group v2 and the v1 migration both hinge on usable zkgroup params,
    /// everything else is not supported by this client
    pub fn from_zk_group_support(zk_groups: bool) -> Self {
        Self {
            uuid: false,
            gv2: zk_groups,
            storage: false,
            gv1_migration: zk_groups,
        }
    }
}
