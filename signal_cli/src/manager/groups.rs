use std::collections::BTreeSet;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::SignalServiceAddress;

/// Opaque group identifier, displayed as base64
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupId(Vec<u8>);

impl GroupId {
    #[cfg(test)]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

impl Serialize for GroupId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for GroupId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded)
            .map(GroupId)
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupInviteLinkUrl(url::Url);

impl GroupInviteLinkUrl {
    pub fn url(&self) -> &str {
        self.0.as_str()
    }
}

impl std::str::FromStr for GroupInviteLinkUrl {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Only v2 groups carry an invite link access policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "version", rename_all = "lowercase")]
pub enum GroupKind {
    V1,
    V2 {
        #[serde(default)]
        access_control_add_from_invite_link: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub id: GroupId,
    pub title: String,
    #[serde(default)]
    pub members: BTreeSet<SignalServiceAddress>,
    #[serde(default)]
    pub pending_members: BTreeSet<SignalServiceAddress>,
    #[serde(default)]
    pub requesting_members: BTreeSet<SignalServiceAddress>,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub invite_link: Option<GroupInviteLinkUrl>,
    #[serde(flatten)]
    pub kind: GroupKind,
}

impl GroupInfo {
    pub fn is_member(&self, address: &SignalServiceAddress) -> bool {
        self.members.iter().any(|m| m.matches(address))
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Who may join through the invite link; empty for v1 groups
    pub fn invite_access_control(&self) -> &str {
        match &self.kind {
            GroupKind::V1 => "",
            GroupKind::V2 {
                access_control_add_from_invite_link,
            } => access_control_add_from_invite_link,
        }
    }
}
