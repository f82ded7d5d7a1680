use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("an address needs a uuid or a number")]
pub struct EmptyAddress;

/// A messaging participant, known by uuid, phone number or both
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawAddress")]
pub struct SignalServiceAddress {
    uuid: Option<Uuid>,
    number: Option<String>,
}

#[derive(Deserialize)]
struct RawAddress {
    uuid: Option<Uuid>,
    number: Option<String>,
}

impl TryFrom<RawAddress> for SignalServiceAddress {
    type Error = EmptyAddress;

    fn try_from(raw: RawAddress) -> Result<Self, Self::Error> {
        Self::new(raw.uuid, raw.number)
    }
}

impl SignalServiceAddress {
    pub fn new(uuid: Option<Uuid>, number: Option<String>) -> Result<Self, EmptyAddress> {
        if uuid.is_none() && number.is_none() {
            return Err(EmptyAddress);
        }
        Ok(Self { uuid, number })
    }

    #[cfg(test)]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid: Some(uuid),
            number: None,
        }
    }

    #[cfg(test)]
    pub fn from_number(number: impl Into<String>) -> Self {
        Self {
            uuid: None,
            number: Some(number.into()),
        }
    }

    pub fn uuid(&self) -> Option<&Uuid> {
        self.uuid.as_ref()
    }

    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// The number if known, the uuid otherwise
    pub fn legacy_identifier(&self) -> String {
        self.number()
            .map(ToString::to_string)
            .or_else(|| self.uuid().map(Uuid::to_string))
            .unwrap_or_default()
    }

    /// Same participant: equal uuids when both sides have one, equal numbers otherwise
    pub fn matches(&self, other: &SignalServiceAddress) -> bool {
        match (&self.uuid, &other.uuid) {
            (Some(a), Some(b)) => a == b,
            _ => self.number.is_some() && self.number == other.number,
        }
    }
}

impl std::fmt::Display for SignalServiceAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.uuid, &self.number) {
            (Some(uuid), Some(number)) => write!(f, "{uuid} ({number})"),
            (Some(uuid), None) => write!(f, "{uuid}"),
            (None, Some(number)) => write!(f, "{number}"),
            (None, None) => write!(f, "<empty>"),
        }
    }
}
