//! A [`Manager`] backed by an exported account snapshot.
//!
//! The snapshot is a JSON document with the account's own address, every
//! recipient the account knows about and its groups.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{GroupInfo, Manager, ManagerError, SignalServiceAddress};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read account data from {path}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("account data in {path} is malformed")]
    Parse {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSnapshot {
    #[serde(rename = "self")]
    pub self_address: SignalServiceAddress,
    #[serde(default)]
    pub recipients: Vec<SignalServiceAddress>,
    #[serde(default)]
    pub groups: Vec<GroupInfo>,
}

#[derive(Debug, Clone)]
pub struct SnapshotManager {
    snapshot: AccountSnapshot,
}

impl SnapshotManager {
    pub fn new(snapshot: AccountSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let data = fs::read(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: AccountSnapshot =
            serde_json::from_slice(&data).map_err(|source| SnapshotError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            path = %path.display(),
            groups = snapshot.groups.len(),
            recipients = snapshot.recipients.len(),
            "loaded account data"
        );
        Ok(Self::new(snapshot))
    }
}

impl Manager for SnapshotManager {
    fn groups(&self) -> Result<Vec<GroupInfo>, ManagerError> {
        Ok(self.snapshot.groups.clone())
    }

    fn resolve_address(
        &self,
        address: &SignalServiceAddress,
    ) -> Result<SignalServiceAddress, ManagerError> {
        std::iter::once(&self.snapshot.self_address)
            .chain(&self.snapshot.recipients)
            .find(|known| known.matches(address))
            .cloned()
            .ok_or_else(|| ManagerError::UnresolvableAddress(address.clone()))
    }

    fn self_address(&self) -> &SignalServiceAddress {
        &self.snapshot.self_address
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ACCOUNT: &str = r#"{
        "self": { "uuid": "a9cb0a9a-6a1b-4cbd-8d47-5d4b09c7a2c1", "number": "+15550001111" },
        "recipients": [
            { "uuid": "0b0d2f1e-53b6-4a8e-9d0e-2f6c1f3e7a10", "number": "+15550002222" }
        ],
        "groups": [
            { "id": "AQID", "title": "Team", "version": "v1",
              "members": [{ "uuid": "a9cb0a9a-6a1b-4cbd-8d47-5d4b09c7a2c1" }] }
        ]
    }"#;

    fn manager() -> SnapshotManager {
        SnapshotManager::new(serde_json::from_str(ACCOUNT).unwrap())
    }

    #[test]
    fn completes_partial_addresses() {
        let manager = manager();
        let resolved = manager
            .resolve_address(&SignalServiceAddress::from_number("+15550002222"))
            .unwrap();
        assert_eq!(
            resolved.uuid().map(ToString::to_string).as_deref(),
            Some("0b0d2f1e-53b6-4a8e-9d0e-2f6c1f3e7a10")
        );
        assert_eq!(resolved.legacy_identifier(), "+15550002222");
    }

    #[test]
    fn resolves_self() {
        let manager = manager();
        let partial = SignalServiceAddress::from_uuid(*manager.self_address().uuid().unwrap());
        assert_eq!(
            manager.resolve_address(&partial).unwrap().legacy_identifier(),
            "+15550001111"
        );
    }

    #[test]
    fn unknown_address_is_an_error() {
        let unknown = SignalServiceAddress::from_number("+15559999999");
        assert!(matches!(
            manager().resolve_address(&unknown),
            Err(ManagerError::UnresolvableAddress(a)) if a == unknown
        ));
    }

    #[test]
    fn groups_are_returned_in_order() {
        let groups = manager().groups().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].title, "Team");
        assert!(groups[0].is_member(manager().self_address()));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ACCOUNT.as_bytes()).unwrap();
        let manager = SnapshotManager::load(file.path()).unwrap();
        assert_eq!(manager.groups().unwrap().len(), 1);
    }

    #[test]
    fn reports_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ \"groups\": [] }").unwrap();
        assert!(matches!(
            SnapshotManager::load(file.path()),
            Err(SnapshotError::Parse { .. })
        ));
    }

    #[test]
    fn reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            SnapshotManager::load(&dir.path().join("account.json")),
            Err(SnapshotError::Read { .. })
        ));
    }
}
