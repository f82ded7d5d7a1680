//! Read-only view of the account state the commands work on.

mod address;
mod groups;
mod snapshot;

pub use address::*;
pub use groups::*;
pub use snapshot::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("unable to resolve address {0}")]
    UnresolvableAddress(SignalServiceAddress),
}

/// Query surface of the component owning protocol state and storage
pub trait Manager {
    /// A fresh snapshot of the groups this account knows about
    fn groups(&self) -> Result<Vec<GroupInfo>, ManagerError>;

    /// Completes an address with everything known about the recipient.
    /// Does not modify any group.
    fn resolve_address(
        &self,
        address: &SignalServiceAddress,
    ) -> Result<SignalServiceAddress, ManagerError>;

    fn self_address(&self) -> &SignalServiceAddress;
}
