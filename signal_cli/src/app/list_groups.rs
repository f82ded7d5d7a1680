//! `list-groups`: the groups of this account, as text lines or JSON.
//!
//! JSON output always carries the member lists and invite link, the
//! `--detailed` flag only applies to plain text.
use std::{collections::BTreeSet, io::Write};

use serde::Serialize;
use thiserror::Error;

use super::ExitCodes;
use crate::{
    args::{self, OutputType},
    manager::{GroupInfo, Manager, ManagerError, SignalServiceAddress},
};

#[derive(Debug, Error)]
pub enum ListGroupsError {
    #[error(transparent)]
    Manager(#[from] ManagerError),
    #[error("Failed to write json object: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl ListGroupsError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Manager(_) => ExitCodes::UNEXPECTED_ERROR,
            Self::Json(_) | Self::Io(_) => ExitCodes::IO_ERROR,
        }
    }
}

pub struct ListGroups<'a, M> {
    opts: args::ListGroupsOpts,
    output: OutputType,
    manager: &'a M,
}

impl<'a, M: Manager> ListGroups<'a, M> {
    pub fn new(opts: args::ListGroupsOpts, output: OutputType, manager: &'a M) -> Self {
        Self {
            opts,
            output,
            manager,
        }
    }

    pub fn run(self, writer: &mut impl Write) -> Result<(), ListGroupsError> {
        let ListGroups {
            opts,
            output,
            manager,
        } = self;

        match output {
            OutputType::Json => {
                let json = groups_to_json(manager)?;
                writeln!(writer, "{json}")?;
            }
            OutputType::PlainText => {
                for group in manager.groups()? {
                    writeln!(writer, "{}", plain_text(manager, &group, opts.detailed)?)?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }
}

/// Display identifiers of the given addresses
pub fn resolve_members<M: Manager>(
    manager: &M,
    addresses: &BTreeSet<SignalServiceAddress>,
) -> Result<BTreeSet<String>, ManagerError> {
    addresses
        .iter()
        .map(|address| {
            manager
                .resolve_address(address)
                .map(|resolved| resolved.legacy_identifier())
        })
        .collect()
}

pub fn plain_text<M: Manager>(
    manager: &M,
    group: &GroupInfo,
    detailed: bool,
) -> Result<String, ManagerError> {
    let summary = format!(
        "Id: {} Name: {}  Active: {} Blocked: {}",
        group.id.to_base64(),
        group.title,
        group.is_member(manager.self_address()),
        group.is_blocked(),
    );
    if !detailed {
        return Ok(summary);
    }

    Ok(format!(
        "{summary} Members: {} Pending members: {} Requesting members: {} Link: {}",
        fmt_set(&resolve_members(manager, &group.members)?),
        fmt_set(&resolve_members(manager, &group.pending_members)?),
        fmt_set(&resolve_members(manager, &group.requesting_members)?),
        group.invite_link.as_ref().map_or("-", |link| link.url()),
    ))
}

fn fmt_set(set: &BTreeSet<String>) -> String {
    format!(
        "[{}]",
        set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonGroup {
    id: String,
    name: String,
    is_member: bool,
    is_blocked: bool,
    members: BTreeSet<String>,
    pending_members: BTreeSet<String>,
    requesting_members: BTreeSet<String>,
    group_invite_access_control: String,
    group_invite_link: Option<String>,
}

impl JsonGroup {
    pub fn new<M: Manager>(manager: &M, group: &GroupInfo) -> Result<Self, ManagerError> {
        Ok(Self {
            id: group.id.to_base64(),
            name: group.title.clone(),
            is_member: group.is_member(manager.self_address()),
            is_blocked: group.is_blocked(),
            members: resolve_members(manager, &group.members)?,
            pending_members: resolve_members(manager, &group.pending_members)?,
            requesting_members: resolve_members(manager, &group.requesting_members)?,
            group_invite_access_control: group.invite_access_control().to_string(),
            group_invite_link: group.invite_link.as_ref().map(|link| link.url().to_string()),
        })
    }
}

/// A single group as a JSON object
pub fn group_to_json<M: Manager>(
    manager: &M,
    group: &GroupInfo,
) -> Result<String, ListGroupsError> {
    Ok(serde_json::to_string(&JsonGroup::new(manager, group)?)?)
}

/// Every group as a JSON array
pub fn groups_to_json<M: Manager>(manager: &M) -> Result<String, ListGroupsError> {
    let groups = manager
        .groups()?
        .iter()
        .map(|group| group_to_json(manager, group))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("[{}]", groups.join(",")))
}
