//! Protocol limits shared by every environment

pub const PREKEY_MINIMUM_COUNT: usize = 20;

pub const PREKEY_BATCH_SIZE: usize = 100;

pub const MAX_ATTACHMENT_SIZE: u64 = 150 * 1024 * 1024;

/// 0 means no limit
pub const MAX_ENVELOPE_SIZE: u64 = 0;

pub const AVATAR_DOWNLOAD_FAILSAFE_MAX_SIZE: u64 = 10 * 1024 * 1024;
