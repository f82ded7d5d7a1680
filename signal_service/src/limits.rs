use serde::Serialize;
use signal_configuration::{
    AVATAR_DOWNLOAD_FAILSAFE_MAX_SIZE, MAX_ATTACHMENT_SIZE, MAX_ENVELOPE_SIZE, PREKEY_BATCH_SIZE,
    PREKEY_MINIMUM_COUNT,
};

/// Size and count limits the client enforces against the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Limits {
    pub prekey_minimum_count: usize,
    pub prekey_batch_size: usize,
    pub max_attachment_size: u64,
    /// 0 means unlimited
    pub max_envelope_size: u64,
    pub avatar_download_failsafe_max_size: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            prekey_minimum_count: PREKEY_MINIMUM_COUNT,
            prekey_batch_size: PREKEY_BATCH_SIZE,
            max_attachment_size: MAX_ATTACHMENT_SIZE,
            max_envelope_size: MAX_ENVELOPE_SIZE,
            avatar_download_failsafe_max_size: AVATAR_DOWNLOAD_FAILSAFE_MAX_SIZE,
        }
    }
}

impl Limits {
    /// `None` when envelopes are unbounded
    pub fn envelope_limit(&self) -> Option<u64> {
        (self.max_envelope_size > 0).then_some(self.max_envelope_size)
    }
}
