use std::num::NonZeroUsize;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Cap on bytes read from each response body; `0` or negative is
    /// unlimited.
    #[serde(alias = "max_size_body")]
    pub max_body_size: i64,
    /// Cap on requests in flight at once; unset is unlimited.
    pub max_in_flight: Option<NonZeroUsize>,
    pub transport: TransportConfig,
}

impl ExecutorConfig {
    #[must_use]
    pub const fn with_max_body_size(mut self, max_body_size: i64) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    #[must_use]
    pub const fn with_max_in_flight(mut self, max_in_flight: Option<NonZeroUsize>) -> Self {
        self.max_in_flight = max_in_flight;
        self
    }

    /// Effective body cap, `None` when unlimited.
    #[must_use]
    pub const fn body_limit(&self) -> Option<u64> {
        if self.max_body_size > 0 {
            Some(self.max_body_size.unsigned_abs())
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TransportConfig {
    pub user_agent: Option<String>,
    pub no_user_agent: bool,
    /// `0` disables redirects; unset follows up to 10.
    pub redirect_limit: Option<u32>,
    pub disable_keepalive: bool,
    pub disable_compression: bool,
}
