use std::collections::BTreeMap;
use std::time::Duration;

/// Stage durations for one request. A stage that did not run is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestTimings {
    pub before_hook: Option<Duration>,
    pub body: Option<Duration>,
    pub send: Option<Duration>,
    pub response: Option<Duration>,
    pub after_hook: Option<Duration>,
    pub total: Duration,
}

/// Durations for a whole batch, keyed by request name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchTimings {
    pub total: Duration,
    pub requests: BTreeMap<String, RequestTimings>,
}
