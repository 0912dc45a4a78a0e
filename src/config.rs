//! Session configuration from the environment

const DEFAULT_INBOX_CAPACITY: usize = 64;
const DEFAULT_UPDATE_CAPACITY: usize = 128;
const DEFAULT_OUTBOUND_CAPACITY: usize = 64;
const DEFAULT_LOG_FILTER: &str = "agent_session=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Buffered inbox events (submits + transport events)
    pub inbox_capacity: usize,
    /// Buffered renderer updates per subscriber
    pub update_capacity: usize,
    /// Buffered outbound frames for `ChannelTransport`
    pub outbound_capacity: usize,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
            update_capacity: DEFAULT_UPDATE_CAPACITY,
            outbound_capacity: DEFAULT_OUTBOUND_CAPACITY,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; missing or unparsable values
    /// fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let capacity = |key: &str, default: usize| {
            lookup(key)
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|&v| v > 0)
                .unwrap_or(default)
        };

        Self {
            inbox_capacity: capacity("AGENT_SESSION_INBOX_CAPACITY", DEFAULT_INBOX_CAPACITY),
            update_capacity: capacity("AGENT_SESSION_UPDATE_CAPACITY", DEFAULT_UPDATE_CAPACITY),
            outbound_capacity: capacity(
                "AGENT_SESSION_OUTBOUND_CAPACITY",
                DEFAULT_OUTBOUND_CAPACITY,
            ),
            log_filter: lookup("AGENT_SESSION_LOG")
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
