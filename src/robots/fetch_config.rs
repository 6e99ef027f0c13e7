use crate::robots::rule_set::DEFAULT_AGENT;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct FetchConfig {
    timeout: Duration,
    user_agent: String,
}

impl FetchConfig {
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        Self {
            timeout,
            user_agent: user_agent.to_owned(),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// The `User-Agent` header to send, if any. The wildcard agent sends none.
    pub fn user_agent_header(&self) -> Option<&str> {
        if self.user_agent == DEFAULT_AGENT {
            None
        } else {
            Some(&self.user_agent)
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_AGENT)
    }
}
