use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Root nameservers as `IP:PORT`; resolution starts from the first.
    #[serde(default = "default_root_hints")]
    pub root_hints: Vec<String>,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Extra attempts against the same nameserver after a timeout.
    #[serde(default)]
    pub retries: u32,

    /// Nameserver queries allowed for one resolution, nested lookups included.
    #[serde(default = "default_max_delegation_depth")]
    pub max_delegation_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_hints: default_root_hints(),
            query_timeout_ms: default_query_timeout_ms(),
            retries: 0,
            max_delegation_depth: default_max_delegation_depth(),
        }
    }
}

impl ResolverConfig {
    pub fn root_hint_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.root_hints
            .iter()
            .map(|hint| {
                hint.parse::<SocketAddr>().map_err(|e| {
                    ConfigError::Validation(format!("Invalid root hint '{}': {}", hint, e))
                })
            })
            .collect()
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn with_root_hint(mut self, addr: SocketAddr) -> Self {
        self.root_hints = vec![addr.to_string()];
        self
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.query_timeout_ms = timeout_ms;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_max_delegation_depth(mut self, depth: usize) -> Self {
        self.max_delegation_depth = depth;
        self
    }
}

fn default_root_hints() -> Vec<String> {
    vec![
        "198.41.0.4:53".to_string(),   // a.root-servers.net
        "170.247.170.2:53".to_string(), // b.root-servers.net
        "192.33.4.12:53".to_string(),  // c.root-servers.net
    ]
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_max_delegation_depth() -> usize {
    32
}
