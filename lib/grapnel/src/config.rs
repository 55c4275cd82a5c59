//! Client configuration types.

use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 32;
const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Settings for the bundled HTTP transport.
///
/// Only the transport reads these. A custom [`Transport`](crate::Transport)
/// implementation brings its own tuning.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deadline for a whole request, connect included.
    pub timeout: Duration,
    /// Deadline for establishing a TCP connection.
    pub connect_timeout: Duration,
    /// How many idle connections to keep per host.
    pub pool_max_idle_per_host: usize,
    /// How long an idle connection may sit in the pool.
    pub pool_idle_timeout: Duration,
    /// `User-Agent` header applied when a request does not set one.
    ///
    /// `None` sends no default header at all.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use grapnel::ClientConfig;
    ///
    /// let config = ClientConfig::builder()
    ///     .timeout(Duration::from_secs(5))
    ///     .user_agent("inventory-sync/2.1")
    ///     .build();
    /// assert_eq!(config.connect_timeout, Duration::from_secs(10));
    /// ```
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`]. Unset knobs keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_max_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    /// Set the whole-request deadline.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection deadline.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set how many idle connections to keep per host.
    #[must_use]
    pub const fn pool_max_idle_per_host(mut self, count: usize) -> Self {
        self.pool_max_idle_per_host = Some(count);
        self
    }

    /// Set how long an idle connection may sit in the pool.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Set the default `User-Agent` header.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the configuration, filling unset knobs with defaults.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        ClientConfig {
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            pool_max_idle_per_host: self
                .pool_max_idle_per_host
                .unwrap_or(DEFAULT_POOL_MAX_IDLE_PER_HOST),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(DEFAULT_POOL_IDLE_TIMEOUT),
            user_agent: self.user_agent,
        }
    }
}
