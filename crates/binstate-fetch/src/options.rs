use std::time::Duration;

use crate::http::Header;

const DEFAULT_USER_AGENT: &str = concat!("binstate/", env!("CARGO_PKG_VERSION"));

/// Transport timeouts. `None` leaves the transport default in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Option<Duration>,
    pub request: Option<Duration>,
}

/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use binstate_fetch::ClientOptions;
/// use std::time::Duration;
///
/// let options = ClientOptions::default()
///     .connect_timeout(Some(Duration::from_secs(10)))
///     .header("Accept", "application/json");
/// ```
#[derive(Clone, Debug)]
pub struct ClientOptions {
    pub timeouts:   Timeouts,
    pub user_agent: String,
    /// Headers sent with every request.
    pub headers:    Vec<Header>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeouts:   Timeouts::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers:    Vec::new(),
        }
    }
}

impl ClientOptions {
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeouts.connect = timeout;
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeouts.request = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a single default header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_timeouts() {
        let options = ClientOptions::default();
        assert_eq!(options.timeouts, Timeouts::default());
        assert!(options.user_agent.starts_with("binstate/"));
        assert!(options.headers.is_empty());
    }

    #[test]
    fn builder_sets_fields() {
        let options = ClientOptions::default()
            .connect_timeout(Some(Duration::from_secs(5)))
            .request_timeout(Some(Duration::from_secs(60)))
            .user_agent("test-agent")
            .header("X-Test", "1");
        assert_eq!(options.timeouts.connect, Some(Duration::from_secs(5)));
        assert_eq!(options.timeouts.request, Some(Duration::from_secs(60)));
        assert_eq!(options.user_agent, "test-agent");
        assert_eq!(options.headers, vec![("X-Test".to_string(), "1".to_string())]);
    }
}
