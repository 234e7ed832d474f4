/// Origin used when `GAFEED_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// User agent used when `GAFEED_USER_AGENT` is not set.
pub const DEFAULT_USER_AGENT: &str = "gafeed/0.1 (analytics-client)";

#[derive(Clone)]
pub struct ClientConfig {
    pub token: String,
    pub profile_id: Option<u64>,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub verify_ssl: bool,
    pub http_proxy: Option<String>,
    pub user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"[redacted]")
            .field("profile_id", &self.profile_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("verify_ssl", &self.verify_ssl)
            .field(
                "http_proxy",
                &self.http_proxy.as_ref().map(|_| "[redacted]"),
            )
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
