use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    /// Bearer token validation for tokens issued by the auth provider
    pub auth: AuthConfig,
    /// Payments provider (Stripe) settings
    #[serde(default)]
    pub stripe: StripeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Public URL of the web app, sent to Stripe as the business profile URL
    #[serde(default)]
    pub public_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

impl From<&DatabaseConfig> for persistence::db::DatabaseConfig {
    fn from(c: &DatabaseConfig) -> Self {
        Self {
            url: c.url.clone(),
            max_connections: c.max_connections,
            min_connections: c.min_connections,
            connect_timeout_secs: c.connect_timeout_secs,
            idle_timeout_secs: c.idle_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Requests per minute per caller on write routes; 0 disables limiting
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 secret of the auth provider
    pub jwt_secret: String,

    /// Expected `aud` claim; empty disables the audience check
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Leeway in seconds for clock skew tolerance
    #[serde(default = "default_jwt_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Builds the token validator for this configuration.
    pub fn jwt_config(&self) -> Result<shared::jwt::JwtConfig, shared::jwt::JwtError> {
        let audience = Some(self.audience.trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string);
        shared::jwt::JwtConfig::new(&self.jwt_secret, audience, self.leeway_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeConfig {
    /// Secret API key; empty means payments are not configured
    #[serde(default)]
    pub secret_key: String,

    #[serde(default = "default_stripe_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_stripe_timeout_ms")]
    pub timeout_ms: u64,

    /// Signing secret for webhook events; empty disables the webhook route
    #[serde(default)]
    pub webhook_secret: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Country for new connected accounts
    #[serde(default = "default_country")]
    pub default_country: String,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            api_base_url: default_stripe_api_base_url(),
            timeout_ms: default_stripe_timeout_ms(),
            webhook_secret: String::new(),
            currency: default_currency(),
            default_country: default_country(),
        }
    }
}

impl StripeConfig {
    pub fn is_configured(&self) -> bool {
        !self.secret_key.trim().is_empty()
    }

    pub fn webhook_configured(&self) -> bool {
        !self.webhook_secret.trim().is_empty()
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    2
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_rate_limit() -> u32 {
    60
}
fn default_audience() -> String {
    shared::jwt::DEFAULT_AUDIENCE.to_string()
}
fn default_jwt_leeway() -> u64 {
    shared::jwt::DEFAULT_LEEWAY_SECS
}
fn default_stripe_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}
fn default_stripe_timeout_ms() -> u64 {
    15000
}
fn default_currency() -> String {
    "usd".to_string()
}
fn default_country() -> String {
    "US".to_string()
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with MM__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("MM").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides, without
    /// touching the config files.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            request_timeout_secs = 30
            public_base_url = "http://localhost:3000"

            [database]
            url = ""
            max_connections = 5
            min_connections = 1
            connect_timeout_secs = 10
            idle_timeout_secs = 600

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []
            rate_limit_per_minute = 0

            [auth]
            jwt_secret = "test-jwt-secret-with-enough-entropy"
            audience = "authenticated"
            leeway_secs = 30

            [stripe]
            secret_key = ""
            api_base_url = "https://api.stripe.com"
            timeout_ms = 15000
            webhook_secret = ""
            currency = "usd"
            default_country = "US"
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        // Validation is skipped so tests can build partial configs
        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.database.url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "MM__DATABASE__URL environment variable must be set".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigValidationError::InvalidValue(
                "min_connections cannot exceed max_connections".to_string(),
            ));
        }

        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "MM__AUTH__JWT_SECRET environment variable must be set".to_string(),
            ));
        }

        if self.stripe.timeout_ms == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "stripe.timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }
}
