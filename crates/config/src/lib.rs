use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "skylab.toml",
    "config/skylab.toml",
    "crates/config/skylab.toml",
    "../skylab.toml",
    "../config/skylab.toml",
    "../crates/config/skylab.toml",
];

const DEFAULT_JWT_SECRET: &str = "change-me-skylab-development-secret";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 4000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://skylab.db".to_string(),
            max_connections: 10,
        }
    }
}

/// Settings for issuing and checking the JWTs stored in the `token` cookie.
///
/// ```
/// use skylab_config::AuthConfig;
///
/// let auth = AuthConfig::default();
/// assert_eq!(auth.jwt_issuer, "skylab");
/// assert_eq!(auth.token_ttl_seconds, 86_400);
/// assert!(!auth.cookie_secure);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "AuthConfig::default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "AuthConfig::default_jwt_issuer")]
    pub jwt_issuer: String,
    #[serde(default = "AuthConfig::default_token_ttl")]
    pub token_ttl_seconds: u64,
    #[serde(default)]
    pub cookie_secure: bool,
}

impl AuthConfig {
    fn default_jwt_secret() -> String {
        DEFAULT_JWT_SECRET.to_string()
    }

    fn default_jwt_issuer() -> String {
        "skylab".to_string()
    }

    const fn default_token_ttl() -> u64 {
        86_400
    }

    /// Whether the signing secret is still the built-in development value.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Self::default_jwt_secret(),
            jwt_issuer: Self::default_jwt_issuer(),
            token_ttl_seconds: Self::default_token_ttl(),
            cookie_secure: false,
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use skylab_config::load;
///
/// std::env::remove_var("SKYLAB_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let db_max = i64::from(defaults.database.max_connections);
    let token_ttl = i64::try_from(defaults.auth.token_ttl_seconds).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("database.url", defaults.database.url.clone())?
        .set_default("database.max_connections", db_max)?
        .set_default("auth.jwt_secret", defaults.auth.jwt_secret.clone())?
        .set_default("auth.jwt_issuer", defaults.auth.jwt_issuer.clone())?
        .set_default("auth.token_ttl_seconds", token_ttl)?
        .set_default("auth.cookie_secure", defaults.auth.cookie_secure)?;

    let environment_overrides = config::Environment::with_prefix("SKYLAB").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("SKYLAB_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via SKYLAB_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    // Token lifetimes are added to i64 unix timestamps when issuing JWTs.
    if config.auth.token_ttl_seconds > i64::MAX as u64 {
        config.auth.token_ttl_seconds = i64::MAX as u64;
    }

    if config.auth.jwt_secret.trim().is_empty() {
        anyhow::bail!("invalid configuration: auth.jwt_secret must not be empty");
    }

    debug!(
        address = %config.http.address,
        port = config.http.port,
        database = %config.database.url,
        "loaded backend configuration"
    );
    Ok(config)
}
