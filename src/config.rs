use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    pub auth: AuthConfig,
    /// PostgreSQL connection URL for the calculation log (disabled when absent)
    #[serde(default)]
    pub postgres_url: Option<String>,
    #[serde(default)]
    pub media: MediaConfig,
    /// External structured log sink (Seq); disabled when absent
    #[serde(default)]
    pub log_sink: Option<LogSinkConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_expire_minutes")]
    pub token_expire_minutes: i64,
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

/// A login account. Supply either a plaintext `password` (hashed at startup)
/// or an argon2 PHC `password_hash`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserConfig {
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub password_hash: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MediaConfig {
    pub root: PathBuf,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./music"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogSinkConfig {
    /// Seq server base URL, e.g. `http://localhost:5341`
    pub url: String,
    #[serde(default = "default_sink_level")]
    pub level: String,
}

fn default_token_expire_minutes() -> i64 {
    30
}

fn default_sink_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load `config/<env>.yaml` and apply environment overrides.
    pub fn load(env: &str) -> Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        let mut config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse config yaml")
    }

    /// Secrets and deployment paths may come from the environment instead of the file.
    fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.postgres_url = Some(url);
        }
        if let Ok(root) = std::env::var("MEDIA_ROOT") {
            self.media.root = PathBuf::from(root);
        }
        if let Ok(url) = std::env::var("SEQ_URL") {
            match self.log_sink.as_mut() {
                Some(sink) => sink.url = url,
                None => {
                    self.log_sink = Some(LogSinkConfig {
                        url,
                        level: default_sink_level(),
                    })
                }
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            bail!("auth.jwt_secret must not be empty");
        }
        if self.auth.token_expire_minutes <= 0 {
            bail!("auth.token_expire_minutes must be positive");
        }
        for user in &self.auth.users {
            if user.password.is_none() && user.password_hash.is_none() {
                bail!(
                    "user '{}' needs either `password` or `password_hash`",
                    user.username
                );
            }
        }
        Ok(())
    }
}
