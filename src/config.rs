//! Runtime settings, read from flags, the environment and an optional `.env`.

use clap::Args;
use std::path::PathBuf;

pub const DEFAULT_APP_NAME: &str = "Payments API";
pub const DEFAULT_JWT_SECRET: &str = "some-secret-key";
pub const DEFAULT_JWT_ALGORITHM: &str = "HS256";
pub const DEFAULT_TOKEN_EXPIRE_MINUTES: i64 = 30;

#[derive(Debug, Clone, Args)]
pub struct Settings {
    #[arg(long, env = "APP_NAME", default_value = DEFAULT_APP_NAME, global = true)]
    pub app_name: String,

    /// Verbose logging unless RUST_LOG says otherwise.
    #[arg(long, env = "DEBUG", global = true)]
    pub debug: bool,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "DB_PATH", global = true)]
    pub db_path: Option<PathBuf>,

    #[command(flatten)]
    pub jwt: JwtSettings,

    #[command(flatten)]
    pub hashing: HashingSettings,
}

#[derive(Debug, Clone, Args)]
pub struct JwtSettings {
    #[arg(long = "jwt-secret-key", env = "JWT_SECRET_KEY", default_value = DEFAULT_JWT_SECRET, global = true, hide_env_values = true)]
    pub secret_key: String,

    #[arg(long = "jwt-algorithm", env = "JWT_ALGORITHM", default_value = DEFAULT_JWT_ALGORITHM, global = true)]
    pub algorithm: String,

    #[arg(long, env = "ACCESS_TOKEN_EXPIRE_MINUTES", default_value_t = DEFAULT_TOKEN_EXPIRE_MINUTES, global = true)]
    pub access_token_expire_minutes: i64,
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Args)]
pub struct HashingSettings {
    #[arg(long = "argon2-time-cost", env = "ARGON2_TIME_COST", default_value_t = 3, global = true)]
    pub time_cost: u32,

    /// Memory usage in kibibytes.
    #[arg(long = "argon2-memory-kib", env = "ARGON2_MEMORY_KIB", default_value_t = 64 * 1024, global = true)]
    pub memory_kib: u32,

    #[arg(long = "argon2-parallelism", env = "ARGON2_PARALLELISM", default_value_t = 4, global = true)]
    pub parallelism: u32,
}

impl Default for HashingSettings {
    fn default() -> Self {
        Self {
            time_cost: 3,
            memory_kib: 64 * 1024,
            parallelism: 4,
        }
    }
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            secret_key: DEFAULT_JWT_SECRET.to_string(),
            algorithm: DEFAULT_JWT_ALGORITHM.to_string(),
            access_token_expire_minutes: DEFAULT_TOKEN_EXPIRE_MINUTES,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            debug: false,
            db_path: None,
            jwt: JwtSettings::default(),
            hashing: HashingSettings::default(),
        }
    }
}

impl JwtSettings {
    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_JWT_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        settings: Settings,
    }

    #[test]
    fn test_defaults_match_flags() {
        let cli = TestCli::parse_from(["test"]);
        let defaults = Settings::default();
        assert_eq!(cli.settings.app_name, defaults.app_name);
        assert_eq!(cli.settings.jwt.algorithm, defaults.jwt.algorithm);
        assert_eq!(cli.settings.hashing, defaults.hashing);
        assert!(cli.settings.jwt.uses_default_secret());
    }

    #[test]
    fn test_overrides() {
        let cli = TestCli::parse_from([
            "test",
            "--jwt-secret-key",
            "s3cret",
            "--access-token-expire-minutes",
            "5",
            "--argon2-memory-kib",
            "1024",
        ]);
        assert_eq!(cli.settings.jwt.secret_key, "s3cret");
        assert_eq!(cli.settings.jwt.access_token_expire_minutes, 5);
        assert_eq!(cli.settings.hashing.memory_kib, 1024);
        assert!(!cli.settings.jwt.uses_default_secret());
    }
}
