use std::env;
use thiserror::Error;

const DEFAULT_JWT_SECRET: &str = "default-secret-change-me";
// 10 anos
const MAX_JWT_TTL_HOURS: i64 = 87_600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Runtime configuration, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017/portfolio".to_string());
        let database_name = env::var("DATABASE_NAME")
            .unwrap_or_else(|_| database_name_from_url(&database_url));

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("⚠️  JWT_SECRET not set, using insecure default");
            DEFAULT_JWT_SECRET.to_string()
        });

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 8080)?,
            database_url,
            database_name,
            jwt_secret,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "devfolio-service".to_string()),
            jwt_audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "devfolio-api".to_string()),
            jwt_ttl_hours: check_ttl_hours(parse_var("JWT_TTL_HOURS", 24)?)?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            cors_allowed_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(default),
    }
}

/// Token lifetime must be positive and bounded
fn check_ttl_hours(hours: i64) -> Result<i64, ConfigError> {
    if (1..=MAX_JWT_TTL_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(ConfigError::InvalidValue {
            key: "JWT_TTL_HOURS",
            value: hours.to_string(),
        })
    }
}

// mongodb://host:27017/portfolio?retryWrites=true -> portfolio
fn database_name_from_url(url: &str) -> String {
    url.rsplit('/')
        .next()
        .and_then(|s| s.split('?').next())
        .filter(|s| !s.is_empty() && !s.contains(':') && !s.contains('@'))
        .unwrap_or("portfolio")
        .to_string()
}

#[cfg(test)]
impl AppConfig {
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "mongodb://localhost:27017/portfolio_test".to_string(),
            database_name: "portfolio_test".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_issuer: "devfolio-service".to_string(),
            jwt_audience: "devfolio-api".to_string(),
            jwt_ttl_hours: 24,
            bcrypt_cost: 4,
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}
