use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub app_env: String,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub questions_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub admin_subject: String,
    pub dev_tokens_enabled: bool,
    pub quiz_sample_size: i64,
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    /// Loads `config/.env` (falling back to `.env`) into the process environment.
    pub fn load_dotenv() {
        if dotenvy::from_filename("config/.env").is_err() {
            dotenvy::dotenv().ok();
        }
    }

    pub fn from_env() -> Self {
        Self {
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            mongo_conn_string: env::var("MONGO_URI")
                .or_else(|_| env::var("MONGO_CONN_STRING"))
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "quiz-host-local".to_string()),
            questions_collection: env::var("QUESTIONS_COLLECTION")
                .unwrap_or_else(|_| "questions".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .or_else(|_| env::var("PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(1),
            admin_subject: env::var("ADMIN_SUBJECT")
                .unwrap_or_else(|_| "test_admin_user_id".to_string()),
            dev_tokens_enabled: env::var("DEV_TOKENS_ENABLED")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(true),
            quiz_sample_size: env::var("QUIZ_SAMPLE_SIZE")
                .ok()
                .and_then(|n| n.parse().ok())
                .filter(|n: &i64| *n > 0)
                .unwrap_or(10),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|o| !o.trim().is_empty()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Rejects configurations that must never reach production: the default or a
    /// short JWT secret, and the dev token endpoint.
    pub fn validate_for_production(&self) -> AppResult<()> {
        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::ValidationError(
                "JWT_SECRET is using default value! Set JWT_SECRET to a secure random string."
                    .to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::ValidationError(format!(
                "JWT_SECRET is too short ({}). Must be at least 32 characters.",
                jwt_secret.len()
            )));
        }

        if self.dev_tokens_enabled {
            return Err(AppError::ValidationError(
                "DEV_TOKENS_ENABLED must be false in production.".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            app_env: "test".to_string(),
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quiz-host-test".to_string(),
            questions_collection: "questions".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            admin_subject: "test_admin_user_id".to_string(),
            dev_tokens_enabled: true,
            quiz_sample_size: 10,
            cors_allowed_origin: None,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert!(config.quiz_sample_size > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.mongo_db_name, "quiz-host-test");
        assert_eq!(config.questions_collection, "questions");
        assert_eq!(config.quiz_sample_size, 10);
        assert!(!config.is_production());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let mut config = Config::test_config();
        config.jwt_secret = SecretString::from(DEFAULT_JWT_SECRET.to_string());
        config.dev_tokens_enabled = false;

        assert!(config.validate_for_production().is_err());
    }

    #[test]
    fn test_production_rejects_short_secret() {
        let mut config = Config::test_config();
        config.dev_tokens_enabled = false;

        assert!(config.validate_for_production().is_err());
    }

    #[test]
    fn test_production_rejects_dev_tokens() {
        let mut config = Config::test_config();
        config.jwt_secret = SecretString::from("a".repeat(48));

        assert!(config.validate_for_production().is_err());

        config.dev_tokens_enabled = false;
        assert!(config.validate_for_production().is_ok());
    }
}
