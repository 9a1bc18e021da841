use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub swagger: SwaggerConfig,
    pub club_code: ClubCodeConfig,
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Club code allocation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubCodeConfig {
    /// Single uppercase letter placed in front of every club code
    pub prefix: String,
    /// Highest counter value before the sequence wraps
    pub ceiling: i64,
    /// Counter value used after a wrap (and for a brand new prefix)
    pub reset_to: i64,
}

/// Approval workflow and notification settings
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Deadline applied to every store-backed operation
    pub operation_timeout: Duration,
    /// Events buffered per live connection
    pub notification_buffer: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            club_code: ClubCodeConfig::from_env()?,
            workflow: WorkflowConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "ClubHub API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "Club registration and provincial approval workflow".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl ClubCodeConfig {
    pub const DEFAULT_PREFIX: &'static str = "C";
    pub const DEFAULT_CEILING: i64 = 9_999_999;
    pub const DEFAULT_RESET_TO: i64 = 1;
    /// Largest value that still fits the 8-digit numeric part
    pub const MAX_CEILING: i64 = 99_999_999;

    pub fn from_env() -> Result<Self, String> {
        let prefix =
            env::var("CLUB_CODE_PREFIX").unwrap_or_else(|_| Self::DEFAULT_PREFIX.to_string());

        let ceiling = env::var("CLUB_CODE_CEILING")
            .unwrap_or_else(|_| Self::DEFAULT_CEILING.to_string())
            .parse::<i64>()
            .map_err(|_| "CLUB_CODE_CEILING must be a valid number".to_string())?;

        let reset_to = env::var("CLUB_CODE_RESET_TO")
            .unwrap_or_else(|_| Self::DEFAULT_RESET_TO.to_string())
            .parse::<i64>()
            .map_err(|_| "CLUB_CODE_RESET_TO must be a valid number".to_string())?;

        let config = Self {
            prefix,
            ceiling,
            reset_to,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the prefix shape and that `1 <= reset_to <= ceiling`
    pub fn validate(&self) -> Result<(), String> {
        let mut chars = self.prefix.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => {}
            _ => {
                return Err("CLUB_CODE_PREFIX must be a single uppercase letter".to_string());
            }
        }

        if self.reset_to < 1 {
            return Err("CLUB_CODE_RESET_TO must be at least 1".to_string());
        }

        if self.ceiling < self.reset_to {
            return Err("CLUB_CODE_CEILING must not be below CLUB_CODE_RESET_TO".to_string());
        }

        if self.ceiling > Self::MAX_CEILING {
            return Err(format!(
                "CLUB_CODE_CEILING must not exceed {}",
                Self::MAX_CEILING
            ));
        }

        Ok(())
    }
}

impl Default for ClubCodeConfig {
    fn default() -> Self {
        Self {
            prefix: Self::DEFAULT_PREFIX.to_string(),
            ceiling: Self::DEFAULT_CEILING,
            reset_to: Self::DEFAULT_RESET_TO,
        }
    }
}

impl WorkflowConfig {
    const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 5000;
    const DEFAULT_NOTIFICATION_BUFFER: usize = 32;

    pub fn from_env() -> Result<Self, String> {
        let operation_timeout_ms = env::var("OPERATION_TIMEOUT_MS")
            .unwrap_or_else(|_| Self::DEFAULT_OPERATION_TIMEOUT_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "OPERATION_TIMEOUT_MS must be a valid number".to_string())?;

        let notification_buffer = env::var("NOTIFICATION_BUFFER")
            .unwrap_or_else(|_| Self::DEFAULT_NOTIFICATION_BUFFER.to_string())
            .parse::<usize>()
            .map_err(|_| "NOTIFICATION_BUFFER must be a valid number".to_string())?;

        if notification_buffer == 0 {
            return Err("NOTIFICATION_BUFFER must be greater than zero".to_string());
        }

        Ok(Self {
            operation_timeout: Duration::from_millis(operation_timeout_ms),
            notification_buffer,
        })
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            operation_timeout: Duration::from_millis(Self::DEFAULT_OPERATION_TIMEOUT_MS),
            notification_buffer: Self::DEFAULT_NOTIFICATION_BUFFER,
        }
    }
}
