use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// MongoDB connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Connection string, e.g. "mongodb://localhost:27017"
    pub uri: String,
    /// Database holding the reports, projects and users collections
    pub database: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub max_idle_time_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
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
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

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

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_DATABASE: &'static str = "project_tracker";
    const DEFAULT_MAX_POOL_SIZE: u32 = 10;
    const DEFAULT_MIN_POOL_SIZE: u32 = 1;
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_MAX_IDLE_TIME_SECS: u64 = 600; // 10 minutes

    pub fn from_env() -> Result<Self, String> {
        let uri = env::var("MONGODB_URI").map_err(|_| "MONGODB_URI must be set".to_string())?;

        let database =
            env::var("MONGODB_DATABASE").unwrap_or_else(|_| Self::DEFAULT_DATABASE.to_string());

        let max_pool_size = env::var("DB_MAX_POOL_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_POOL_SIZE.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_POOL_SIZE must be a valid number".to_string())?;

        let min_pool_size = env::var("DB_MIN_POOL_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_POOL_SIZE.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_POOL_SIZE must be a valid number".to_string())?;

        let connect_timeout_secs = env::var("DB_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_CONNECT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_CONNECT_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_idle_time_secs = env::var("DB_MAX_IDLE_TIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_IDLE_TIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_IDLE_TIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            uri,
            database,
            max_pool_size,
            min_pool_size,
            connect_timeout_secs,
            max_idle_time_secs,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Project Tracker API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Reports, projects and users of the project tracker".to_string());

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
