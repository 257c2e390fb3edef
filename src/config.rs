use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    /// Upper bound applied to the `limit` query parameter.
    pub max_page_size: u32,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("AUDITLOG_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid AUDITLOG_HOST: {e}"))?;

        let port: u16 = env_or("AUDITLOG_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid AUDITLOG_PORT: {e}"))?;

        let log_level = env_or("AUDITLOG_LOG_LEVEL", "info");

        let max_page_size: u32 = env_or("AUDITLOG_MAX_PAGE_SIZE", "1000")
            .parse()
            .map_err(|e| format!("Invalid AUDITLOG_MAX_PAGE_SIZE: {e}"))?;
        if max_page_size == 0 {
            return Err("AUDITLOG_MAX_PAGE_SIZE must be at least 1".to_string());
        }

        let db_max_connections: u32 = env_or("AUDITLOG_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid AUDITLOG_DB_MAX_CONNECTIONS: {e}"))?;

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            log_level,
            max_page_size,
            db_max_connections,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
