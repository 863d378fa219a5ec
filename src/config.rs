use anyhow::Context;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` runs the service on the in-process store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        anyhow::ensure!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let jwt = JwtConfig {
            secret,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "expense-tracker".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "expense-tracker-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(60 * 24),
        };

        Ok(Self {
            database_url,
            database_max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            jwt,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .map(|v| v.parse::<u16>())
                .transpose()
                .context("APP_PORT must be a port number")?
                .unwrap_or(8080),
        })
    }

    /// Configuration for tests and local tooling: in-memory storage, fixed secret.
    pub fn for_tests() -> Self {
        Self {
            database_url: None,
            database_max_connections: 1,
            jwt: JwtConfig {
                secret: "test-secret".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 60 * 24,
            },
            host: "127.0.0.1".into(),
            port: 0,
        }
    }
}
