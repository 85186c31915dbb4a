pub const AUTH_REQUIRED_PAGE: &str = "/pages/auth_required.html";
pub const ACCESS_DENIED_PAGE: &str = "/pages/accessDenied.html";
pub const LOGIN_PAGE: &str = "/pages/login.html";
pub const DASHBOARD_PAGE: &str = "/pages/dashboard.html";

pub struct GoogleOAuthEnv {
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
}

pub struct Env {
    pub database_url: String,
    pub database_max_connections: u32,
    pub redis_url: String,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub frontend_url: String,
    pub public_dir: String,
    pub rawg_base_url: String,
    pub rawg_api_key: Option<String>,
    pub catalog_cache_ttl_secs: i64,
    pub google: Option<GoogleOAuthEnv>,
    pub ip: String,
    pub port: u16,
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl Env {
    fn new() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file or environment variable");
        let database_max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32 integer");

        let redis_url = std::env::var("REDIS_URL")
            .expect("REDIS_URL must be set in .env file or environment variable");

        let session_secret = std::env::var("SESSION_SECRET")
            .expect("SESSION_SECRET must be set in .env file or environment variable");
        assert!(session_secret.len() >= 64, "SESSION_SECRET must be at least 64 bytes long");
        let session_ttl_hours = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse::<i64>()
            .expect("SESSION_TTL_HOURS must be a valid integer");

        let frontend_url =
            std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let public_dir = std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "./public".to_string());

        let rawg_base_url = std::env::var("RAWG_BASE_URL")
            .unwrap_or_else(|_| "https://api.rawg.io/api".to_string());
        let rawg_api_key = optional("RAWG_API_KEY");
        let catalog_cache_ttl_secs = std::env::var("CATALOG_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<i64>()
            .expect("CATALOG_CACHE_TTL_SECS must be a valid integer");

        let google = match (
            optional("GOOGLE_CLIENT_ID"),
            optional("GOOGLE_CLIENT_SECRET"),
            optional("GOOGLE_CALLBACK_URL"),
        ) {
            (Some(client_id), Some(client_secret), Some(callback_url)) => {
                Some(GoogleOAuthEnv { client_id, client_secret, callback_url })
            }
            _ => None,
        };

        let ip = std::env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid u16 integer");
        Env {
            database_url,
            database_max_connections,
            redis_url,
            session_secret,
            session_ttl_hours,
            frontend_url,
            public_dir,
            rawg_base_url,
            rawg_api_key,
            catalog_cache_ttl_secs,
            google,
            ip,
            port,
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
