use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    /// `sqlite` or `memory`.
    pub store_backend: String,
    /// `sequential` or `random`.
    pub id_scheme: String,
    pub id_prefix: String,
    /// `strict` or `permissive`.
    pub transition_policy: String,
    pub seed_fixtures: bool,
    pub cors_allow_any: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "fleetbook.db".to_string()),
            store_backend: env::var("STORE_BACKEND").unwrap_or_else(|_| "sqlite".to_string()),
            id_scheme: env::var("ID_SCHEME").unwrap_or_else(|_| "sequential".to_string()),
            id_prefix: env::var("ID_PREFIX").unwrap_or_else(|_| "BK-".to_string()),
            transition_policy: env::var("TRANSITION_POLICY")
                .unwrap_or_else(|_| "strict".to_string()),
            seed_fixtures: env_flag("SEED_FIXTURES"),
            cors_allow_any: env_flag("CORS_ALLOW_ANY"),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: "fleetbook.db".to_string(),
            store_backend: "sqlite".to_string(),
            id_scheme: "sequential".to_string(),
            id_prefix: "BK-".to_string(),
            transition_policy: "strict".to_string(),
            seed_fixtures: false,
            cors_allow_any: false,
        }
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
