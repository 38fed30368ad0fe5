//! Environment-sourced configuration, loaded once at startup.

use std::env;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_LIST_API_URL: &str = "https://api.brevo.com/v3/contacts";
pub const DEFAULT_LIST_ID: i64 = 7;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen port, from `PORT`.
    pub port: u16,
    /// The single origin allowed by CORS, from `FRONTEND_URL`.
    pub frontend_url: String,
    /// From `DATABASE_URL`, or composed from `DB_HOST`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`.
    pub database_url: String,
    /// Contacts endpoint of the list API, from `LIST_API_URL`.
    pub list_api_url: String,
    /// From `LIST_API_KEY`. Optional at startup; submissions fail without it.
    pub list_api_key: Option<String>,
    /// Target list, from `LIST_ID`.
    pub list_id: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string());
        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            compose_database_url(
                &env::var("DB_HOST").unwrap_or_else(|_| "localhost".into()),
                &env::var("DB_USER").unwrap_or_else(|_| "postgres".into()),
                &env::var("DB_PASSWORD").unwrap_or_default(),
                &env::var("DB_NAME").unwrap_or_else(|_| "contacts".into()),
            )
        });
        let list_api_url =
            env::var("LIST_API_URL").unwrap_or_else(|_| DEFAULT_LIST_API_URL.to_string());
        let list_api_key = env::var("LIST_API_KEY").ok().filter(|k| !k.is_empty());
        let list_id = env::var("LIST_ID")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_LIST_ID);

        tracing::info!(
            port,
            frontend_url = %frontend_url,
            list_id,
            list_api_key = if list_api_key.is_some() { "set" } else { "missing" },
            "configuration loaded"
        );

        Self {
            port,
            frontend_url,
            database_url,
            list_api_url,
            list_api_key,
            list_id,
        }
    }
}

fn compose_database_url(host: &str, user: &str, password: &str, name: &str) -> String {
    if password.is_empty() {
        format!("postgres://{user}@{host}/{name}")
    } else {
        format!("postgres://{user}:{password}@{host}/{name}")
    }
}
