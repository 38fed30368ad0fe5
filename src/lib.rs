//! Contact submission service: validate and sanitize a contact-form POST,
//! persist it to PostgreSQL, and upsert the contact into a marketing list.

pub mod config;
pub mod error;
pub mod handlers;
pub mod list;
pub mod ratelimit;
pub mod routes;
pub mod state;
pub mod store;
pub mod validate;

pub use config::AppConfig;
pub use error::{AppError, FieldError};
pub use list::{HttpListClient, ListError, ListSync};
pub use ratelimit::RateLimiter;
pub use routes::router;
pub use state::AppState;
pub use store::{ensure_contacts_table, ContactStore};
pub use validate::{validate_contact, ValidContact};
