//! Shared application state for all routes.

use crate::config::AppConfig;
use crate::list::ListSync;
use crate::ratelimit::RateLimiter;
use crate::store::ContactStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContactStore>,
    pub config: Arc<AppConfig>,
    /// Present only when the list API key is configured. Its absence is a hard
    /// failure at submission time, after the insert.
    pub list: Option<Arc<dyn ListSync>>,
    pub limiter: Arc<RateLimiter>,
}
