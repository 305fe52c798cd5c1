//! Shared application state for all routes.

use crate::config::Config;
use crate::contact::ContactNotifier;
use crate::store::Db;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Arc<Config>,
    /// None when no bot is configured; contact submissions then fail with 500.
    pub notifier: Option<Arc<dyn ContactNotifier>>,
}

impl AppState {
    pub fn new(db: Db, config: Config, notifier: Option<Arc<dyn ContactNotifier>>) -> Self {
        AppState {
            db,
            config: Arc::new(config),
            notifier,
        }
    }
}
