//! Shared application state handed to every handler and to the session gate.

use crate::auth::session::SessionCookies;
use crate::config::Config;
use crate::database::Database;
use crate::utils::jwt::JwtUtils;

/// Read-only after startup; shared behind an `Arc`.
pub struct AppState {
    pub db: Database,
    pub jwt: JwtUtils,
    pub cookies: SessionCookies,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        AppState {
            db: Database::new(config),
            jwt: JwtUtils::from_config(config),
            cookies: SessionCookies::from_config(config),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}
