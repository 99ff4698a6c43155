//! Core business logic for the authentication system.
//!
//! Registration and login both end in a freshly minted session credential;
//! the handlers hand that credential to the session cookie layer.

use crate::auth::models::*;
use crate::database::models::User;
use crate::errors::ServiceResult;
use crate::services::user_service::{NewUser, UserService};
use crate::utils::jwt::{Identity, JwtUtils};
use sqlx::SqlitePool;
use validator::Validate;

/// Authentication service for handling registration, login and token generation
pub struct AuthService<'a> {
    jwt_utils: &'a JwtUtils,
    user_service: UserService<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(pool: &'a SqlitePool, jwt_utils: &'a JwtUtils, bcrypt_cost: u32) -> Self {
        AuthService {
            jwt_utils,
            user_service: UserService::new(pool, bcrypt_cost),
        }
    }

    /// Create an account and sign the new user in.
    pub async fn register(&self, mut request: RegisterRequest) -> ServiceResult<AuthenticatedUser> {
        request.name = request.name.trim().to_string();
        request.email = normalize_email(&request.email);
        request.validate()?;

        let user = self
            .user_service
            .create_user(NewUser {
                name: request.name,
                email: request.email,
                password: request.password,
                role: request.role,
            })
            .await?;

        self.sign_in(user)
    }

    /// Authenticate user and generate a session credential
    pub async fn login(&self, mut request: LoginRequest) -> ServiceResult<AuthenticatedUser> {
        request.email = normalize_email(&request.email);
        request.validate()?;

        let user = self
            .user_service
            .authenticate_user(&request.email, &request.password)
            .await?;

        tracing::info!("User {} logged in", user.id);
        self.sign_in(user)
    }

    fn sign_in(&self, user: User) -> ServiceResult<AuthenticatedUser> {
        let token = self.jwt_utils.generate_token(
            Identity {
                subject_id: &user.id,
                name: &user.name,
                email: &user.email,
            },
            user.role,
        )?;

        Ok(AuthenticatedUser {
            user: UserInfo::from(user),
            token,
        })
    }
}
