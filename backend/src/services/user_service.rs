//! User business logic service.
//!
//! Handles registration, password checks and the user directories.

use crate::database::models::{CreateUser, Role, User, UserSummary};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use bcrypt::{hash, verify};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Message returned for both an unknown email and a wrong password.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Input for creating a user; the password is still in plain text.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
    bcrypt_cost: u32,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    /// * `bcrypt_cost` - Work factor for new password hashes
    pub fn new(pool: &'a SqlitePool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    /// Creates a new user.
    ///
    /// # Arguments
    /// * `new_user` - Registration data with an already normalised email
    ///
    /// # Returns
    /// The newly created User with all fields populated
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - An email that is already registered
    /// - Password hashing failures
    pub async fn create_user(&self, new_user: NewUser) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);

        if repo.get_user_by_email(&new_user.email).await?.is_some() {
            return Err(ServiceError::already_exists("User", &new_user.email));
        }

        let password_hash = self.hash_password(&new_user.password)?;

        let data = CreateUser {
            id: Uuid::now_v7().to_string(),
            name: new_user.name.trim().to_string(),
            email: new_user.email.clone(),
            password_hash,
            role: new_user.role,
        };

        // A concurrent registration can win the race past the check above.
        let user = repo.create_user(data).await.map_err(|error| {
            if is_unique_violation(&error) {
                ServiceError::already_exists("User", &new_user.email)
            } else {
                ServiceError::from(error)
            }
        })?;
        tracing::info!("Registered {} {}", user.role, user.id);
        Ok(user)
    }

    /// Checks an email/password pair.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` with the same message whether the
    /// email is unknown or the password is wrong.
    pub async fn authenticate_user(&self, email: &str, password: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);

        let user = repo
            .get_user_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::validation(INVALID_CREDENTIALS))?;

        if !Self::verify_password(password, &user.password_hash)? {
            tracing::debug!("Password mismatch for user {}", user.id);
            return Err(ServiceError::validation(INVALID_CREDENTIALS));
        }

        Ok(user)
    }

    /// Function to hash a password before storing in database
    fn hash_password(&self, password: &str) -> ServiceResult<String> {
        hash(password, self.bcrypt_cost)
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }

    /// Function to verify a password against the stored hash
    ///
    /// # Returns
    /// `true` if password matches hash, `false` otherwise
    fn verify_password(password: &str, hash: &str) -> ServiceResult<bool> {
        verify(password, hash).map_err(|e| {
            ServiceError::internal_error(format!("Password verification failed: {}", e))
        })
    }

    /// Retrieves a user by ID with existence verification.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if user doesn't exist
    pub async fn get_user_required(&self, id: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;
        Ok(user)
    }

    /// Directory of every user holding `role`, ordered by name.
    pub async fn list_by_role(&self, role: Role) -> ServiceResult<Vec<UserSummary>> {
        let repo = UserRepository::new(self.pool);
        Ok(repo.list_users_by_role(role).await?)
    }
}

fn is_unique_violation(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(db_error)) if db_error.is_unique_violation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::memory_database;

    fn new_user(name: &str, email: &str, role: Role) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: "correct horse".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let db = memory_database().await;
        let pool = db.pool().await.unwrap();
        let service = UserService::new(pool, 4);

        let user = service
            .create_user(new_user(" Ada ", "ada@example.com", Role::Student))
            .await
            .unwrap();

        assert_eq!(user.name, "Ada");
        assert_eq!(user.role, Role::Student);
        assert_ne!(user.password_hash, "correct horse");
        assert!(user.password_hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = memory_database().await;
        let pool = db.pool().await.unwrap();
        let service = UserService::new(pool, 4);

        service
            .create_user(new_user("Ada", "ada@example.com", Role::Student))
            .await
            .unwrap();
        let result = service
            .create_user(new_user("Other Ada", "ada@example.com", Role::Teacher))
            .await;

        assert!(matches!(result, Err(ServiceError::AlreadyExists { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_email_is_conflict() {
        let db = memory_database().await;
        let pool = db.pool().await.unwrap();
        let service = UserService::new(pool, 4);

        let results = futures::future::join_all(
            (0..4).map(|_| service.create_user(new_user("Ada", "ada@example.com", Role::Student))),
        )
        .await;

        let created = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(created, 1);
        for result in results.into_iter().filter(|r| r.is_err()) {
            assert!(matches!(result, Err(ServiceError::AlreadyExists { .. })));
        }
    }

    #[tokio::test]
    async fn test_authenticate_user() {
        let db = memory_database().await;
        let pool = db.pool().await.unwrap();
        let service = UserService::new(pool, 4);

        let created = service
            .create_user(new_user("Grace", "grace@example.com", Role::Teacher))
            .await
            .unwrap();

        let user = service
            .authenticate_user("grace@example.com", "correct horse")
            .await
            .unwrap();
        assert_eq!(user.id, created.id);

        for (email, password) in [
            ("grace@example.com", "wrong"),
            ("nobody@example.com", "correct horse"),
        ] {
            match service.authenticate_user(email, password).await {
                Err(ServiceError::Validation { message }) => {
                    assert_eq!(message, INVALID_CREDENTIALS)
                }
                other => panic!("Expected invalid credentials, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_list_by_role() {
        let db = memory_database().await;
        let pool = db.pool().await.unwrap();
        let service = UserService::new(pool, 4);

        service
            .create_user(new_user("Zed", "zed@example.com", Role::Teacher))
            .await
            .unwrap();
        service
            .create_user(new_user("Amy", "amy@example.com", Role::Teacher))
            .await
            .unwrap();
        service
            .create_user(new_user("Bo", "bo@example.com", Role::Student))
            .await
            .unwrap();

        let teachers = service.list_by_role(Role::Teacher).await.unwrap();
        let names: Vec<&str> = teachers.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Zed"]);

        let students = service.list_by_role(Role::Student).await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].email, "bo@example.com");
    }

    #[tokio::test]
    async fn test_get_user_required_missing() {
        let db = memory_database().await;
        let pool = db.pool().await.unwrap();
        let service = UserService::new(pool, 4);

        assert!(matches!(
            service.get_user_required("missing").await,
            Err(ServiceError::NotFound { .. })
        ));
    }
}
