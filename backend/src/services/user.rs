//! User accounts and authentication

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::Claims;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    user_id: i32,
    username: String,
    password_hash: String,
    role: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub user_id: i32,
    pub username: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,

    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,

    /// Generated when absent.
    pub password: Option<String>,
}

/// A freshly created account with its one-time generated password.
#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub user_id: i32,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordInput {
    pub current_password: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

impl UserService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Verify credentials and issue a JWT.
    pub async fn login(&self, input: LoginInput, jwt: &JwtConfig) -> AppResult<LoginResponse> {
        let user = sqlx::query_as::<_, UserRow>(
            "SELECT user_id, username, password_hash, role FROM users WHERE username = $1",
        )
        .bind(&input.username)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let valid = bcrypt::verify(&input.password, &user.password_hash)
            .map_err(|_| AppError::InvalidCredentials)?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.user_id.to_string(),
            username: user.username.clone(),
            role: user.role.clone(),
            iat: now,
            exp: now + jwt.access_token_expiry,
        };

        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalError(e.into()))?;

        tracing::info!(user_id = user.user_id, username = %user.username, "user logged in");

        Ok(LoginResponse {
            token,
            user: UserInfo {
                user_id: user.user_id,
                username: user.username,
                role: user.role,
            },
        })
    }

    /// Create an account with a generated password the admin hands over
    /// out of band. The password is returned exactly once.
    pub async fn create_user(&self, input: CreateUserInput) -> AppResult<CreatedUser> {
        input.validate()?;

        let password = match input.password {
            Some(ref password) if password.len() >= 8 => password.clone(),
            Some(_) => {
                return Err(AppError::validation(
                    "password",
                    "Password must be at least 8 characters",
                ));
            }
            None => generate_password(),
        };
        let password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::InternalError(e.into()))?;

        let user_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING user_id
            "#,
        )
        .bind(&input.username)
        .bind(&password_hash)
        .bind(&input.role)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(user_id, username = %input.username, role = %input.role, "user created");

        Ok(CreatedUser {
            user_id,
            username: input.username,
            password,
        })
    }

    /// Let a user change their own password.
    pub async fn update_password(&self, user_id: i32, input: UpdatePasswordInput) -> AppResult<()> {
        input.validate()?;

        let current_hash = sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM users WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        let valid = bcrypt::verify(&input.current_password, &current_hash)
            .map_err(|_| AppError::InvalidCredentials)?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let new_hash = bcrypt::hash(&input.new_password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::InternalError(e.into()))?;

        sqlx::query("UPDATE users SET password_hash = $1 WHERE user_id = $2")
            .bind(&new_hash)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}

fn generate_password() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}
