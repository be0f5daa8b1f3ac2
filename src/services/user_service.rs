use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use validator::{Validate, ValidationErrors};

use super::{timed, ServiceError};
use crate::auth::{Credentials, TokenPair};
use crate::database::models::{LoginUser, RegisterUser, User};
use crate::database::{DatabaseError, UserRepository};

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub user_id: ObjectId,
    pub tokens: TokenPair,
}

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    credentials: Arc<Credentials>,
    timeout: Duration,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, credentials: Arc<Credentials>, timeout: Duration) -> Self {
        Self {
            repo,
            credentials,
            timeout,
        }
    }

    pub async fn register(&self, input: RegisterUser) -> Result<Registration, ServiceError> {
        input.validate()?;
        let (Some(username), Some(password), Some(email)) = (input.username, input.password, input.email) else {
            return Err(ServiceError::Validation(ValidationErrors::new()));
        };

        // Not atomic with the insert; the unique indexes catch the race.
        if timed(self.timeout, self.repo.count_by_username(&username)).await? > 0 {
            warn!(%username, "Registration rejected: username taken");
            return Err(ServiceError::Conflict(conflict_message("username")));
        }
        if timed(self.timeout, self.repo.count_by_email(&email)).await? > 0 {
            warn!(%username, "Registration rejected: email taken");
            return Err(ServiceError::Conflict(conflict_message("email")));
        }

        let hash = self.hash(password).await?;
        let user = User {
            id: ObjectId::new(),
            username,
            password: hash,
            email,
            created_at: Utc::now(),
            updated_at: None,
        };

        // Sign before inserting so a signing failure leaves nothing stored.
        let tokens = self.credentials.issue_token_pair(&user.id.to_hex())?;

        match timed(self.timeout, self.repo.insert(&user)).await {
            Ok(()) => {}
            Err(DatabaseError::Duplicate(field)) => {
                warn!(username = %user.username, %field, "Registration lost uniqueness race");
                return Err(ServiceError::Conflict(conflict_message(&field)));
            }
            Err(e) => return Err(e.into()),
        }

        info!(user_id = %user.id, username = %user.username, "Registered user");

        Ok(Registration {
            user_id: user.id,
            tokens,
        })
    }

    pub async fn login(&self, input: LoginUser) -> Result<TokenPair, ServiceError> {
        let Some(user) = timed(self.timeout, self.repo.find_by_username(&input.username)).await? else {
            warn!(username = %input.username, "Login failed: unknown user");
            return Err(ServiceError::InvalidCredentials);
        };

        let credentials = self.credentials.clone();
        let hash = user.password.clone();
        let (valid, reason) = tokio::task::spawn_blocking(move || credentials.verify_password(&input.password, &hash))
            .await
            .map_err(|e| ServiceError::Task(e.to_string()))?;

        if !valid {
            warn!(username = %user.username, %reason, "Login failed");
            return Err(ServiceError::InvalidCredentials);
        }

        let tokens = self.credentials.issue_token_pair(&user.id.to_hex())?;
        info!(user_id = %user.id, "User logged in");
        Ok(tokens)
    }

    async fn hash(&self, password: String) -> Result<String, ServiceError> {
        let credentials = self.credentials.clone();
        let hash = tokio::task::spawn_blocking(move || credentials.hash_password(&password))
            .await
            .map_err(|e| ServiceError::Task(e.to_string()))??;
        Ok(hash)
    }
}

fn conflict_message(field: &str) -> String {
    match field {
        "email" => "Email already exists.".to_string(),
        _ => "Username already exists.".to_string(),
    }
}
