pub mod product_service;
pub mod user_service;

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use validator::ValidationErrors;

use crate::auth::CredentialError;
use crate::database::DatabaseError;

pub use product_service::ProductService;
pub use user_service::{Registration, UserService};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation Error")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("Username or password are incorrect")]
    InvalidCredentials,

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error("Background task failed: {0}")]
    Task(String),
}

/// Run a repository call under the configured operation timeout.
pub(crate) async fn timed<T, F>(limit: Duration, operation: F) -> Result<T, DatabaseError>
where
    F: Future<Output = Result<T, DatabaseError>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(DatabaseError::Timeout(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slow_operations_time_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, DatabaseError>(())
        };
        let err = timed(Duration::from_millis(10), slow).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Timeout(_)));

        let fast = async { Ok::<_, DatabaseError>(7) };
        assert_eq!(timed(Duration::from_secs(1), fast).await.unwrap(), 7);
    }
}
