use serde::Deserialize;

use crate::core::repository::BackupRepo;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// The body the API returns for successful mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct SuccessResponse {
    pub message: String,
}

/// The collaborator API consumed as a black box. One method per endpoint
/// of the repository resource; every call is fire-once, no retries.
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    async fn list_repositories(&self) -> Result<Vec<BackupRepo>>;

    async fn get_repository(&self, name: &str) -> Result<BackupRepo>;

    async fn create_repository(&self, repo: &BackupRepo) -> Result<SuccessResponse>;

    async fn delete_repository(&self, name: &str) -> Result<SuccessResponse>;
}
