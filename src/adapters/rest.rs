use serde::de::DeserializeOwned;

use crate::core::{
    client::{ApiClient, ApiError, Result, SuccessResponse},
    repository::BackupRepo,
};

/// Blocking HTTP client for the GitEcho repository API, wrapped in
/// `spawn_blocking` so the update loop never waits on the wire.
pub struct RestClient {
    base_url: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/v1/repository", self.base_url)
    }

    fn record_url(&self, name: &str) -> String {
        format!("{}/{name}", self.collection_url())
    }
}

#[async_trait::async_trait]
impl ApiClient for RestClient {
    async fn list_repositories(&self) -> Result<Vec<BackupRepo>> {
        let url = self.collection_url();
        run_blocking(move || get_json(&url)).await
    }

    async fn get_repository(&self, name: &str) -> Result<BackupRepo> {
        let url = self.record_url(name);
        run_blocking(move || get_json(&url)).await
    }

    async fn create_repository(&self, repo: &BackupRepo) -> Result<SuccessResponse> {
        let url = self.collection_url();
        let payload = repo.clone();
        run_blocking(move || {
            let resp = ureq::post(&url)
                .send_json(&payload)
                .map_err(|e| ApiError::Network(e.to_string()))?;
            decode_body(resp)
        })
        .await
    }

    async fn delete_repository(&self, name: &str) -> Result<SuccessResponse> {
        let url = self.record_url(name);
        run_blocking(move || {
            let resp = ureq::delete(&url)
                .call()
                .map_err(|e| ApiError::Network(e.to_string()))?;
            decode_body(resp)
        })
        .await
    }
}

async fn run_blocking<T: Send + 'static>(
    op: impl FnOnce() -> Result<T> + Send + 'static,
) -> Result<T> {
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| ApiError::Other(e.to_string()))?
}

fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    let resp = ureq::get(url)
        .call()
        .map_err(|e| ApiError::Network(e.to_string()))?;
    decode_body(resp)
}

fn decode_body<T: DeserializeOwned>(resp: ureq::http::Response<ureq::Body>) -> Result<T> {
    let body = resp
        .into_body()
        .read_to_string()
        .map_err(|e| ApiError::Network(e.to_string()))?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_url_joins_base_and_resource() {
        let client = RestClient::new("http://localhost:8080");
        assert_eq!(
            client.collection_url(),
            "http://localhost:8080/api/v1/repository"
        );
    }

    #[test]
    fn record_url_appends_the_repository_name() {
        let client = RestClient::new("http://localhost:8080");
        assert_eq!(
            client.record_url("repo1"),
            "http://localhost:8080/api/v1/repository/repo1"
        );
    }

    #[test]
    fn trailing_slash_in_base_url_is_dropped() {
        let client = RestClient::new("http://backup.example.com/");
        assert_eq!(
            client.record_url("infra"),
            "http://backup.example.com/api/v1/repository/infra"
        );
    }
}
