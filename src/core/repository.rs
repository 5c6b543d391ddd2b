use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One backup source plus its associated remote storage backends, as the
/// GitEcho API serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRepo {
    pub name: String,
    #[serde(default)]
    pub remote_url: String,
    #[serde(default)]
    pub pull_interval: u64,
    #[serde(default)]
    pub credentials: GitCredentials,
    #[serde(default)]
    pub storage: BTreeMap<String, StorageConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitCredentials {
    #[serde(default)]
    pub git_username: String,
    #[serde(default)]
    pub git_password: String,
    #[serde(default)]
    pub git_key_path: String,
}

/// Connection parameters for one remote storage backend. The map key in
/// `BackupRepo::storage` always equals this struct's `name` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StorageKind,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default)]
    pub bucket_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    S3,
}

impl StorageKind {
    pub const ALL: [StorageKind; 1] = [StorageKind::S3];

    /// Maps a wire-format type identifier to a kind. Unknown identifiers
    /// yield `None`; callers treat that as "no sub-form to build".
    pub fn parse(type_id: &str) -> Option<Self> {
        match type_id {
            "s3" => Some(StorageKind::S3),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            StorageKind::S3 => "s3",
        }
    }
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageKind::S3 => write!(f, "S3"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_kind_parses_known_ids_only() {
        assert_eq!(StorageKind::parse("s3"), Some(StorageKind::S3));
        assert_eq!(StorageKind::parse("gcs"), None);
        assert_eq!(StorageKind::parse(""), None);
        assert_eq!(StorageKind::S3.id(), "s3");
    }

    #[test]
    fn create_payload_matches_wire_format() {
        let mut storage = BTreeMap::new();
        storage.insert(
            "s1".to_string(),
            StorageConfig {
                name: "s1".to_string(),
                kind: StorageKind::S3,
                endpoint: String::new(),
                region: String::new(),
                access_key: String::new(),
                secret_key: String::new(),
                bucket_name: "b1".to_string(),
            },
        );
        let repo = BackupRepo {
            name: "r1".to_string(),
            remote_url: "git@x:y.git".to_string(),
            pull_interval: 30,
            credentials: GitCredentials::default(),
            storage,
        };

        let value = serde_json::to_value(&repo).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "r1",
                "remote_url": "git@x:y.git",
                "pull_interval": 30,
                "credentials": {
                    "git_username": "",
                    "git_password": "",
                    "git_key_path": "",
                },
                "storage": {
                    "s1": {
                        "name": "s1",
                        "type": "s3",
                        "endpoint": "",
                        "region": "",
                        "access_key": "",
                        "secret_key": "",
                        "bucket_name": "b1",
                    },
                },
            })
        );
    }

    #[test]
    fn absent_optional_fields_normalize_to_empty() {
        let repo: BackupRepo = serde_json::from_str(
            r#"{"name":"r1","pull_interval":60,"storage":{"a":{"name":"a","type":"s3","bucket_name":"b"}}}"#,
        )
        .unwrap();

        assert_eq!(repo.remote_url, "");
        assert_eq!(repo.credentials, GitCredentials::default());
        let config = &repo.storage["a"];
        assert_eq!(config.endpoint, "");
        assert_eq!(config.region, "");
        assert_eq!(config.access_key, "");
        assert_eq!(config.secret_key, "");
        assert_eq!(config.bucket_name, "b");
    }
}
