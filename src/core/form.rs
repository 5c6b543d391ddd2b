use std::collections::BTreeMap;

use crate::core::repository::{BackupRepo, GitCredentials, StorageConfig, StorageKind};

/// Structured rejection raised when form state cannot be turned into a
/// valid API payload. Rendering these is the editor view's job; nothing
/// here touches presentation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("pull interval must be a positive number of seconds")]
    InvalidPullInterval,
    #[error("duplicate storage name: {0:?}")]
    DuplicateStorageName(String),
}

/// Identifies one top-level input of the repository form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoField {
    Name,
    RemoteUrl,
    PullInterval,
    GitUsername,
    GitPassword,
    GitKeyPath,
}

/// Identifies one input of a storage sub-form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageField {
    Name,
    Endpoint,
    Region,
    AccessKey,
    SecretKey,
    BucketName,
}

/// One storage sub-form. The `id` is assigned at creation and never
/// changes; it identifies the sub-form across edits even when the
/// user-editable name field is renamed or collides with a sibling's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageForm {
    id: u64,
    pub kind: StorageKind,
    pub name: String,
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket_name: String,
}

impl StorageForm {
    fn blank(id: u64, kind: StorageKind) -> Self {
        Self {
            id,
            kind,
            name: String::new(),
            endpoint: String::new(),
            region: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            bucket_name: String::new(),
        }
    }

    fn from_config(id: u64, config: &StorageConfig) -> Self {
        Self {
            id,
            kind: config.kind,
            name: config.name.clone(),
            endpoint: config.endpoint.clone(),
            region: config.region.clone(),
            access_key: config.access_key.clone(),
            secret_key: config.secret_key.clone(),
            bucket_name: config.bucket_name.clone(),
        }
    }

    fn to_config(&self) -> StorageConfig {
        StorageConfig {
            name: self.name.clone(),
            kind: self.kind,
            endpoint: self.endpoint.clone(),
            region: self.region.clone(),
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
            bucket_name: self.bucket_name.clone(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn set_field(&mut self, field: StorageField, value: String) {
        match field {
            StorageField::Name => self.name = value,
            StorageField::Endpoint => self.endpoint = value,
            StorageField::Region => self.region = value,
            StorageField::AccessKey => self.access_key = value,
            StorageField::SecretKey => self.secret_key = value,
            StorageField::BucketName => self.bucket_name = value,
        }
    }
}

/// The dynamic, variable-cardinality set of storage sub-forms the user is
/// editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageFormSet {
    forms: Vec<StorageForm>,
    next_id: u64,
}

impl StorageFormSet {
    /// Appends one empty sub-form for the given storage type identifier
    /// and returns its stable id. Unrecognized types append nothing.
    pub fn add_blank(&mut self, type_id: &str) -> Option<u64> {
        let kind = StorageKind::parse(type_id)?;
        let id = self.next_id;
        self.next_id += 1;
        self.forms.push(StorageForm::blank(id, kind));
        Some(id)
    }

    /// Replaces all sub-forms with one pre-filled form per entry in the
    /// incoming mapping.
    pub fn populate(&mut self, storage: &BTreeMap<String, StorageConfig>) {
        self.forms.clear();
        for config in storage.values() {
            let id = self.next_id;
            self.next_id += 1;
            self.forms.push(StorageForm::from_config(id, config));
        }
    }

    /// Produces the storage mapping keyed by each sub-form's *current*
    /// name field. Renaming a sub-form re-keys it here; two sub-forms
    /// sharing a name is an error rather than a silent overwrite.
    pub fn serialize(&self) -> Result<BTreeMap<String, StorageConfig>, FormError> {
        let mut storage = BTreeMap::new();
        for form in &self.forms {
            if form.name.is_empty() {
                return Err(FormError::MissingField("storage name"));
            }
            if form.bucket_name.is_empty() {
                return Err(FormError::MissingField("bucket name"));
            }
            if storage.insert(form.name.clone(), form.to_config()).is_some() {
                return Err(FormError::DuplicateStorageName(form.name.clone()));
            }
        }
        Ok(storage)
    }

    pub fn remove(&mut self, id: u64) {
        self.forms.retain(|form| form.id != id);
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut StorageForm> {
        self.forms.iter_mut().find(|form| form.id == id)
    }

    pub fn forms(&self) -> &[StorageForm] {
        &self.forms
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

/// The single active repository record being viewed or edited, held as
/// plain strings exactly as the inputs show them. Pure value type: the
/// update loop mutates it through `set_field`, the editor view only reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoForm {
    pub name: String,
    pub remote_url: String,
    pub pull_interval: String,
    pub git_username: String,
    pub git_password: String,
    pub git_key_path: String,
    pub storages: StorageFormSet,
}

impl RepoForm {
    /// Copies every field of the record into the form, delegating the
    /// storage mapping to the sub-form set.
    pub fn populate(&mut self, repo: &BackupRepo) {
        self.name = repo.name.clone();
        self.remote_url = repo.remote_url.clone();
        self.pull_interval = repo.pull_interval.to_string();
        self.git_username = repo.credentials.git_username.clone();
        self.git_password = repo.credentials.git_password.clone();
        self.git_key_path = repo.credentials.git_key_path.clone();
        self.storages.populate(&repo.storage);
    }

    /// Assembles the API payload from current form state.
    pub fn serialize(&self) -> Result<BackupRepo, FormError> {
        if self.name.is_empty() {
            return Err(FormError::MissingField("name"));
        }
        let pull_interval = self
            .pull_interval
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|interval| *interval > 0)
            .ok_or(FormError::InvalidPullInterval)?;

        Ok(BackupRepo {
            name: self.name.clone(),
            remote_url: self.remote_url.clone(),
            pull_interval,
            credentials: GitCredentials {
                git_username: self.git_username.clone(),
                git_password: self.git_password.clone(),
                git_key_path: self.git_key_path.clone(),
            },
            storage: self.storages.serialize()?,
        })
    }

    pub fn set_field(&mut self, field: RepoField, value: String) {
        match field {
            RepoField::Name => self.name = value,
            RepoField::RemoteUrl => self.remote_url = value,
            RepoField::PullInterval => self.pull_interval = value,
            RepoField::GitUsername => self.git_username = value,
            RepoField::GitPassword => self.git_password = value,
            RepoField::GitKeyPath => self.git_key_path = value,
        }
    }

    pub fn reset(&mut self) {
        *self = Self {
            storages: StorageFormSet {
                next_id: self.storages.next_id,
                ..Default::default()
            },
            ..Default::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_repo() -> BackupRepo {
        let mut storage = BTreeMap::new();
        storage.insert(
            "primary".to_string(),
            StorageConfig {
                name: "primary".to_string(),
                kind: StorageKind::S3,
                endpoint: "https://s3.example.com".to_string(),
                region: "eu-central-1".to_string(),
                access_key: "AKIA123".to_string(),
                secret_key: "shhh".to_string(),
                bucket_name: "backups".to_string(),
            },
        );
        storage.insert(
            "offsite".to_string(),
            StorageConfig {
                name: "offsite".to_string(),
                kind: StorageKind::S3,
                endpoint: String::new(),
                region: String::new(),
                access_key: String::new(),
                secret_key: String::new(),
                bucket_name: "cold".to_string(),
            },
        );
        BackupRepo {
            name: "infra".to_string(),
            remote_url: "git@example.com:infra.git".to_string(),
            pull_interval: 300,
            credentials: GitCredentials {
                git_username: "bot".to_string(),
                git_password: String::new(),
                git_key_path: "/home/bot/.ssh/id_ed25519".to_string(),
            },
            storage,
        }
    }

    #[test]
    fn populate_then_serialize_round_trips() {
        let repo = sample_repo();
        let mut form = RepoForm::default();
        form.populate(&repo);
        assert_eq!(form.serialize().unwrap(), repo);
    }

    #[test]
    fn add_blank_creates_independent_sub_forms() {
        let mut set = StorageFormSet::default();
        let first = set.add_blank("s3").unwrap();
        let second = set.add_blank("s3").unwrap();
        assert_ne!(first, second);
        assert_eq!(set.forms().len(), 2);
        for form in set.forms() {
            assert_eq!(form.kind, StorageKind::S3);
            assert!(form.name.is_empty());
            assert!(form.bucket_name.is_empty());
        }

        set.get_mut(first)
            .unwrap()
            .set_field(StorageField::Name, "a".to_string());
        assert!(set.forms()[1].name.is_empty());
    }

    #[test]
    fn add_blank_ignores_unknown_types() {
        let mut set = StorageFormSet::default();
        set.add_blank("s3").unwrap();
        assert_eq!(set.add_blank("unknown-type"), None);
        assert_eq!(set.forms().len(), 1);
    }

    #[test]
    fn serialize_keys_follow_the_current_name_field() {
        let mut set = StorageFormSet::default();
        let mut seed = BTreeMap::new();
        seed.insert(
            "a".to_string(),
            StorageConfig {
                name: "a".to_string(),
                kind: StorageKind::S3,
                endpoint: String::new(),
                region: String::new(),
                access_key: String::new(),
                secret_key: String::new(),
                bucket_name: "bucket".to_string(),
            },
        );
        set.populate(&seed);

        let id = set.forms()[0].id();
        set.get_mut(id)
            .unwrap()
            .set_field(StorageField::Name, "b".to_string());

        let storage = set.serialize().unwrap();
        assert!(storage.contains_key("b"));
        assert!(!storage.contains_key("a"));
        assert_eq!(storage["b"].name, "b");
    }

    #[test]
    fn duplicate_storage_names_are_rejected() {
        let mut set = StorageFormSet::default();
        for _ in 0..2 {
            let id = set.add_blank("s3").unwrap();
            let form = set.get_mut(id).unwrap();
            form.set_field(StorageField::Name, "same".to_string());
            form.set_field(StorageField::BucketName, "bucket".to_string());
        }
        assert_eq!(
            set.serialize(),
            Err(FormError::DuplicateStorageName("same".to_string()))
        );
    }

    #[test]
    fn empty_required_storage_fields_are_rejected() {
        let mut set = StorageFormSet::default();
        set.add_blank("s3").unwrap();
        assert_eq!(
            set.serialize(),
            Err(FormError::MissingField("storage name"))
        );

        let id = set.forms()[0].id();
        set.get_mut(id)
            .unwrap()
            .set_field(StorageField::Name, "s1".to_string());
        assert_eq!(set.serialize(), Err(FormError::MissingField("bucket name")));
    }

    #[test]
    fn pull_interval_must_be_a_positive_integer() {
        let mut form = RepoForm {
            name: "r1".to_string(),
            ..Default::default()
        };

        form.pull_interval = "soon".to_string();
        assert_eq!(form.serialize(), Err(FormError::InvalidPullInterval));

        form.pull_interval = "0".to_string();
        assert_eq!(form.serialize(), Err(FormError::InvalidPullInterval));

        form.pull_interval = " 30 ".to_string();
        assert_eq!(form.serialize().unwrap().pull_interval, 30);
    }

    #[test]
    fn repo_name_is_required() {
        let form = RepoForm {
            pull_interval: "30".to_string(),
            ..Default::default()
        };
        assert_eq!(form.serialize(), Err(FormError::MissingField("name")));
    }

    #[test]
    fn sub_form_ids_survive_sibling_removal() {
        let mut set = StorageFormSet::default();
        let first = set.add_blank("s3").unwrap();
        let second = set.add_blank("s3").unwrap();
        set.remove(first);
        assert_eq!(set.forms().len(), 1);
        assert_eq!(set.forms()[0].id(), second);

        // New ids never reuse a removed one.
        let third = set.add_blank("s3").unwrap();
        assert_ne!(third, first);
        assert_ne!(third, second);
    }

    #[test]
    fn populate_clears_previous_sub_forms() {
        let mut set = StorageFormSet::default();
        set.add_blank("s3").unwrap();
        set.add_blank("s3").unwrap();

        let repo = sample_repo();
        set.populate(&repo.storage);
        assert_eq!(set.forms().len(), 2);
        let names: Vec<&str> = set.forms().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["offsite", "primary"]);
    }
}
