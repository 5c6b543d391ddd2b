use crate::core::{
    form::{RepoField, StorageField},
    repository::{BackupRepo, StorageKind},
};

use super::{AppTheme, View};

#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteRepository(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    NavigateTo(View),
    ThemeChanged(AppTheme),

    Repositories(RepositoriesMessage),
    Editor(EditorMessage),

    ConfirmAction,
    CancelAction,
}

#[derive(Debug, Clone)]
pub enum RepositoriesMessage {
    Refresh,
    Loaded(Result<Vec<BackupRepo>, String>),
    Select(String),
}

#[derive(Debug, Clone)]
pub enum EditorMessage {
    NewRepository,
    RecordLoaded(Result<BackupRepo, String>),

    FieldChanged(RepoField, String),
    StorageKindSelected(StorageKind),
    AddStorage,
    RemoveStorage(u64),
    StorageFieldChanged(u64, StorageField, String),

    Submit,
    SubmitComplete(Result<String, String>),
    Delete,
    DeleteComplete(Result<String, String>),
}
