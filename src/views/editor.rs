use iced::{
    Alignment, Element, Length,
    widget::{button, column, container, pick_list, row, scrollable, space, text, text_input},
};

use crate::{
    app::message::{EditorMessage, Message},
    core::{
        form::{RepoField, RepoForm, StorageField, StorageForm},
        repository::{BackupRepo, StorageKind},
    },
    styles::{self, font_size, spacing},
};

/// Editor state. `source_name` is the name of the server-side record the
/// form was populated from; it is the delete target and stays fixed even
/// if the user edits the name field. `None` means the form is Empty.
#[derive(Debug)]
pub struct EditorState {
    pub form: RepoForm,
    pub source_name: Option<String>,
    pub selected_kind: StorageKind,
    pub submitting: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            form: RepoForm::default(),
            source_name: None,
            selected_kind: StorageKind::S3,
            submitting: false,
            error: None,
            notice: None,
        }
    }
}

impl EditorState {
    pub fn load(&mut self, repo: &BackupRepo) {
        self.form.populate(repo);
        self.source_name = Some(repo.name.clone());
        self.submitting = false;
        self.error = None;
        self.notice = None;
    }

    pub fn reset(&mut self) {
        self.form.reset();
        self.source_name = None;
        self.submitting = false;
        self.error = None;
        self.notice = None;
    }
}

pub fn view(state: &EditorState) -> Element<'_, Message> {
    let title = match state.source_name {
        Some(ref name) => format!("Edit {name}"),
        None => "New Backup Repository".to_string(),
    };
    let header = text(title).size(font_size::TITLE);

    let repo_section = container(
        column![
            text("Repository").size(font_size::HEADING),
            field_row("Name", "my-repo", &state.form.name, RepoField::Name, false),
            field_row(
                "Remote URL",
                "git@example.com:repo.git",
                &state.form.remote_url,
                RepoField::RemoteUrl,
                false,
            ),
            field_row(
                "Pull interval (s)",
                "300",
                &state.form.pull_interval,
                RepoField::PullInterval,
                false,
            ),
        ]
        .spacing(spacing::SM),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(styles::card);

    let credentials_section = container(
        column![
            text("Git Credentials").size(font_size::HEADING),
            field_row(
                "Username",
                "",
                &state.form.git_username,
                RepoField::GitUsername,
                false,
            ),
            field_row(
                "Password",
                "",
                &state.form.git_password,
                RepoField::GitPassword,
                true,
            ),
            field_row(
                "SSH key path",
                "~/.ssh/id_ed25519",
                &state.form.git_key_path,
                RepoField::GitKeyPath,
                false,
            ),
        ]
        .spacing(spacing::SM),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(styles::card);

    let add_row = row![
        text("Remote Storage").size(font_size::HEADING),
        space().width(Length::Fill),
        pick_list(&StorageKind::ALL[..], Some(state.selected_kind), |kind| {
            Message::Editor(EditorMessage::StorageKindSelected(kind))
        })
        .width(100),
        button(text("Add Storage").size(font_size::SMALL))
            .padding([spacing::XS, 14.0])
            .style(button::secondary)
            .on_press(Message::Editor(EditorMessage::AddStorage)),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center);

    let mut storage_section = column![add_row].spacing(spacing::SM);
    if state.form.storages.is_empty() {
        storage_section = storage_section.push(
            text("No storage backends configured").size(font_size::CAPTION + 1.0),
        );
    }
    for form in state.form.storages.forms() {
        storage_section = storage_section.push(storage_card(form));
    }

    let submit_label = match (state.submitting, state.source_name.is_some()) {
        (true, _) => "Saving...",
        (false, true) => "Save Changes",
        (false, false) => "Create Repository",
    };
    let mut submit_btn = button(text(submit_label).size(font_size::SMALL))
        .padding([spacing::XS, 14.0])
        .style(button::primary);
    if !state.submitting {
        submit_btn = submit_btn.on_press(Message::Editor(EditorMessage::Submit));
    }

    let mut footer = row![submit_btn]
        .spacing(spacing::SM)
        .align_y(Alignment::Center);

    if state.source_name.is_some() {
        let mut delete_btn = button(text("Delete Repository").size(font_size::SMALL))
            .padding([spacing::XS, 14.0])
            .style(button::danger);
        if !state.submitting {
            delete_btn = delete_btn.on_press(Message::Editor(EditorMessage::Delete));
        }
        footer = footer.push(space().width(Length::Fill)).push(delete_btn);
    }

    let mut main_col = column![header, repo_section, credentials_section, storage_section]
        .spacing(spacing::MD)
        .width(Length::Fill);

    if let Some(ref err) = state.error {
        main_col = main_col.push(
            container(text(err.clone()).size(font_size::CAPTION + 1.0))
                .padding([spacing::XS, spacing::MD])
                .width(Length::Fill)
                .style(styles::error_banner),
        );
    }
    if let Some(ref notice) = state.notice {
        main_col = main_col.push(
            container(text(notice.clone()).size(font_size::CAPTION + 1.0))
                .padding([spacing::XS, spacing::MD])
                .width(Length::Fill)
                .style(styles::success_banner),
        );
    }

    main_col = main_col.push(footer);

    container(scrollable(main_col).height(Length::Fill))
        .padding(spacing::XL)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn storage_card(form: &StorageForm) -> Element<'static, Message> {
    let id = form.id();

    let kind_badge = container(text(form.kind.to_string()).size(font_size::BADGE))
        .padding([spacing::XXXS, spacing::XS])
        .style(styles::badge_primary);

    let header = row![
        kind_badge,
        text(if form.name.is_empty() {
            "unnamed".to_string()
        } else {
            form.name.clone()
        })
        .size(font_size::BODY),
        space().width(Length::Fill),
        button(text("Remove").size(font_size::CAPTION + 1.0))
            .padding([spacing::XXS, 10.0])
            .style(styles::pill_button_danger)
            .on_press(Message::Editor(EditorMessage::RemoveStorage(id))),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center);

    container(
        column![
            header,
            storage_field_row(id, "Name", &form.name, StorageField::Name, false),
            storage_field_row(id, "Endpoint", &form.endpoint, StorageField::Endpoint, false),
            storage_field_row(id, "Region", &form.region, StorageField::Region, false),
            storage_field_row(
                id,
                "Access key",
                &form.access_key,
                StorageField::AccessKey,
                false,
            ),
            storage_field_row(
                id,
                "Secret key",
                &form.secret_key,
                StorageField::SecretKey,
                true,
            ),
            storage_field_row(
                id,
                "Bucket name",
                &form.bucket_name,
                StorageField::BucketName,
                false,
            ),
        ]
        .spacing(spacing::XS),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(styles::card)
    .into()
}

fn field_row(
    label: &'static str,
    placeholder: &str,
    value: &str,
    field: RepoField,
    secure: bool,
) -> Element<'static, Message> {
    let input = text_input(placeholder, value)
        .on_input(move |v| Message::Editor(EditorMessage::FieldChanged(field, v)))
        .secure(secure)
        .width(280);
    row![text(label).size(font_size::BODY).width(Length::Fill), input]
        .align_y(Alignment::Center)
        .into()
}

fn storage_field_row(
    id: u64,
    label: &'static str,
    value: &str,
    field: StorageField,
    secure: bool,
) -> Element<'static, Message> {
    let input = text_input("", value)
        .on_input(move |v| Message::Editor(EditorMessage::StorageFieldChanged(id, field, v)))
        .secure(secure)
        .width(280);
    row![text(label).size(font_size::BODY).width(Length::Fill), input]
        .align_y(Alignment::Center)
        .into()
}
