pub mod message;

use std::sync::Arc;

use iced::{
    Color, Element, Length, Task,
    widget::{
        button, center, column, container, mouse_area, opaque, pick_list, row, rule, space, stack,
        text,
    },
};

use crate::{
    adapters::RestClient,
    config::DeskConfig,
    core::client::ApiClient,
    theme, views,
};

pub use message::Message;

use message::{ConfirmAction, EditorMessage, RepositoriesMessage};

pub const APP_NAME: &str = "GitEcho Desk";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppTheme {
    #[default]
    System,
    Light,
    Dark,
}

impl AppTheme {
    pub const ALL: [AppTheme; 3] = [AppTheme::System, AppTheme::Light, AppTheme::Dark];
}

impl std::fmt::Display for AppTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppTheme::System => write!(f, "System"),
            AppTheme::Light => write!(f, "Light"),
            AppTheme::Dark => write!(f, "Dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Repositories,
    Editor,
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            View::Repositories => write!(f, "Repositories"),
            View::Editor => write!(f, "Editor"),
        }
    }
}

pub struct App {
    selected_theme: AppTheme,
    current_view: View,
    repositories: views::repositories::RepositoriesState,
    editor: views::editor::EditorState,
    client: Arc<RestClient>,
    confirm_dialog: Option<ConfirmAction>,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let config = DeskConfig::load();
        let client = Arc::new(RestClient::new(config.api_url()));

        let mut app = Self {
            selected_theme: config.theme(),
            current_view: View::default(),
            repositories: views::repositories::RepositoriesState::default(),
            editor: views::editor::EditorState::default(),
            client,
            confirm_dialog: None,
        };
        let init_task = app.load_repositories();
        (app, init_task)
    }

    pub fn title(&self) -> String {
        format!("{APP_NAME} - {}", self.current_view)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::NavigateTo(view) => {
                self.current_view = view;
            }
            Message::ThemeChanged(theme) => {
                self.selected_theme = theme;
            }
            Message::Repositories(msg) => return self.update_repositories(msg),
            Message::Editor(msg) => return self.update_editor(msg),
            Message::CancelAction => {
                self.confirm_dialog = None;
            }
            Message::ConfirmAction => {
                if let Some(action) = self.confirm_dialog.take() {
                    return self.execute_confirmed(action);
                }
            }
        }
        Task::none()
    }

    fn load_repositories(&mut self) -> Task<Message> {
        self.repositories.loading = true;
        let client = self.client.clone();
        Task::perform(
            async move { client.list_repositories().await.map_err(|e| e.to_string()) },
            |result| Message::Repositories(RepositoriesMessage::Loaded(result)),
        )
    }

    fn update_repositories(&mut self, msg: RepositoriesMessage) -> Task<Message> {
        match msg {
            RepositoriesMessage::Refresh => {
                return self.load_repositories();
            }
            RepositoriesMessage::Loaded(result) => {
                self.repositories.loading = false;
                self.repositories.loaded = true;
                self.repositories.result_version += 1;
                match result {
                    Ok(repos) => {
                        self.repositories.error = None;
                        self.repositories.repositories = repos;
                    }
                    Err(e) => {
                        log::error!("Failed to load repositories: {e}");
                        self.repositories.error = Some(e);
                        self.repositories.repositories.clear();
                    }
                }
            }
            RepositoriesMessage::Select(name) => {
                self.repositories.selecting = Some(name.clone());
                self.repositories.select_error = None;
                self.repositories.result_version += 1;
                let client = self.client.clone();
                return Task::perform(
                    async move { client.get_repository(&name).await.map_err(|e| e.to_string()) },
                    |result| Message::Editor(EditorMessage::RecordLoaded(result)),
                );
            }
        }
        Task::none()
    }

    fn update_editor(&mut self, msg: EditorMessage) -> Task<Message> {
        match msg {
            EditorMessage::NewRepository => {
                self.editor.reset();
                self.current_view = View::Editor;
            }
            EditorMessage::RecordLoaded(result) => {
                self.repositories.selecting = None;
                self.repositories.result_version += 1;
                match result {
                    Ok(repo) => {
                        self.editor.load(&repo);
                        self.current_view = View::Editor;
                    }
                    Err(e) => {
                        log::error!("Failed to load repository: {e}");
                        self.repositories.select_error = Some(e);
                    }
                }
            }
            EditorMessage::FieldChanged(field, value) => {
                self.editor.form.set_field(field, value);
                self.editor.notice = None;
            }
            EditorMessage::StorageKindSelected(kind) => {
                self.editor.selected_kind = kind;
            }
            EditorMessage::AddStorage => {
                let kind = self.editor.selected_kind;
                if self.editor.form.storages.add_blank(kind.id()).is_none() {
                    log::warn!("Unsupported storage type selected: {kind}");
                }
                self.editor.notice = None;
            }
            EditorMessage::RemoveStorage(id) => {
                self.editor.form.storages.remove(id);
            }
            EditorMessage::StorageFieldChanged(id, field, value) => {
                if let Some(form) = self.editor.form.storages.get_mut(id) {
                    form.set_field(field, value);
                }
                self.editor.notice = None;
            }
            EditorMessage::Submit => match self.editor.form.serialize() {
                Ok(repo) => {
                    self.editor.submitting = true;
                    self.editor.error = None;
                    self.editor.notice = None;
                    let client = self.client.clone();
                    return Task::perform(
                        async move {
                            client
                                .create_repository(&repo)
                                .await
                                .map(|resp| resp.message)
                                .map_err(|e| e.to_string())
                        },
                        |result| Message::Editor(EditorMessage::SubmitComplete(result)),
                    );
                }
                Err(e) => {
                    self.editor.error = Some(e.to_string());
                }
            },
            EditorMessage::SubmitComplete(result) => {
                self.editor.submitting = false;
                match result {
                    Ok(msg) => {
                        log::info!("Repository saved: {msg}");
                        self.editor.error = None;
                        self.editor.notice = Some(msg);
                        self.editor.source_name = Some(self.editor.form.name.clone());
                        return self.load_repositories();
                    }
                    Err(e) => {
                        log::error!("Failed to save repository: {e}");
                        self.editor.error = Some(e);
                    }
                }
            }
            EditorMessage::Delete => {
                if let Some(name) = self.editor.source_name.clone() {
                    self.confirm_dialog = Some(ConfirmAction::DeleteRepository(name));
                }
            }
            EditorMessage::DeleteComplete(result) => {
                self.editor.submitting = false;
                match result {
                    Ok(msg) => {
                        log::info!("Repository deleted: {msg}");
                        self.editor.reset();
                        self.current_view = View::Repositories;
                        return self.load_repositories();
                    }
                    Err(e) => {
                        log::error!("Failed to delete repository: {e}");
                        self.editor.error = Some(e);
                    }
                }
            }
        }
        Task::none()
    }

    fn execute_confirmed(&mut self, action: ConfirmAction) -> Task<Message> {
        match action {
            ConfirmAction::DeleteRepository(name) => {
                self.editor.submitting = true;
                let client = self.client.clone();
                Task::perform(
                    async move {
                        client
                            .delete_repository(&name)
                            .await
                            .map(|resp| resp.message)
                            .map_err(|e| e.to_string())
                    },
                    |result| Message::Editor(EditorMessage::DeleteComplete(result)),
                )
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let sidebar = self.sidebar_view();
        let content = match self.current_view {
            View::Repositories => views::repositories::view(&self.repositories),
            View::Editor => views::editor::view(&self.editor),
        };

        let base = row![sidebar, content];

        if let Some(ref action) = self.confirm_dialog {
            modal(
                base,
                self.confirm_dialog_view(action),
                Message::CancelAction,
            )
        } else {
            base.into()
        }
    }

    fn confirm_dialog_view(&self, action: &ConfirmAction) -> Element<'_, Message> {
        let (title, description) = match action {
            ConfirmAction::DeleteRepository(name) => (
                "Delete Repository",
                format!("{name} and its backup schedule will be removed from the server."),
            ),
        };

        let cancel_btn = button(text("Cancel").size(14))
            .on_press(Message::CancelAction)
            .style(button::secondary)
            .padding([8, 16]);

        let confirm_btn = button(text("Delete").size(14))
            .on_press(Message::ConfirmAction)
            .style(button::danger)
            .padding([8, 16]);

        container(
            column![
                text(title).size(18),
                text(description).size(14),
                row![cancel_btn, confirm_btn].spacing(8),
            ]
            .spacing(16)
            .padding(24)
            .align_x(iced::Alignment::Center),
        )
        .style(container::rounded_box)
        .width(320)
        .into()
    }

    fn sidebar_view(&self) -> Element<'_, Message> {
        let nav_items = [
            (View::Repositories, "Repositories"),
            (View::Editor, "Editor"),
        ];

        let mut nav = column![].spacing(4).padding(8);

        for (view, label) in nav_items {
            let is_active = self.current_view == view;
            let btn = button(text(label).size(14).width(Length::Fill).center())
                .on_press(Message::NavigateTo(view))
                .width(Length::Fill)
                .padding([8, 12]);

            let btn = if is_active {
                btn.style(button::primary)
            } else {
                btn.style(button::text)
            };

            nav = nav.push(btn);
        }

        let theme_selector = column![
            text("Theme").size(12),
            pick_list(
                &AppTheme::ALL[..],
                Some(self.selected_theme),
                Message::ThemeChanged,
            )
            .width(Length::Fill),
        ]
        .spacing(4)
        .padding(8);

        container(
            column![
                text(APP_NAME).size(20).center().width(Length::Fill),
                rule::horizontal(1),
                nav,
                space(),
                rule::horizontal(1),
                theme_selector,
            ]
            .spacing(8)
            .height(Length::Fill),
        )
        .width(180)
        .height(Length::Fill)
        .into()
    }

    pub fn theme(&self) -> Option<iced::Theme> {
        theme::resolve_theme(self.selected_theme)
    }
}

fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.8,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
