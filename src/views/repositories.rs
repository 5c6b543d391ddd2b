use iced::{
    Alignment, Element, Length,
    widget::{button, column, container, lazy, row, scrollable, space, text},
};

use crate::{
    app::message::{EditorMessage, Message, RepositoriesMessage},
    core::repository::BackupRepo,
    styles::{self, font_size, spacing},
};

#[derive(Debug, Default)]
pub struct RepositoriesState {
    pub repositories: Vec<BackupRepo>,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
    pub result_version: u64,
    pub selecting: Option<String>,
    pub select_error: Option<String>,
}

pub fn view(state: &RepositoriesState) -> Element<'_, Message> {
    let new_btn = button(text("New Repository").size(font_size::SMALL))
        .padding([spacing::XS, 14.0])
        .style(button::primary)
        .on_press(Message::Editor(EditorMessage::NewRepository));

    let refresh_btn = if state.loading {
        button(text("Loading...").size(font_size::SMALL))
            .padding([spacing::XS, 14.0])
            .style(button::secondary)
    } else {
        button(text("Refresh").size(font_size::SMALL))
            .padding([spacing::XS, 14.0])
            .style(button::secondary)
            .on_press(Message::Repositories(RepositoriesMessage::Refresh))
    };

    let header = row![
        text("Backup Repositories").size(font_size::TITLE),
        space().width(Length::Fill),
        new_btn,
        refresh_btn,
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center)
    .width(Length::Fill);

    let content: Element<'_, Message> = if state.loading {
        container(text("Loading repositories...").size(font_size::BODY))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    } else if let Some(ref err) = state.error {
        container(text(format!("Failed to load: {err}")).size(font_size::BODY))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    } else if state.repositories.is_empty() {
        let msg = if state.loaded {
            "No backup repositories configured"
        } else {
            "Loading..."
        };
        container(text(msg).size(font_size::BODY))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    } else {
        let version = state.result_version;
        let repos = state.repositories.clone();
        let selecting = state.selecting.clone();
        lazy(("repos", version), move |_| {
            let cards: Vec<Element<'_, Message>> =
                repos.iter().map(|repo| repo_card(repo, &selecting)).collect();
            scrollable(column(cards).spacing(spacing::SM).width(Length::Fill)).height(Length::Fill)
        })
        .into()
    };

    let mut main_col = column![header, content]
        .spacing(spacing::MD)
        .width(Length::Fill)
        .height(Length::Fill);

    if let Some(ref err) = state.select_error {
        main_col = main_col.push(
            container(text(format!("Failed to open: {err}")).size(font_size::CAPTION + 1.0))
                .padding([spacing::XS, spacing::MD])
                .width(Length::Fill)
                .style(styles::error_banner),
        );
    }

    container(main_col)
        .padding(spacing::XL)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn repo_card(repo: &BackupRepo, selecting: &Option<String>) -> Element<'static, Message> {
    let name = text(repo.name.clone()).size(font_size::HEADING);
    let url = text(repo.remote_url.clone()).size(font_size::CAPTION + 1.0);

    let mut tags: Vec<Element<'_, Message>> = vec![
        container(text(format!("Pull every {}s", repo.pull_interval)).size(font_size::BADGE))
            .padding([spacing::XXXS, spacing::XS])
            .style(styles::badge_neutral)
            .into(),
    ];

    if repo.storage.is_empty() {
        tags.push(
            container(text("No storage").size(font_size::BADGE))
                .padding([spacing::XXXS, spacing::XS])
                .style(styles::badge_neutral)
                .into(),
        );
    } else {
        for config in repo.storage.values() {
            tags.push(
                container(text(format!("{}: {}", config.kind, config.name)).size(font_size::BADGE))
                    .padding([spacing::XXXS, spacing::XS])
                    .style(styles::badge_primary)
                    .into(),
            );
        }
    }

    let is_opening = selecting.as_deref() == Some(&repo.name);
    let mut header = row![name].spacing(spacing::SM).align_y(Alignment::Center);
    if is_opening {
        header = header.push(text("Opening...").size(font_size::CAPTION));
    }

    let left = column![header, url, row(tags).spacing(spacing::XS)]
        .spacing(spacing::XXS)
        .width(Length::Fill);

    let mut card = button(
        container(left).padding(spacing::MD).width(Length::Fill),
    )
    .width(Length::Fill)
    .style(styles::card_button);

    if selecting.is_none() {
        card = card.on_press(Message::Repositories(RepositoriesMessage::Select(
            repo.name.clone(),
        )));
    }

    card.into()
}
