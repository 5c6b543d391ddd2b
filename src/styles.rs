use iced::{Border, Color, Shadow, Theme, Vector, widget::container};

pub mod font_size {
    pub const TITLE: f32 = 20.0;
    pub const HEADING: f32 = 16.0;
    pub const BODY: f32 = 14.0;
    pub const SMALL: f32 = 13.0;
    pub const CAPTION: f32 = 11.0;
    pub const BADGE: f32 = 10.0;
}

pub mod spacing {
    pub const XXXS: f32 = 2.0;
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 6.0;
    pub const SM: f32 = 8.0;
    pub const MD: f32 = 12.0;
    pub const LG: f32 = 16.0;
    pub const XL: f32 = 20.0;
}

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 6.0;
    pub const LG: f32 = 8.0;
    pub const FULL: f32 = 9999.0;
}

// --- Cards ---

pub fn card(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.background.base.color.into()),
        border: Border {
            radius: radius::LG.into(),
            width: 1.0,
            color: palette.background.strong.color,
        },
        shadow: Shadow {
            color: Color {
                a: 0.08,
                ..Color::BLACK
            },
            offset: Vector::new(0.0, 2.0),
            blur_radius: 8.0,
        },
        ..Default::default()
    }
}

pub fn card_button(
    theme: &Theme,
    status: iced::widget::button::Status,
) -> iced::widget::button::Style {
    let palette = theme.extended_palette();
    match status {
        iced::widget::button::Status::Hovered => iced::widget::button::Style {
            background: Some(palette.background.weak.color.into()),
            text_color: palette.background.base.text,
            border: Border {
                radius: radius::LG.into(),
                width: 1.0,
                color: palette.primary.weak.color,
            },
            shadow: Shadow {
                color: Color {
                    a: 0.12,
                    ..Color::BLACK
                },
                offset: Vector::new(0.0, 4.0),
                blur_radius: 12.0,
            },
            snap: false,
        },
        iced::widget::button::Status::Pressed => iced::widget::button::Style {
            background: Some(palette.background.strong.color.into()),
            text_color: palette.background.base.text,
            border: Border {
                radius: radius::LG.into(),
                width: 1.0,
                color: palette.primary.base.color,
            },
            shadow: Shadow {
                color: Color {
                    a: 0.06,
                    ..Color::BLACK
                },
                offset: Vector::new(0.0, 1.0),
                blur_radius: 4.0,
            },
            snap: false,
        },
        _ => iced::widget::button::Style {
            background: Some(palette.background.base.color.into()),
            text_color: palette.background.base.text,
            border: Border {
                radius: radius::LG.into(),
                width: 1.0,
                color: palette.background.strong.color,
            },
            shadow: Shadow {
                color: Color {
                    a: 0.08,
                    ..Color::BLACK
                },
                offset: Vector::new(0.0, 2.0),
                blur_radius: 8.0,
            },
            snap: false,
        },
    }
}

// --- Badges ---

pub fn badge_neutral(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.background.weak.color.into()),
        border: Border {
            radius: radius::SM.into(),
            width: 1.0,
            color: palette.background.strong.color,
        },
        text_color: Some(palette.background.base.text),
        ..Default::default()
    }
}

pub fn badge_primary(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.primary.weak.color.into()),
        border: Border {
            radius: radius::SM.into(),
            width: 1.0,
            color: palette.primary.base.color,
        },
        text_color: Some(palette.primary.strong.color),
        ..Default::default()
    }
}

// --- Banners ---

pub fn error_banner(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.danger.weak.color.into()),
        border: Border {
            width: 1.0,
            color: palette.danger.base.color,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

pub fn success_banner(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.success.weak.color.into()),
        border: Border {
            width: 1.0,
            color: palette.success.base.color,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

// --- Pill button style (rounded) ---

pub fn pill_button_danger(
    theme: &Theme,
    status: iced::widget::button::Status,
) -> iced::widget::button::Style {
    let palette = theme.extended_palette();
    let is_dark = palette.background.base.color.r < 0.5;
    match status {
        iced::widget::button::Status::Hovered => iced::widget::button::Style {
            background: Some(palette.danger.base.color.into()),
            text_color: palette.danger.base.text,
            border: Border {
                radius: radius::FULL.into(),
                ..Default::default()
            },
            ..Default::default()
        },
        iced::widget::button::Status::Pressed => iced::widget::button::Style {
            background: Some(palette.danger.strong.color.into()),
            text_color: palette.danger.weak.color,
            border: Border {
                radius: radius::FULL.into(),
                ..Default::default()
            },
            ..Default::default()
        },
        _ => iced::widget::button::Style {
            background: Some(palette.danger.weak.color.into()),
            text_color: if is_dark {
                Color::from_rgb(1.0, 0.7, 0.7)
            } else {
                Color::from_rgb(0.6, 0.15, 0.15)
            },
            border: Border {
                radius: radius::FULL.into(),
                width: 1.0,
                color: palette.danger.base.color,
            },
            ..Default::default()
        },
    }
}
