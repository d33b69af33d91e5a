use iced::widget::{button, container, text_input};
use iced::{Background, Color, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Colors applied to every widget class for one mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub input_background: Color,
    pub input_text: Color,
    pub button_background: Color,
    pub button_text: Color,
    pub footer: Color,
}

const LIGHT: Palette = Palette {
    background: Color::from_rgb8(0xf0, 0xf0, 0xf0),
    text: Color::from_rgb8(0x22, 0x22, 0x22),
    input_background: Color::from_rgb8(0xff, 0xff, 0xff),
    input_text: Color::from_rgb8(0x22, 0x22, 0x22),
    button_background: Color::from_rgb8(0xe0, 0xe0, 0xe0),
    button_text: Color::from_rgb8(0x22, 0x22, 0x22),
    footer: Color::from_rgb8(0x80, 0x80, 0x80),
};

const DARK: Palette = Palette {
    background: Color::from_rgb8(0x22, 0x22, 0x22),
    text: Color::from_rgb8(0xf0, 0xf0, 0xf0),
    input_background: Color::from_rgb8(0x33, 0x33, 0x33),
    input_text: Color::from_rgb8(0xf0, 0xf0, 0xf0),
    button_background: Color::from_rgb8(0x33, 0x33, 0x33),
    button_text: Color::from_rgb8(0xf0, 0xf0, 0xf0),
    footer: Color::from_rgb8(0x88, 0x88, 0x88),
};

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Light => LIGHT,
            ThemeMode::Dark => DARK,
        }
    }

    /// Built-in iced theme the custom styles are layered on
    pub fn iced_theme(self) -> Theme {
        match self {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
        }
    }
}

pub fn background(palette: Palette) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette.background)),
        text_color: Some(palette.text),
        ..Default::default()
    }
}

pub fn input(palette: Palette, theme: &Theme, status: text_input::Status) -> text_input::Style {
    let mut style = text_input::default(theme, status);
    style.background = Background::Color(palette.input_background);
    style.value = palette.input_text;
    style
}

pub fn action_button(palette: Palette, theme: &Theme, status: button::Status) -> button::Style {
    let mut style = button::secondary(theme, status);
    let fill = match status {
        button::Status::Disabled => palette.button_background.scale_alpha(0.5),
        _ => palette.button_background,
    };
    style.background = Some(Background::Color(fill));
    style.text_color = match status {
        button::Status::Disabled => palette.button_text.scale_alpha(0.5),
        _ => palette.button_text,
    };
    style
}
