pub mod theme;

use iced::{
    alignment::Horizontal,
    widget::{button, column, container, progress_bar, text, text_input, Space},
    Element, Length,
};

use crate::application::DownloadEvent;
use crate::domain::{Notification, UiState};
use theme::ThemeMode;

/// Main view state
#[derive(Default)]
pub struct DownloadView {
    pub youtube_url: String,
    /// Whole percent, 0 to 100
    pub progress: u8,
    pub state: UiState,
    pub theme: ThemeMode,
    /// A terminal message box is open; `Finished` waits for it to close
    notification_open: bool,
    finish_pending: bool,
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    UrlChanged(String),
    DownloadPressed,
    ToggleTheme,
}

impl DownloadView {
    pub fn update(&mut self, message: DownloadMessage) {
        match message {
            DownloadMessage::UrlChanged(url) => {
                self.youtube_url = url;
            }
            DownloadMessage::DownloadPressed => {
                // Will be handled by the app
            }
            DownloadMessage::ToggleTheme => {
                self.theme = self.theme.toggle();
            }
        }
    }

    pub fn can_start(&self) -> bool {
        self.state == UiState::Idle
    }

    /// Disable the start button and reset the progress bar
    pub fn begin_download(&mut self) {
        self.state = UiState::Downloading;
        self.progress = 0;
    }

    /// Apply a worker event; returns the notification to show, if any
    pub fn apply(&mut self, event: &DownloadEvent) -> Option<Notification> {
        match event {
            DownloadEvent::Progress(percent) => {
                self.progress = *percent;
                None
            }
            DownloadEvent::Notify(notification) => {
                self.notification_open = true;
                Some(notification.clone())
            }
            DownloadEvent::Finished => {
                if self.notification_open {
                    self.finish_pending = true;
                } else {
                    self.state = UiState::Idle;
                }
                None
            }
        }
    }

    /// The user dismissed a message box
    pub fn notification_closed(&mut self) {
        self.notification_open = false;
        if std::mem::take(&mut self.finish_pending) {
            self.state = UiState::Idle;
        }
    }

    pub fn view(&self) -> Element<'_, DownloadMessage> {
        let palette = self.theme.palette();

        let content = column![
            text("YouTube to M4A Downloader").size(22),
            Space::new().height(Length::Fixed(4.0)),
            text("Enter YouTube URL:").size(14),
            text_input("https://www.youtube.com/watch?v=...", &self.youtube_url)
                .on_input(DownloadMessage::UrlChanged)
                .on_submit(DownloadMessage::DownloadPressed)
                .padding(8)
                .style(move |iced_theme, status| theme::input(palette, iced_theme, status)),
            button("Download Audio")
                .on_press_maybe(self.can_start().then_some(DownloadMessage::DownloadPressed))
                .padding([8, 20])
                .style(move |iced_theme, status| theme::action_button(palette, iced_theme, status)),
            progress_bar(0.0..=100.0, f32::from(self.progress)),
            button("Toggle Light/Dark Mode")
                .on_press(DownloadMessage::ToggleTheme)
                .padding([8, 20])
                .style(move |iced_theme, status| theme::action_button(palette, iced_theme, status)),
            Space::new().height(Length::Fill),
            text("© 2025 MT29").size(11).color(palette.footer),
        ]
        .padding(20)
        .spacing(10)
        .align_x(Horizontal::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_| theme::background(palette))
            .into()
    }
}
