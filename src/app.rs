use std::sync::Arc;

use futures::StreamExt;
use iced::{Task, Theme};
use log::debug;

use crate::api::YoutubeClient;
use crate::application::{show_notification, DownloadController, DownloadEvent, RfdSavePrompt};
use crate::domain::{AppError, Notification};
use crate::ui::{DownloadMessage, DownloadView};

pub struct DownloadApp {
    view: DownloadView,
    controller: DownloadController,
}

impl Default for DownloadApp {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadApp {
    pub fn new() -> Self {
        let resolver = Arc::new(YoutubeClient::new(Default::default()));
        Self::with_controller(DownloadController::new(resolver, Arc::new(RfdSavePrompt)))
    }

    pub fn with_controller(controller: DownloadController) -> Self {
        Self {
            view: DownloadView::default(),
            controller,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DownloadMessage),
    /// Event from the running download worker
    Download(DownloadEvent),
    /// A modal notification was dismissed
    NotificationClosed,
}

fn notify(notification: Notification) -> Task<Message> {
    Task::perform(show_notification(notification), |()| {
        Message::NotificationClosed
    })
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            if let DownloadMessage::DownloadPressed = ui_msg {
                if app.view.can_start() {
                    match app.controller.start(&app.view.youtube_url) {
                        Ok(events) => {
                            app.view.begin_download();
                            // The worker runs on the iced executor, off the UI thread
                            return Task::stream(events.map(Message::Download));
                        }
                        Err(AppError::InvalidUrl) => {
                            return notify(Notification::invalid_url());
                        }
                        Err(e) => {
                            debug!("Start ignored: {}", e);
                        }
                    }
                }
            }
        }
        Message::Download(event) => {
            if let Some(notification) = app.view.apply(&event) {
                return notify(notification);
            }
        }
        Message::NotificationClosed => app.view.notification_closed(),
    }
    Task::none()
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}

pub fn theme(app: &DownloadApp) -> Theme {
    app.view.theme.iced_theme()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{MediaHandle, MediaResolver, SavePrompt};
    use crate::domain::UiState;
    use crate::ui::theme::ThemeMode;
    use async_trait::async_trait;
    use std::path::PathBuf;

    /// Never finishes resolving, so the worker stays in flight
    struct PendingResolver;

    #[async_trait]
    impl MediaResolver for PendingResolver {
        async fn resolve(&self, _url: &str) -> Result<Box<dyn MediaHandle>, AppError> {
            futures::future::pending().await
        }
    }

    struct NoPrompt;

    #[async_trait]
    impl SavePrompt for NoPrompt {
        async fn choose_save_path(&self, _suggested_filename: &str) -> Option<PathBuf> {
            None
        }
    }

    fn test_app() -> (DownloadApp, DownloadController) {
        let controller = DownloadController::new(Arc::new(PendingResolver), Arc::new(NoPrompt));
        (DownloadApp::with_controller(controller.clone()), controller)
    }

    fn type_and_press(app: &mut DownloadApp, url: &str) -> Task<Message> {
        let _ = update(
            app,
            Message::UiMessage(DownloadMessage::UrlChanged(url.to_string())),
        );
        update(app, Message::UiMessage(DownloadMessage::DownloadPressed))
    }

    #[test]
    fn test_invalid_url_keeps_idle() {
        let (mut app, controller) = test_app();

        let _task = type_and_press(&mut app, "https://youtube.com/watch?v=short");

        assert_eq!(app.view.state, UiState::Idle);
        assert_eq!(app.view.progress, 0);
        assert!(app.view.can_start());
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_valid_url_starts_download() {
        let (mut app, controller) = test_app();
        app.view.progress = 80;

        let task = type_and_press(&mut app, "https://youtu.be/dQw4w9WgXcQ");

        assert_eq!(app.view.state, UiState::Downloading);
        assert_eq!(app.view.progress, 0);
        assert!(controller.is_busy());

        // Pressing again while downloading is a no-op
        let _ = update(&mut app, Message::UiMessage(DownloadMessage::DownloadPressed));
        assert_eq!(app.view.state, UiState::Downloading);

        drop(task);
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_worker_events_drive_view() {
        let (mut app, _) = test_app();
        app.view.begin_download();

        let _ = update(&mut app, Message::Download(DownloadEvent::Progress(42)));
        assert_eq!(app.view.progress, 42);

        let _ = update(&mut app, Message::Download(DownloadEvent::Finished));
        assert_eq!(app.view.state, UiState::Idle);
    }

    #[test]
    fn test_start_button_returns_after_message_box_closes() {
        let (mut app, _) = test_app();
        app.view.begin_download();

        let notification = Notification::failure(&AppError::Download("reset".to_string()));
        let _ = update(&mut app, Message::Download(DownloadEvent::Notify(notification)));
        let _ = update(&mut app, Message::Download(DownloadEvent::Finished));
        assert_eq!(app.view.state, UiState::Downloading);

        let _ = update(&mut app, Message::NotificationClosed);
        assert_eq!(app.view.state, UiState::Idle);
    }

    #[test]
    fn test_theme_toggle() {
        let (mut app, _) = test_app();
        assert_eq!(theme(&app), Theme::Light);

        let _ = update(&mut app, Message::UiMessage(DownloadMessage::ToggleTheme));
        assert_eq!(app.view.theme, ThemeMode::Dark);
        assert_eq!(theme(&app), Theme::Dark);
    }
}
