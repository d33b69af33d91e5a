use std::path::PathBuf;

use async_trait::async_trait;
use rfd::{AsyncFileDialog, AsyncMessageDialog, MessageButtons, MessageLevel};

use super::SavePrompt;
use crate::domain::{Notification, NotificationLevel};
use crate::utils::AUDIO_EXTENSION;

/// Native "save as" dialog
#[derive(Debug, Clone, Copy, Default)]
pub struct RfdSavePrompt;

#[async_trait]
impl SavePrompt for RfdSavePrompt {
    async fn choose_save_path(&self, suggested_filename: &str) -> Option<PathBuf> {
        AsyncFileDialog::new()
            .set_title("Save audio as...")
            .set_file_name(suggested_filename)
            .add_filter("M4A Audio", &[AUDIO_EXTENSION])
            .add_filter("All Files", &["*"])
            .save_file()
            .await
            .map(|handle| handle.path().to_path_buf())
            .filter(|path| !path.as_os_str().is_empty())
    }
}

/// Show a notification as a native modal message box
pub async fn show_notification(notification: Notification) {
    let level = match notification.level {
        NotificationLevel::Info => MessageLevel::Info,
        NotificationLevel::Error => MessageLevel::Error,
    };

    AsyncMessageDialog::new()
        .set_level(level)
        .set_title(&notification.title)
        .set_description(&notification.message)
        .set_buttons(MessageButtons::Ok)
        .show()
        .await;
}
