pub mod dialogs;
pub mod download_controller;
pub mod media;

pub use dialogs::{show_notification, RfdSavePrompt};
pub use download_controller::{DownloadController, DownloadEvent};
pub use media::{MediaHandle, MediaResolver, ProgressCallback, SavePrompt};
