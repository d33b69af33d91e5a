mod api;
mod app;
mod application;
mod domain;
mod ui;
mod utils;

use iced::{window, Size};

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application(app::DownloadApp::default, app::update, app::view)
        .title("MT29 YouTube to M4A Downloader")
        .theme(app::theme)
        .window(window::Settings {
            // 260 px clips the footer with iced's default widget heights
            size: Size::new(420.0, 300.0),
            resizable: false,
            ..Default::default()
        })
        .run()
}
