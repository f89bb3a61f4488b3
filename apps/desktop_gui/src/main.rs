mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context as _;
use client_core::{load_settings, InvitationSession};
use crossbeam_channel::bounded;
use eframe::egui;
use storage::ResponseStore;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::InvitationApp;

const WINDOW_TITLE: &str = "Una Invitación Especial";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let data_dir = settings
        .resolve_data_dir()
        .context("no directory available for the response record")?;
    let session = InvitationSession::open(ResponseStore::open(&data_dir));
    let gesture_window = settings.admin_gesture_window();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([760.0, 820.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(InvitationApp::new(
                cmd_tx,
                ui_rx,
                session,
                gesture_window,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("window loop failed: {err}"))
}
