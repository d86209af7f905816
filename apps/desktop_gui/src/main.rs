mod backend_bridge;
mod controller;
mod ui;

use anyhow::anyhow;
use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime::launch};
use crate::controller::events::UiEvent;
use crate::ui::{IdentityWebApp, PersistedUiSettings};

#[derive(Parser, Debug)]
#[command(name = "identity_desktop", about = "Desktop user management client")]
struct Args {
    /// Backend base URL; overrides identity_web.toml and the environment.
    #[arg(long)]
    api_base_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();
    let settings = load_settings().with_api_base_url(args.api_base_url);
    tracing::info!(api_base_url = %settings.api_base_url, "starting identity desktop");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    launch(cmd_rx, ui_tx, settings.api_base_url.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Identity Management")
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Identity Management",
        options,
        Box::new(move |cc| {
            let persisted = PersistedUiSettings::from_storage(cc.storage);
            Ok(Box::new(IdentityWebApp::new(
                cmd_tx,
                ui_rx,
                settings.api_base_url,
                persisted,
            )))
        }),
    )
    .map_err(|err| anyhow!("desktop ui exited with an error: {err}"))
}
