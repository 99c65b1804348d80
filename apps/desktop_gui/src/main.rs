mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::DEFAULT_SERVER_URL;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::{commands::BackendCommand, runtime};
use controller::events::UiEvent;
use ui::TechStockApp;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    server_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    runtime::launch(args.server_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("TechStock")
            .with_inner_size([820.0, 640.0])
            .with_min_inner_size([560.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "TechStock",
        options,
        Box::new(|_cc| Ok(Box::new(TechStockApp::new(cmd_tx, ui_rx)))),
    )
}
