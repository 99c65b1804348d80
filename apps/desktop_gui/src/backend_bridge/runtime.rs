//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{HttpInventoryApi, ProductListController};
use crossbeam_channel::{Receiver, Sender};
use tracing::{error, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Spawns the worker thread. It loads the list once, then runs commands in
/// arrival order, publishing a fresh snapshot after each one.
pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        let api = match HttpInventoryApi::new(&server_url) {
            Ok(api) => api,
            Err(err) => {
                error!(%server_url, "invalid server url: {err}");
                let _ = ui_tx.try_send(UiEvent::BackendFailed(err.to_string()));
                return;
            }
        };
        let mut controller = ProductListController::new(Arc::new(api));
        info!(%server_url, "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::Info(format!("Server: {server_url}")));

        runtime.block_on(async move {
            run_command(&mut controller, BackendCommand::Reload, &ui_tx).await;
            while let Some(cmd) = next_command(&cmd_rx).await {
                run_command(&mut controller, cmd, &ui_tx).await;
            }
            info!("ui command queue closed; backend worker exiting");
        });
    });
}

/// Receives the next UI command on the blocking pool, leaving the runtime free.
pub(crate) async fn next_command(cmd_rx: &Receiver<BackendCommand>) -> Option<BackendCommand> {
    let cmd_rx = cmd_rx.clone();
    match tokio::task::spawn_blocking(move || cmd_rx.recv()).await {
        Ok(Ok(cmd)) => Some(cmd),
        Ok(Err(_)) => None,
        Err(err) => {
            error!("command receiver task failed: {err}");
            None
        }
    }
}

pub(crate) async fn run_command(
    controller: &mut ProductListController,
    cmd: BackendCommand,
    ui_tx: &Sender<UiEvent>,
) {
    let cmd_name = cmd.name();
    let result = match cmd {
        BackendCommand::Reload => {
            let _ = ui_tx.try_send(UiEvent::Loading);
            controller.load().await
        }
        BackendCommand::AddProduct { name, quantity } => {
            let draft = controller.draft_mut();
            draft.name = name;
            draft.quantity = quantity;
            match controller.submit_draft().await {
                Ok(Some(_)) => {
                    let _ = ui_tx.try_send(UiEvent::DraftAccepted);
                    Ok(())
                }
                Ok(None) => Ok(()),
                Err(err) => Err(err),
            }
        }
        BackendCommand::RemoveProduct { product_id } => controller.remove(product_id).await,
        BackendCommand::AdjustQuantity { product_id, delta } => controller
            .adjust_by(product_id, delta)
            .await
            .map(|_| ()),
        BackendCommand::DismissError => {
            controller.dismiss_error();
            Ok(())
        }
    };
    if let Err(err) = result {
        warn!(command = cmd_name, error = %err, "backend command failed");
    }

    let _ = ui_tx.try_send(UiEvent::Synced(controller.state().clone()));
}
