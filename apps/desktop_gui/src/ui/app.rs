use std::time::Duration;

use client_core::{LoadState, ProductListState};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use egui::{Color32, RichText};
use shared::{domain::STATUS_LOW_STOCK, protocol::Product};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};

const LOW_STOCK_COLOR: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);
const IN_STOCK_COLOR: Color32 = Color32::from_rgb(0x2e, 0xcc, 0x71);

pub struct TechStockApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: ProductListState,
    loading: bool,
    new_name: String,
    new_quantity: String,
    status: String,
}

impl TechStockApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            state: ProductListState::default(),
            loading: true,
            new_name: String::new(),
            new_quantity: String::new(),
            status: String::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::Loading => self.loading = true,
            UiEvent::Synced(state) => {
                self.loading = state.load_state == LoadState::Loading;
                self.state = state;
            }
            UiEvent::DraftAccepted => {
                self.new_name.clear();
                self.new_quantity.clear();
            }
            UiEvent::BackendFailed(message) => {
                self.loading = false;
                self.status = message;
            }
        }
    }

    fn send(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn show_form(&mut self, ui: &mut egui::Ui) -> Option<BackendCommand> {
        let mut submitted = None;
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.new_name)
                    .hint_text("Name (e.g. HDMI cable)")
                    .desired_width(360.0),
            );
            ui.add(
                egui::TextEdit::singleline(&mut self.new_quantity)
                    .hint_text("Qty")
                    .desired_width(80.0),
            );
            if ui.button(RichText::new("ADD").strong()).clicked() {
                submitted = Some(BackendCommand::AddProduct {
                    name: self.new_name.clone(),
                    quantity: self.new_quantity.clone(),
                });
            }
            if ui.button("Reload").clicked() {
                submitted = Some(BackendCommand::Reload);
            }
        });
        submitted
    }

    fn show_products(&self, ui: &mut egui::Ui) -> Vec<BackendCommand> {
        let mut commands = Vec::new();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for product in &self.state.products {
                product_row(ui, product, &mut commands);
                ui.separator();
            }
        });
        commands
    }
}

fn product_row(ui: &mut egui::Ui, product: &Product, commands: &mut Vec<BackendCommand>) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(&product.name).heading());
            ui.small(format!("ID: {}", product.id));
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("🗑").clicked() {
                commands.push(BackendCommand::RemoveProduct {
                    product_id: product.id,
                });
            }
            ui.label(
                RichText::new(&product.status)
                    .strong()
                    .color(stock_color(&product.status)),
            );
            if ui.button(" + ").clicked() {
                commands.push(BackendCommand::AdjustQuantity {
                    product_id: product.id,
                    delta: 1,
                });
            }
            ui.label(RichText::new(product.quantity.to_string()).strong().size(18.0));
            if ui.button(" - ").clicked() {
                commands.push(BackendCommand::AdjustQuantity {
                    product_id: product.id,
                    delta: -1,
                });
            }
        });
    });
}

fn stock_color(status: &str) -> Color32 {
    if status == STATUS_LOW_STOCK {
        LOW_STOCK_COLOR
    } else {
        IN_STOCK_COLOR
    }
}

impl eframe::App for TechStockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let mut pending = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("📦 TechStock Inventory");
            });
            ui.add_space(12.0);

            if let Some(cmd) = self.show_form(ui) {
                pending.push(cmd);
            }
            ui.add_space(8.0);

            if let Some(error) = &self.state.error {
                ui.horizontal(|ui| {
                    ui.colored_label(Color32::RED, error);
                    if ui.small_button("dismiss").clicked() {
                        pending.push(BackendCommand::DismissError);
                    }
                });
            }
            if !self.status.is_empty() {
                ui.small(&self.status);
            }
            if self.loading {
                ui.spinner();
            }

            ui.separator();
            pending.extend(self.show_products(ui));
        });

        for cmd in pending {
            self.send(cmd);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
