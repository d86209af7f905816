//! Home and Users page bodies.

use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::ui::app::IdentityWebApp;
use crate::ui::widgets::{self, header, user_form, user_list};

const FORM_COLUMN_WIDTH: f32 = 320.0;

impl IdentityWebApp {
    pub(super) fn show_home_page(&mut self, ui: &mut egui::Ui) {
        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            ui.heading("Welcome to Identity Management");
            ui.label("Create, list and remove users on the connected backend.");
        });
        ui.add_space(16.0);

        let state = self.app_state.clone();
        widgets::card(ui, |ui| {
            ui.label(egui::RichText::new("Random Number").strong().size(18.0));
            ui.add_space(6.0);

            if let Some(error) = state.error.as_deref() {
                if widgets::error_banner(ui, error) {
                    self.dispatch(BackendCommand::ClearAppError);
                }
                ui.add_space(6.0);
            }

            ui.horizontal(|ui| {
                let button = egui::Button::new("Get Random Number");
                if ui
                    .add_enabled(!state.random_number_loading, button)
                    .clicked()
                {
                    self.dispatch(BackendCommand::FetchRandomNumber);
                }
                if state.random_number_loading {
                    ui.spinner();
                }
            });

            if let Some(number) = state.random_number {
                ui.add_space(6.0);
                ui.label(egui::RichText::new(format!("{number}")).monospace().size(22.0));
            }
        });
    }

    pub(super) fn show_users_page(&mut self, ui: &mut egui::Ui) {
        let state = self.user_state.clone();

        if let Some(error) = state.error.as_deref() {
            if widgets::error_banner(ui, error) {
                self.dispatch(BackendCommand::ClearUserError);
            }
            ui.add_space(8.0);
        }

        ui.columns(2, |columns| {
            columns[0].set_max_width(FORM_COLUMN_WIDTH);
            widgets::card(&mut columns[0], |ui| {
                if let Some(request) = user_form::show(ui, &mut self.user_form, state.loading) {
                    self.dispatch(BackendCommand::CreateUser { request });
                }
            });

            widgets::card(&mut columns[1], |ui| {
                if header::show(ui, state.users.len(), state.loading) {
                    self.dispatch(BackendCommand::FetchUsers);
                }
                ui.separator();
                if let Some(id) = user_list::show(ui, &state.users, state.loading) {
                    self.pending_delete = Some(id);
                }
            });
        });
    }
}
