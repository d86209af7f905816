use eframe::egui;
use shared::domain::{User, UserId};

pub const EMPTY_LIST_HINT: &str = "No users found. Create one to get started!";

/// Draws the user rows. Returns the id whose Delete button was clicked.
pub fn show(ui: &mut egui::Ui, users: &[User], loading: bool) -> Option<UserId> {
    if loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.weak("Loading users...");
        });
        ui.add_space(6.0);
    }

    if users.is_empty() {
        if !loading {
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                ui.weak(EMPTY_LIST_HINT);
            });
        }
        return None;
    }

    let mut delete_requested = None;
    egui::ScrollArea::vertical()
        .id_salt("user_list_scroll")
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for user in users {
                egui::Frame::NONE
                    .fill(ui.visuals().faint_bg_color)
                    .corner_radius(8.0)
                    .inner_margin(egui::Margin::symmetric(10, 8))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.label(egui::RichText::new(&user.name).strong());
                                ui.weak(&user.email);
                            });
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    let delete = egui::Button::new(
                                        egui::RichText::new("Delete")
                                            .color(ui.visuals().error_fg_color),
                                    );
                                    if ui.add_enabled(!loading, delete).clicked() {
                                        delete_requested = Some(user.id);
                                    }
                                },
                            );
                        });
                    });
                ui.add_space(4.0);
            }
        });
    delete_requested
}
