use eframe::egui;

pub fn title(user_count: usize) -> String {
    format!("All Users ({user_count})")
}

pub fn refresh_label(loading: bool) -> &'static str {
    if loading {
        "Refreshing..."
    } else {
        "Refresh"
    }
}

/// Returns `true` when Refresh was clicked.
pub fn show(ui: &mut egui::Ui, user_count: usize, loading: bool) -> bool {
    let mut refresh = false;
    ui.horizontal(|ui| {
        ui.heading(title(user_count));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            refresh = ui
                .add_enabled(!loading, egui::Button::new(refresh_label(loading)))
                .clicked();
        });
    });
    refresh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(title(0), "All Users (0)");
        assert_eq!(title(12), "All Users (12)");
        assert_eq!(refresh_label(true), "Refreshing...");
        assert_eq!(refresh_label(false), "Refresh");
    }
}
