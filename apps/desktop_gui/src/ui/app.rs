use std::time::Duration;

use client_core::{actions::DELETION_CANCELLED, ActionOutcome, AppState, UserState};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serde::{Deserialize, Serialize};
use shared::domain::UserId;
use tokio_util::sync::CancellationToken;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::widgets::{self, user_form::UserFormState};

pub const SETTINGS_STORAGE_KEY: &str = "identity_desktop.settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Home,
    Users,
}

impl Page {
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Users => "Users",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedUiSettings {
    pub last_page: Page,
    pub dark_mode: bool,
}

impl Default for PersistedUiSettings {
    fn default() -> Self {
        Self {
            last_page: Page::Home,
            dark_mode: true,
        }
    }
}

impl PersistedUiSettings {
    pub fn from_storage(storage: Option<&dyn eframe::Storage>) -> Option<Self> {
        storage.and_then(|storage| {
            storage
                .get_string(SETTINGS_STORAGE_KEY)
                .and_then(|text| serde_json::from_str::<Self>(&text).ok())
        })
    }
}

pub struct IdentityWebApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    pub(super) api_base_url: String,
    pub(super) page: Page,
    dark_mode: bool,
    applied_dark_mode: Option<bool>,

    pub(super) status: String,
    pub(super) status_banner: Option<UiError>,

    pub(super) app_state: AppState,
    pub(super) user_state: UserState,
    pub(super) user_form: UserFormState,
    pub(super) pending_delete: Option<UserId>,
    // Present only while the Users page is open.
    users_page_cancel: Option<CancellationToken>,
}

impl IdentityWebApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        api_base_url: String,
        persisted: Option<PersistedUiSettings>,
    ) -> Self {
        let persisted = persisted.unwrap_or_default();
        let mut app = Self {
            cmd_tx,
            ui_rx,
            api_base_url,
            page: Page::Home,
            dark_mode: persisted.dark_mode,
            applied_dark_mode: None,
            status: "Starting backend...".to_string(),
            status_banner: None,
            app_state: AppState::default(),
            user_state: UserState::default(),
            user_form: UserFormState::default(),
            pending_delete: None,
            users_page_cancel: None,
        };
        app.navigate(persisted.last_page);
        app
    }

    pub(super) fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    pub(super) fn navigate(&mut self, page: Page) {
        if self.page == page && (page == Page::Home || self.users_page_cancel.is_some()) {
            return;
        }
        if let Some(cancel) = self.users_page_cancel.take() {
            tracing::debug!("leaving users page; cancelling its pending requests");
            cancel.cancel();
        }
        self.pending_delete = None;
        self.page = page;

        if page == Page::Users {
            self.users_page_cancel = Some(CancellationToken::new());
            self.dispatch(BackendCommand::FetchUsers);
        }
    }

    pub(super) fn confirm_delete(&mut self, id: UserId) {
        self.pending_delete = None;
        let Some(cancel) = self.users_page_cancel.clone() else {
            return;
        };
        self.dispatch(BackendCommand::DeleteUser { id, cancel });
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::warn!(
                        category = err.category().label(),
                        context = ?err.context(),
                        "{}",
                        err.message()
                    );
                    self.status = err.message().to_string();
                    self.status_banner = Some(err);
                }
                UiEvent::UsersChanged(state) => {
                    self.user_state = state;
                }
                UiEvent::AppChanged(state) => {
                    self.app_state = state;
                }
                UiEvent::UserCreateFinished(outcome) => {
                    if outcome.is_success() {
                        self.status = "User created".to_string();
                    }
                    self.user_form.apply_outcome(&outcome);
                }
                UiEvent::UserDeleteFinished { id, outcome } => {
                    self.status = match outcome {
                        ActionOutcome::Succeeded => format!("Deleted user #{id}"),
                        ActionOutcome::Failed(message) => message,
                        ActionOutcome::Cancelled => DELETION_CANCELLED.to_string(),
                    };
                }
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_dark_mode == Some(self.dark_mode) {
            return;
        }
        ctx.set_visuals(if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        self.applied_dark_mode = Some(self.dark_mode);
    }

    fn show_nav_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("identity_nav_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Identity Management");
                ui.add_space(16.0);
                for page in [Page::Home, Page::Users] {
                    if ui.selectable_label(self.page == page, page.label()).clicked() {
                        self.navigate(page);
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.checkbox(&mut self.dark_mode, "Dark mode");
                });
            });
            ui.add_space(6.0);
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("identity_status_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(egui::RichText::new(&self.api_base_url).weak());
                });
            });
        });
    }

    fn show_delete_confirmation(&mut self, ctx: &egui::Context) {
        let Some(id) = self.pending_delete else {
            return;
        };
        let mut decision = None;
        let modal = egui::Modal::new(egui::Id::new("confirm_delete_user")).show(ctx, |ui| {
            ui.set_width(320.0);
            ui.heading("Delete user");
            ui.add_space(6.0);
            ui.label(client_core::actions::DELETE_CONFIRMATION_PROMPT);
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Delete").clicked() {
                    decision = Some(true);
                }
                if ui.button("Cancel").clicked() {
                    decision = Some(false);
                }
            });
        });

        match decision {
            Some(true) => self.confirm_delete(id),
            Some(false) => self.pending_delete = None,
            None if modal.should_close() => self.pending_delete = None,
            None => {}
        }
    }
}

impl eframe::App for IdentityWebApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        self.show_nav_bar(ctx);
        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(banner) = self.status_banner.clone() {
                if widgets::error_banner(ui, &banner.banner_text()) {
                    self.status_banner = None;
                }
                ui.add_space(8.0);
            }
            match self.page {
                Page::Home => self.show_home_page(ui),
                Page::Users => self.show_users_page(ui),
            }
        });
        self.show_delete_confirmation(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedUiSettings {
            last_page: self.page,
            dark_mode: self.dark_mode,
        };
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
