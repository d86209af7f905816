//! New-user form: field state, inline validation and the egui rendering.

use client_core::ActionOutcome;
use eframe::egui;
use shared::{
    domain::CreateUserRequest,
    validation::{validate_email, validate_name},
};

use super::error_banner;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl FormErrors {
    fn any(&self) -> bool {
        self.name.is_some() || self.email.is_some()
    }
}

#[derive(Debug, Default)]
pub struct UserFormState {
    pub name: String,
    pub email: String,
    errors: FormErrors,
    submit_error: Option<String>,
}

impl UserFormState {
    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn name_edited(&mut self) {
        self.errors.name = None;
        self.submit_error = None;
    }

    pub fn email_edited(&mut self) {
        self.errors.email = None;
        self.submit_error = None;
    }

    pub fn dismiss_submit_error(&mut self) {
        self.submit_error = None;
    }

    pub fn is_submittable(&self, loading: bool) -> bool {
        !loading
            && !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.errors.any()
    }

    /// Validates both fields and returns the trimmed request, or records the
    /// field errors and returns `None`.
    pub fn prepare_submission(&mut self) -> Option<CreateUserRequest> {
        self.submit_error = None;
        self.errors = FormErrors {
            name: validate_name(&self.name).err().map(|err| err.to_string()),
            email: validate_email(&self.email).err().map(|err| err.to_string()),
        };
        if self.errors.any() {
            return None;
        }
        Some(CreateUserRequest::trimmed(&self.name, &self.email))
    }

    pub fn apply_outcome(&mut self, outcome: &ActionOutcome) {
        match outcome {
            ActionOutcome::Succeeded => *self = Self::default(),
            ActionOutcome::Failed(message) => self.submit_error = Some(message.clone()),
            ActionOutcome::Cancelled => {}
        }
    }
}

pub fn submit_label(loading: bool) -> &'static str {
    if loading {
        "Creating..."
    } else {
        "Create User"
    }
}

fn form_field(
    ui: &mut egui::Ui,
    id_salt: &str,
    label: &str,
    hint: &str,
    value: &mut String,
    error: Option<&str>,
) -> egui::Response {
    ui.label(egui::RichText::new(label).strong());
    let response = ui.add_sized(
        [ui.available_width(), 28.0],
        egui::TextEdit::singleline(value)
            .id_salt(id_salt)
            .hint_text(hint),
    );
    if let Some(error) = error {
        ui.label(egui::RichText::new(error).color(ui.visuals().error_fg_color).small());
    }
    response
}

/// Draws the form. Returns a request when the user submitted valid input.
pub fn show(ui: &mut egui::Ui, form: &mut UserFormState, loading: bool) -> Option<CreateUserRequest> {
    ui.heading("Add New User");
    ui.add_space(6.0);

    if let Some(message) = form.submit_error().map(str::to_owned) {
        if error_banner(ui, &message) {
            form.dismiss_submit_error();
        }
        ui.add_space(6.0);
    }

    let name_error = form.errors().name.clone();
    let name = form_field(
        ui,
        "user_form_name",
        "Name",
        "Enter name",
        &mut form.name,
        name_error.as_deref(),
    );
    if name.changed() {
        form.name_edited();
    }
    ui.add_space(4.0);

    let email_error = form.errors().email.clone();
    let email = form_field(
        ui,
        "user_form_email",
        "Email",
        "Enter email",
        &mut form.email,
        email_error.as_deref(),
    );
    if email.changed() {
        form.email_edited();
    }
    ui.add_space(8.0);

    let enter_pressed = (name.lost_focus() || email.lost_focus())
        && ui.input(|i| i.key_pressed(egui::Key::Enter));
    let button = egui::Button::new(egui::RichText::new(submit_label(loading)).strong())
        .min_size(egui::vec2(ui.available_width(), 32.0));
    let clicked = ui.add_enabled(form.is_submittable(loading), button).clicked();

    if clicked || (enter_pressed && form.is_submittable(loading)) {
        form.prepare_submission()
    } else {
        None
    }
}
