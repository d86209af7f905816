//! UI layer for the desktop GUI: app shell, pages, and widgets.

pub mod app;
pub mod pages;
pub mod widgets;

pub use app::{IdentityWebApp, PersistedUiSettings};
