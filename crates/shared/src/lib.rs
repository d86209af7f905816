//! Types shared between the identity client crates: the user domain model,
//! backend wire payloads, and client-side form validation.

pub mod domain;
pub mod error;
pub mod protocol;
pub mod validation;
