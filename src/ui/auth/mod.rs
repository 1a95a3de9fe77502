//! Authentication UI module
//!
//! The shared login/register form and the client that talks to the
//! authentication backend.

mod auth_form;
pub mod client;

pub use auth_form::{AuthForm, AuthFormKind, SubmitHandler};
