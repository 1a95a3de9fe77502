//! Core domain models for the campus record-management front-end

mod api;
#[cfg(feature = "ssr")]
pub mod config;
mod form;
#[cfg(feature = "ssr")]
pub mod proxy;

pub use api::ApiError;
pub use form::*;
