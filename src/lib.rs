//! SUST-CRMS - Campus Record Management System front-end
//!
//! Landing page plus the shared login/register form, built with Leptos and
//! WebAssembly. Authentication itself is done by an external backend.

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
