//! Application pages module
//!
//! This module contains all the page components for the application:
//! - Landing page (home)
//! - Login page
//! - Register page
//! - Not found page

mod home;
mod login;
mod not_found;
mod register;

pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use register::RegisterPage;
