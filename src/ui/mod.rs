pub mod auth;
pub mod pages;

pub use auth::{AuthForm, AuthFormKind, SubmitHandler};
pub use pages::{HomePage, LoginPage, NotFoundPage, RegisterPage};
