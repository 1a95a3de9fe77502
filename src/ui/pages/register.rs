//! Register page component
//!
//! Hosts the shared form in register mode. Departments are loaded from the
//! backend once the page mounts in the browser.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;

use super::login::use_redirect;
use crate::core::{Department, FormData, RegisterForm};
use crate::ui::auth::{AuthForm, AuthFormKind, SubmitHandler, client};

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

/// Register page component
#[component]
pub fn RegisterPage() -> impl IntoView {
    let loading = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    let departments = RwSignal::new(Vec::<Department>::new());
    let redirect = use_redirect();

    // Effects only run in the browser, after hydration
    Effect::new(move |_| {
        spawn_local(async move {
            match client::fetch_departments().await {
                Ok(list) => departments.set(list),
                Err(e) => {
                    leptos::logging::warn!("Loading departments failed: {:?}", e);
                    error.set(format!("Could not load departments: {}", e));
                }
            }
        });
    });

    let on_submit = SubmitHandler::new(move |data| async move {
        if let FormData::Register(form) = data {
            submit_registration(form, loading, error, redirect).await;
        }
    });

    view! {
        <Title text="Register | SUST-CRMS" />

        <main class="flex flex-col items-center justify-center min-h-screen gap-6 p-4">
            <h1 class="text-2xl font-bold">"Create an account"</h1>
            <AuthForm
                kind=AuthFormKind::Register { departments: departments.into() }
                on_submit=on_submit
                loading=loading
                error=error
            />
        </main>
    }
}

/// Check the passwords, then send the registration through the page's signals
///
/// Mismatched passwords are reported without contacting the backend.
async fn submit_registration(
    form: RegisterForm,
    loading: RwSignal<bool>,
    error: RwSignal<String>,
    redirect: RwSignal<Option<&'static str>>,
) {
    if !form.passwords_match() {
        error.set(PASSWORD_MISMATCH.to_string());
        return;
    }

    loading.set(true);
    error.set(String::new());

    match client::register(&form).await {
        Ok(()) => redirect.set(Some("/login")),
        Err(e) => {
            leptos::logging::warn!("Registration failed: {:?}", e);
            error.set(e.to_string());
        }
    }

    loading.set(false);
}
