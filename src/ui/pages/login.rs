//! Login page component
//!
//! Hosts the shared form in login mode and sends the credentials to the
//! backend. Redirects to the landing page on success.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_navigate;

use crate::core::{FormData, LoginForm};
use crate::ui::auth::{AuthForm, AuthFormKind, SubmitHandler, client};

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    let loading = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    let redirect = use_redirect();

    let on_submit = SubmitHandler::new(move |data| async move {
        if let FormData::Login(form) = data {
            submit_login(form, loading, error, redirect).await;
        }
    });

    view! {
        <Title text="Login | SUST-CRMS" />

        <main class="flex flex-col items-center justify-center min-h-screen gap-6 p-4">
            <h1 class="text-2xl font-bold">"Login"</h1>
            <AuthForm kind=AuthFormKind::Login on_submit=on_submit loading=loading error=error />
        </main>
    }
}

/// Send the credentials, reporting progress through the page's signals
async fn submit_login(
    form: LoginForm,
    loading: RwSignal<bool>,
    error: RwSignal<String>,
    redirect: RwSignal<Option<&'static str>>,
) {
    loading.set(true);
    error.set(String::new());

    match client::login(&form).await {
        Ok(()) => redirect.set(Some("/")),
        Err(e) => {
            leptos::logging::warn!("Login failed: {:?}", e);
            error.set(e.to_string());
        }
    }

    loading.set(false);
}

/// Signal that navigates to the stored path once set
///
/// Submit handlers run outside the component's reactive owner, so they record
/// the target here and an effect performs the navigation.
pub(super) fn use_redirect() -> RwSignal<Option<&'static str>> {
    let redirect = RwSignal::new(None::<&'static str>);

    Effect::new(move |_| {
        if let Some(path) = redirect.get() {
            let navigate = use_navigate();
            navigate(path, Default::default());
        }
    });

    redirect
}
