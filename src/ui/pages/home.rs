//! Landing page component
//!
//! Welcome heading with the two entry points: login and register.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

/// Landing page component
#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="SUST-CRMS" />

        <div class="flex flex-col items-center justify-center min-h-screen gap-6">
            <h1 class="text-2xl font-bold">"Welcome to SUST-CRMS website."</h1>
            <div class="flex gap-4">
                <A href="/login" attr:class="btn btn-primary">
                    "Login"
                </A>
                <A href="/register" attr:class="btn btn-secondary">
                    "Register"
                </A>
            </div>
        </div>
    }
}
