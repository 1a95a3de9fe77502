//! Not found page component
//!
//! A 404 error page displayed when a route is not found.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <Title text="Page Not Found | SUST-CRMS" />

        <div class="min-h-screen flex flex-col items-center justify-center gap-4 p-4 text-center">
            <h1 class="text-6xl font-bold">"404"</h1>
            <h2 class="text-2xl font-semibold">"Page Not Found"</h2>
            <p class="text-gray-400 max-w-md">
                "The page you're looking for doesn't exist or has been moved."
            </p>
            <A href="/" attr:class="btn btn-primary">
                "Go Home"
            </A>
        </div>
    }
}
