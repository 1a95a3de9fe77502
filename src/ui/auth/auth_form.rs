//! Shared authentication form
//!
//! One component renders both the login and the register form. It owns the
//! typed-in values; the caller owns everything else (`loading`, `error`, and
//! what happens with the submitted values).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::core::{Department, FormData, FormField, FormMode, Role};

const FORM_CLASS: &str = "space-y-4 w-full max-w-md mx-auto p-6 bg-[#232326] rounded-lg shadow-lg border border-[#27272a] text-foreground";
const INPUT_CLASS: &str = "input input-bordered w-full bg-[#18181b] border-[#27272a] text-foreground placeholder:text-gray-400";
const SELECT_CLASS: &str = "input input-bordered w-full bg-[#18181b] border-[#27272a] text-foreground";
const SUBMIT_CLASS: &str = "btn btn-primary w-full bg-blue-600 hover:bg-blue-700 text-white border-none";

/// Which form to render
#[derive(Clone, Copy)]
pub enum AuthFormKind {
    Login,
    Register {
        /// Choices for the department select
        departments: Signal<Vec<Department>>,
    },
}

impl AuthFormKind {
    pub fn mode(&self) -> FormMode {
        match self {
            AuthFormKind::Login => FormMode::Login,
            AuthFormKind::Register { .. } => FormMode::Register,
        }
    }
}

type SubmitFuture = Pin<Box<dyn Future<Output = ()>>>;

/// Async callback receiving the form values on submit
#[derive(Clone)]
pub struct SubmitHandler(Arc<dyn Fn(FormData) -> SubmitFuture + Send + Sync>);

impl SubmitHandler {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(FormData) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        Self(Arc::new(move |data| Box::pin(f(data))))
    }

    pub async fn submit(&self, data: FormData) {
        (self.0)(data).await
    }
}

/// Login / register form component
#[component]
pub fn AuthForm(
    /// Login or register, with the register-only data
    kind: AuthFormKind,
    /// Called once per submit with the current values
    on_submit: SubmitHandler,
    /// Disables the submit button while true
    #[prop(into)]
    loading: Signal<bool>,
    /// Error text; nothing is shown when empty
    #[prop(into)]
    error: Signal<String>,
) -> impl IntoView {
    let mode = kind.mode();
    let state = RwSignal::new(FormData::new(mode));

    let on_form_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        spawn_local(submit_current(state, &on_submit));
    };

    let departments = match kind {
        AuthFormKind::Register { departments } => Some(departments),
        AuthFormKind::Login => None,
    };
    let (prompt, switch_href, switch_text) = mode.switch_link();

    view! {
        <form on:submit=on_form_submit class=FORM_CLASS>
            {departments.map(|_| view! {
                <TextInput state=state field=FormField::Name input_type="text" placeholder="Full Name" />
            })}
            <TextInput state=state field=FormField::Email input_type="email" placeholder="Email" />
            <TextInput state=state field=FormField::Password input_type="password" placeholder="Password" />
            {departments.map(|departments| view! {
                <TextInput
                    state=state
                    field=FormField::ConfirmPassword
                    input_type="password"
                    placeholder="Confirm Password"
                />
                <ChoiceInput
                    state=state
                    field=FormField::Role
                    placeholder="Select Role"
                    options=Signal::stored(role_options())
                />
                <ChoiceInput
                    state=state
                    field=FormField::Department
                    placeholder="Select Department"
                    options=Signal::derive(move || department_options(departments.get()))
                />
            })}

            {move || {
                let message = error.get();
                (!message.is_empty()).then(|| view! {
                    <div class="text-red-400 text-sm" role="alert">{message}</div>
                })
            }}

            <button type="submit" class=SUBMIT_CLASS disabled=move || loading.get()>
                {move || if loading.get() { "Loading..." } else { mode.submit_label() }}
            </button>

            <div class="text-center text-sm text-gray-400">
                <span>
                    {prompt}
                    <A href=switch_href attr:class="text-blue-400 hover:underline">
                        {switch_text}
                    </A>
                </span>
            </div>
        </form>
    }
}

/// Text-like input bound to one field
#[component]
fn TextInput(
    state: RwSignal<FormData>,
    field: FormField,
    input_type: &'static str,
    placeholder: &'static str,
) -> impl IntoView {
    view! {
        <input
            name=field.name()
            type=input_type
            placeholder=placeholder
            class=INPUT_CLASS
            required=true
            prop:value=move || field_value(state, field)
            on:input=move |ev| update_field(state, field, event_target_value(&ev))
        />
    }
}

/// Select bound to one field, with a blank first option
#[component]
fn ChoiceInput(
    state: RwSignal<FormData>,
    field: FormField,
    placeholder: &'static str,
    /// (value, label) pairs
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
) -> impl IntoView {
    view! {
        <select
            name=field.name()
            class=SELECT_CLASS
            required=true
            prop:value=move || field_value(state, field)
            on:change=move |ev| update_field(state, field, event_target_value(&ev))
        >
            <option value="">{placeholder}</option>
            {move || {
                options
                    .get()
                    .into_iter()
                    .map(|(value, label)| view! { <option value=value>{label}</option> })
                    .collect_view()
            }}
        </select>
    }
}

/// Snapshot the current values and hand them to the handler
///
/// The snapshot is taken when this is called, not when the future runs.
fn submit_current(
    state: RwSignal<FormData>,
    handler: &SubmitHandler,
) -> impl Future<Output = ()> + 'static {
    let data = state.get_untracked();
    let handler = handler.clone();
    async move {
        handler.submit(data).await;
    }
}

fn field_value(state: RwSignal<FormData>, field: FormField) -> String {
    state.with(|data| data.value(field).unwrap_or_default().to_string())
}

fn update_field(state: RwSignal<FormData>, field: FormField, value: String) {
    state.update(|data| {
        if let Err(e) = data.set_field(field, value) {
            leptos::logging::warn!("Ignoring form change: {}", e);
        }
    });
}

fn role_options() -> Vec<(String, String)> {
    Role::ALL
        .into_iter()
        .map(|role| (role.value().to_string(), role.to_string()))
        .collect()
}

fn department_options(departments: Vec<Department>) -> Vec<(String, String)> {
    departments.into_iter().map(|d| (d.id, d.name)).collect()
}
