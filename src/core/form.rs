//! Authentication form state
//!
//! The login and register flows share one form component. Its local state is a
//! tagged union: exactly one of [`LoginForm`] or [`RegisterForm`] is live,
//! selected by [`FormMode`]. Edits address fields by the DOM `name` of the
//! originating control.

use std::fmt;
use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Form state errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Unknown form field `{0}`")]
    UnknownField(String),

    #[error("Field `{field}` is not part of the {mode} form")]
    FieldNotInMode { field: FormField, mode: FormMode },
}

/// Which flow the form is rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    #[display("login")]
    Login,
    #[display("register")]
    Register,
}

impl FormMode {
    /// Submit button label when idle
    pub fn submit_label(self) -> &'static str {
        match self {
            FormMode::Login => "Login",
            FormMode::Register => "Register",
        }
    }

    /// Footer prompt, switch link target and switch link text
    pub fn switch_link(self) -> (&'static str, &'static str, &'static str) {
        match self {
            FormMode::Login => ("Don't have an account? ", "/register", "Sign Up"),
            FormMode::Register => ("Already have an account? ", "/login", "Login"),
        }
    }
}

/// Every field either form can hold, named as its input control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Role,
    Department,
}

impl FormField {
    pub const REGISTER: [FormField; 6] = [
        FormField::Name,
        FormField::Email,
        FormField::Password,
        FormField::ConfirmPassword,
        FormField::Role,
        FormField::Department,
    ];

    /// The `name` attribute of the control bound to this field
    pub fn name(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Password => "password",
            FormField::ConfirmPassword => "confirmPassword",
            FormField::Role => "role",
            FormField::Department => "department",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormField::REGISTER
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}

/// Login credentials as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration details as typed
///
/// `role` and `department` hold the raw select values; an empty string means
/// nothing was picked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
    pub department: String,
}

impl RegisterForm {
    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }
}

/// Live form state, and the payload handed to the submit handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FormData {
    Login(LoginForm),
    Register(RegisterForm),
}

impl FormData {
    /// Empty state for the given mode
    pub fn new(mode: FormMode) -> Self {
        match mode {
            FormMode::Login => FormData::Login(LoginForm::default()),
            FormMode::Register => FormData::Register(RegisterForm::default()),
        }
    }

    pub fn mode(&self) -> FormMode {
        match self {
            FormData::Login(_) => FormMode::Login,
            FormData::Register(_) => FormMode::Register,
        }
    }

    /// Current value of a field, `None` if the active mode has no such field
    pub fn value(&self, field: FormField) -> Option<&str> {
        let value = match (self, field) {
            (FormData::Login(form), FormField::Email) => &form.email,
            (FormData::Login(form), FormField::Password) => &form.password,
            (FormData::Login(_), _) => return None,
            (FormData::Register(form), FormField::Name) => &form.name,
            (FormData::Register(form), FormField::Email) => &form.email,
            (FormData::Register(form), FormField::Password) => &form.password,
            (FormData::Register(form), FormField::ConfirmPassword) => &form.confirm_password,
            (FormData::Register(form), FormField::Role) => &form.role,
            (FormData::Register(form), FormField::Department) => &form.department,
        };
        Some(value.as_str())
    }

    /// Overwrite one field of the active slice, leaving every other field alone
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> Result<(), FormError> {
        let slot = match (&mut *self, field) {
            (FormData::Login(form), FormField::Email) => &mut form.email,
            (FormData::Login(form), FormField::Password) => &mut form.password,
            (FormData::Login(_), _) => {
                return Err(FormError::FieldNotInMode {
                    field,
                    mode: FormMode::Login,
                });
            }
            (FormData::Register(form), FormField::Name) => &mut form.name,
            (FormData::Register(form), FormField::Email) => &mut form.email,
            (FormData::Register(form), FormField::Password) => &mut form.password,
            (FormData::Register(form), FormField::ConfirmPassword) => &mut form.confirm_password,
            (FormData::Register(form), FormField::Role) => &mut form.role,
            (FormData::Register(form), FormField::Department) => &mut form.department,
        };
        *slot = value.into();
        Ok(())
    }

    /// Apply a change event coming from the control called `name`
    pub fn apply_change(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field = name.parse::<FormField>()?;
        self.set_field(field, value)
    }
}

/// A selectable department
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
}

/// Roles a user can register as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Role {
    #[display("Student")]
    Student,
    #[display("Teacher")]
    Teacher,
    #[display("Department Admin")]
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Teacher, Role::Admin];

    /// Value submitted for this role
    pub fn value(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Admin => "admin",
        }
    }
}
