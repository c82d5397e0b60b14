use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Rejects values made only of whitespace.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// User entity as held by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identifier, never reused
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    /// Unique across users, compared case-insensitively
    pub email: String,
    pub department: Option<String>,
    pub is_active: bool,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a record from a create payload with store-assigned id and timestamp
    pub fn new(id: u64, input: CreateUser, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            department: input.department,
            is_active: input.is_active,
            created_at,
        }
    }

    /// Replace every mutable field; `id` and `created_at` are kept.
    pub fn apply_update(&mut self, update: UpdateUser) {
        self.first_name = update.first_name;
        self.last_name = update.last_name;
        self.email = update.email;
        self.department = update.department;
        self.is_active = update.is_active;
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

/// User view returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            department: user.department,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

fn default_active() -> bool {
    true
}

/// Request body for both create and update.
///
/// Required fields are `Option`s so an absent or `null` value surfaces as a
/// field error instead of a body parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[validate(
        required(message = "The FirstName field is required."),
        length(
            min = 2,
            max = 50,
            message = "The field FirstName must be a string with a minimum length of 2 and a maximum length of 50."
        ),
        custom(function = "not_blank", message = "First name cannot be empty or whitespace.")
    )]
    #[schema(value_type = String)]
    pub first_name: Option<String>,
    #[validate(
        required(message = "The LastName field is required."),
        length(
            min = 2,
            max = 50,
            message = "The field LastName must be a string with a minimum length of 2 and a maximum length of 50."
        ),
        custom(function = "not_blank", message = "Last name cannot be empty or whitespace.")
    )]
    #[schema(value_type = String)]
    pub last_name: Option<String>,
    #[validate(
        required(message = "The Email field is required."),
        email(message = "The Email field is not a valid e-mail address.")
    )]
    #[schema(value_type = String)]
    pub email: Option<String>,
    #[validate(
        length(
            min = 2,
            max = 50,
            message = "The field Department must be a string with a minimum length of 2 and a maximum length of 50."
        ),
        custom(function = "not_blank", message = "Department cannot be whitespace.")
    )]
    pub department: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Input for storing a new user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Option<String>,
    pub is_active: bool,
}

/// Input for replacing a user's mutable fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Option<String>,
    pub is_active: bool,
}

// Conversions expect a payload that already passed `validate()`.
impl From<UserPayload> for CreateUser {
    fn from(payload: UserPayload) -> Self {
        Self {
            first_name: payload.first_name.unwrap_or_default(),
            last_name: payload.last_name.unwrap_or_default(),
            email: payload.email.unwrap_or_default(),
            department: payload.department,
            is_active: payload.is_active,
        }
    }
}

impl From<UserPayload> for UpdateUser {
    fn from(payload: UserPayload) -> Self {
        Self {
            first_name: payload.first_name.unwrap_or_default(),
            last_name: payload.last_name.unwrap_or_default(),
            email: payload.email.unwrap_or_default(),
            department: payload.department,
            is_active: payload.is_active,
        }
    }
}
