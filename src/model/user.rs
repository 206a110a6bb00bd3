use crate::model::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: String,
    #[schema(example = "jane.doe@company.com", format = "email", value_type = String)]
    pub email: String,
    /// Argon2 hash, never serialized.
    #[serde(skip_serializing)]
    #[schema(write_only)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub department: Option<String>,
    pub role: Role,
    /// Remaining annual-leave balance in days.
    pub vacation_days: i64,
    /// Remaining sick-leave balance in days.
    pub sick_days: i64,
    pub must_reset_password: bool,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub email_verified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    #[schema(write_only)]
    pub reset_token: Option<String>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}
