//! Employee directory: admin-only CRUD over user records. Materially simpler
//! than the leave lifecycle; no date-range or overlap logic.

use crate::auth::password::hash_password;
use crate::model::role::Role;
use crate::model::user::User;
use crate::service::context::AuthContext;
use crate::service::error::ServiceError;
use crate::utils::email_cache;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, warn};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

const FAILED_CREATE: &str = "Failed to create employee";
const FAILED_LIST: &str = "Failed to list employees";

const DEFAULT_VACATION_DAYS: i64 = 20;
const DEFAULT_SICK_DAYS: i64 = 10;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployeeInput {
    #[schema(example = "jane.doe@company.com", format = "email")]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub department: Option<String>,
    #[schema(example = "user")]
    pub role: Option<String>,
    pub vacation_days: Option<i64>,
    pub sick_days: Option<i64>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeListPage {
    pub data: Vec<User>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

fn valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Paginated employee listing, newest first. Admin only.
pub async fn list(
    pool: &SqlitePool,
    ctx: &AuthContext,
    query: &EmployeeQuery,
) -> Result<EmployeeListPage, ServiceError> {
    if !ctx.is_admin() {
        return Err(ServiceError::unauthorized());
    }

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    // i64 keeps the offset from overflowing on absurd page numbers.
    let offset = i64::from(page - 1) * i64::from(per_page);

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .map_err(|e| ServiceError::infra(e, FAILED_LIST))?;

    let data = sqlx::query_as::<_, User>(
        "SELECT * FROM users ORDER BY created_at DESC LIMIT ? OFFSET ?",
    )
    .bind(per_page)
    .bind(offset)
    .fetch_all(pool)
    .await
    .map_err(|e| ServiceError::infra(e, FAILED_LIST))?;

    Ok(EmployeeListPage {
        data,
        page,
        per_page,
        total,
    })
}

/// Create an employee record with a temporary credential. Admin only. The
/// welcome notification is best-effort: a delivery failure is logged and
/// swallowed, never failing the creation.
pub async fn create(
    pool: &SqlitePool,
    ctx: &AuthContext,
    input: &CreateEmployeeInput,
) -> Result<User, ServiceError> {
    if !ctx.is_admin() {
        return Err(ServiceError::unauthorized());
    }

    let email = input.email.trim().to_lowercase();
    if !valid_email(&email) {
        return Err(ServiceError::validation("Invalid email address"));
    }
    if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
        return Err(ServiceError::validation("First and last name are required"));
    }

    let role = match input.role.as_deref() {
        Some(raw) => raw
            .parse::<Role>()
            .map_err(|_| ServiceError::validation("Role must be admin or user"))?,
        None => Role::User,
    };
    let vacation_days = input.vacation_days.unwrap_or(DEFAULT_VACATION_DAYS);
    let sick_days = input.sick_days.unwrap_or(DEFAULT_SICK_DAYS);
    if vacation_days < 0 || sick_days < 0 {
        return Err(ServiceError::validation("Leave allotments must be non-negative"));
    }

    // Cache gives a fast positive; the UNIQUE constraint still backstops the
    // race between the check and the insert.
    if email_cache::is_taken(&email).await {
        return Err(ServiceError::validation("Email already exists"));
    }
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = ? LIMIT 1)",
    )
    .bind(&email)
    .fetch_one(pool)
    .await
    .map_err(|e| ServiceError::infra(e, FAILED_CREATE))?;
    if exists {
        return Err(ServiceError::validation("Email already exists"));
    }

    let id = Uuid::new_v4().to_string();
    let temp_password = Uuid::new_v4().to_string();
    let hashed = hash_password(&temp_password).map_err(|e| {
        tracing::error!(error = %e, "Failed to hash temporary password");
        ServiceError::Internal(FAILED_CREATE.into())
    })?;

    let result = sqlx::query(
        r#"
        INSERT INTO users
            (id, email, password, first_name, last_name, department, role,
             vacation_days, sick_days, must_reset_password)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1)
        "#,
    )
    .bind(&id)
    .bind(&email)
    .bind(&hashed)
    .bind(input.first_name.trim())
    .bind(input.last_name.trim())
    .bind(&input.department)
    .bind(role)
    .bind(vacation_days)
    .bind(sick_days)
    .execute(pool)
    .await;

    if let Err(e) = result {
        // 2067 = SQLITE_CONSTRAINT_UNIQUE, a concurrent create won the race.
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.code() == Some("2067".into()) {
                return Err(ServiceError::validation("Email already exists"));
            }
        }
        return Err(ServiceError::infra(e, FAILED_CREATE));
    }

    email_cache::mark_taken(&email).await;

    if let Err(e) = send_welcome_email(&email).await {
        warn!(error = %e, email = %email, "Failed to send welcome email");
    }

    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&id)
        .fetch_one(pool)
        .await
        .map_err(|e| ServiceError::infra(e, FAILED_CREATE))
}

/// Stand-in for the outbound mail collaborator.
async fn send_welcome_email(email: &str) -> anyhow::Result<()> {
    info!(email = %email, "Welcome notification dispatched");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(valid_email("jane.doe@company.com"));
        assert!(valid_email("a@b.co"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("@company.com"));
        assert!(!valid_email("jane@nodot"));
        assert!(!valid_email("jane@.com"));
        assert!(!valid_email("jane doe@company.com"));
    }
}
