use crate::model::leave_request::LeaveType;
use crate::service::error::ServiceError;
use serde::Serialize;
use sqlx::{Sqlite, SqlitePool, Transaction};
use utoipa::ToSchema;

const FAILED_DEDUCT: &str = "Failed to update leave balance";

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaveBalance {
    pub vacation_days: i64,
    pub sick_days: i64,
}

/// Deduct `days` from the user's balance for the given leave type. Annual
/// leave draws on `vacation_days`, sick leave on `sick_days`; unpaid and
/// other leave touch nothing. The read and write run in one transaction so
/// two approvals for the same user cannot interleave.
pub async fn deduct(
    pool: &SqlitePool,
    user_id: &str,
    leave_type: LeaveType,
    days: i64,
) -> Result<LeaveBalance, ServiceError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| ServiceError::infra(e, FAILED_DEDUCT))?;

    let balance = deduct_in_tx(&mut tx, user_id, leave_type, days).await?;

    tx.commit()
        .await
        .map_err(|e| ServiceError::infra(e, FAILED_DEDUCT))?;

    Ok(balance)
}

/// Same as [`deduct`] but joins the caller's transaction, so a review that
/// fails on balance leaves the request row untouched.
pub(crate) async fn deduct_in_tx(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: &str,
    leave_type: LeaveType,
    days: i64,
) -> Result<LeaveBalance, ServiceError> {
    let row = sqlx::query_as::<_, (i64, i64)>(
        "SELECT vacation_days, sick_days FROM users WHERE id = ?",
    )
    .bind(user_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(|e| ServiceError::infra(e, FAILED_DEDUCT))?;

    let (vacation_days, sick_days) =
        row.ok_or_else(|| ServiceError::not_found("User not found"))?;

    match leave_type {
        LeaveType::Annual => {
            if days > vacation_days {
                return Err(ServiceError::validation("Insufficient vacation days"));
            }
            sqlx::query("UPDATE users SET vacation_days = vacation_days - ? WHERE id = ?")
                .bind(days)
                .bind(user_id)
                .execute(&mut **tx)
                .await
                .map_err(|e| ServiceError::infra(e, FAILED_DEDUCT))?;
            Ok(LeaveBalance {
                vacation_days: vacation_days - days,
                sick_days,
            })
        }
        LeaveType::Sick => {
            if days > sick_days {
                return Err(ServiceError::validation("Insufficient sick days"));
            }
            sqlx::query("UPDATE users SET sick_days = sick_days - ? WHERE id = ?")
                .bind(days)
                .bind(user_id)
                .execute(&mut **tx)
                .await
                .map_err(|e| ServiceError::infra(e, FAILED_DEDUCT))?;
            Ok(LeaveBalance {
                vacation_days,
                sick_days: sick_days - days,
            })
        }
        LeaveType::Unpaid | LeaveType::Other => Ok(LeaveBalance {
            vacation_days,
            sick_days,
        }),
    }
}
