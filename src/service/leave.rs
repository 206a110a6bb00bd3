//! Leave-request lifecycle: the sole authority for creating, listing,
//! fetching, reviewing, and editing leave requests, including all
//! authorization and business-rule enforcement.

use crate::model::leave_request::{LeaveRequest, LeaveRequestDetail, LeaveStatus, LeaveType};
use crate::service::balance;
use crate::service::context::AuthContext;
use crate::service::error::ServiceError;
use crate::service::workdays;
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

const MAX_REASON_LEN: usize = 500;
const SICK_BACKDATE_DAYS: i64 = 30;

const FAILED_CREATE: &str = "Failed to create leave request";
const FAILED_FETCH: &str = "Failed to fetch leave request";
const FAILED_LIST: &str = "Failed to list leave requests";
const FAILED_UPDATE: &str = "Failed to update leave request";

const NOT_FOUND: &str = "Leave request not found";
const OVERLAP: &str = "You have overlapping leave requests for these dates";

const DETAIL_SELECT: &str = r#"
    SELECT lr.id, lr.user_id, lr.leave_type, lr.start_date, lr.end_date,
           lr.reason, lr.status, lr.days_requested, lr.requested_at,
           lr.reviewed_at, lr.reviewed_by, lr.admin_comment,
           u.first_name, u.last_name, u.email
    FROM leave_requests lr
    JOIN users u ON u.id = lr.user_id
"#;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLeaveInput {
    #[schema(example = "annual")]
    pub leave_type: String,
    #[schema(example = "2026-01-05", format = "date")]
    pub start_date: String,
    #[schema(example = "2026-01-07", format = "date")]
    pub end_date: String,
    #[schema(example = "family trip")]
    pub reason: Option<String>,
}

/// Owner edit of a still-pending request. Dates and type are replaced
/// wholesale; `days_requested` is recomputed, never taken from the client.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EditLeaveInput {
    pub leave_type: String,
    #[schema(format = "date")]
    pub start_date: String,
    #[schema(format = "date")]
    pub end_date: String,
    pub reason: Option<String>,
}

/// Admin edit. Unlike [`EditLeaveInput`] it may also carry a status, which is
/// the only path that moves a request out of a terminal state.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminEditInput {
    pub leave_type: String,
    #[schema(format = "date")]
    pub start_date: String,
    #[schema(format = "date")]
    pub end_date: String,
    pub reason: Option<String>,
    #[schema(example = "rejected")]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewInput {
    #[schema(example = "approved")]
    pub status: String,
    #[schema(example = "enjoy the break")]
    pub review_note: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    /// Scope to one employee. Ignored for non-admin callers, who always see
    /// only their own requests.
    pub user_id: Option<String>,
    /// Exact status, or the sentinel "all".
    #[param(example = "pending")]
    pub status: Option<String>,
    /// 1-based page number. Pagination applies only when both page and limit
    /// are positive.
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Pagination {
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// List results: the full set, or one page plus metadata when pagination was
/// requested.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LeaveListing {
    Full(Vec<LeaveRequestDetail>),
    Paged {
        items: Vec<LeaveRequestDetail>,
        pagination: Pagination,
    },
}

#[derive(Debug)]
struct ParsedDates {
    leave_type: LeaveType,
    start: NaiveDate,
    end: NaiveDate,
    reason: Option<String>,
}

/// Parse the user-supplied type/date/reason fields, collecting every
/// offending field into one validation message.
fn parse_fields(
    leave_type: &str,
    start_date: &str,
    end_date: &str,
    reason: Option<&str>,
) -> Result<ParsedDates, ServiceError> {
    let mut bad: Vec<&str> = Vec::new();

    let leave_type = match leave_type.parse::<LeaveType>() {
        Ok(t) => Some(t),
        Err(_) => {
            bad.push("leave_type");
            None
        }
    };
    let start = match NaiveDate::parse_from_str(start_date, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            bad.push("start_date");
            None
        }
    };
    let end = match NaiveDate::parse_from_str(end_date, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            bad.push("end_date");
            None
        }
    };
    if reason.is_some_and(|r| r.chars().count() > MAX_REASON_LEN) {
        bad.push("reason");
    }

    if let (Some(leave_type), Some(start), Some(end)) = (leave_type, start, end) {
        if bad.is_empty() {
            return Ok(ParsedDates {
                leave_type,
                start,
                end,
                reason: reason.map(str::to_owned),
            });
        }
    }
    Err(ServiceError::Validation(format!(
        "Invalid value for field(s): {}",
        bad.join(", ")
    )))
}

async fn fetch_detail(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<LeaveRequestDetail>, ServiceError> {
    let sql = format!("{DETAIL_SELECT} WHERE lr.id = ?");
    sqlx::query_as::<_, LeaveRequestDetail>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| ServiceError::infra(e, FAILED_FETCH))
}

/// True when the user already holds a non-rejected request touching
/// `start..=end`, ignoring the row identified by `exclude_id` so edits do not
/// collide with the request being edited.
async fn overlap_exists_in_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    user_id: &str,
    exclude_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    public_msg: &str,
) -> Result<bool, ServiceError> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM leave_requests
            WHERE user_id = ? AND id != ? AND status != 'rejected'
              AND start_date <= ? AND end_date >= ?
        )
        "#,
    )
    .bind(user_id)
    .bind(exclude_id)
    .bind(end)
    .bind(start)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| ServiceError::infra(e, public_msg))
}

/// Submit a new leave request on behalf of the caller.
///
/// Validation order is fixed: input shape, date order, past-date rule per
/// leave type, then overlap against the caller's existing non-rejected
/// requests. The overlap check and the insert share one transaction, which
/// SQLite serializes against concurrent writers, so two racing submissions
/// cannot both pass the check.
pub async fn create(
    pool: &SqlitePool,
    ctx: &AuthContext,
    input: &CreateLeaveInput,
) -> Result<LeaveRequestDetail, ServiceError> {
    let parsed = parse_fields(
        &input.leave_type,
        &input.start_date,
        &input.end_date,
        input.reason.as_deref(),
    )?;

    if parsed.start > parsed.end {
        return Err(ServiceError::validation("Start date must be before end date"));
    }

    let today = Utc::now().date_naive();
    match parsed.leave_type {
        LeaveType::Sick => {
            if parsed.start < today - Duration::days(SICK_BACKDATE_DAYS) {
                return Err(ServiceError::validation(
                    "Sick leave can start at most 30 days in the past",
                ));
            }
        }
        _ => {
            if parsed.start < today {
                return Err(ServiceError::validation("Start date cannot be in the past"));
            }
        }
    }

    let days_requested = workdays::business_days(parsed.start, parsed.end);
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| ServiceError::infra(e, FAILED_CREATE))?;

    if overlap_exists_in_tx(&mut tx, &ctx.user_id, &id, parsed.start, parsed.end, FAILED_CREATE)
        .await?
    {
        return Err(ServiceError::validation(OVERLAP));
    }

    sqlx::query(
        r#"
        INSERT INTO leave_requests
            (id, user_id, leave_type, start_date, end_date, reason,
             status, days_requested, requested_at)
        VALUES (?, ?, ?, ?, ?, ?, 'pending', ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&ctx.user_id)
    .bind(parsed.leave_type)
    .bind(parsed.start)
    .bind(parsed.end)
    .bind(&parsed.reason)
    .bind(days_requested)
    .bind(now)
    .execute(&mut *tx)
    .await
    .map_err(|e| ServiceError::infra(e, FAILED_CREATE))?;

    tx.commit()
        .await
        .map_err(|e| ServiceError::infra(e, FAILED_CREATE))?;

    fetch_detail(pool, &id)
        .await?
        .ok_or_else(|| ServiceError::Internal(FAILED_CREATE.into()))
}

/// List leave requests, most recently submitted first. Non-admin callers are
/// silently narrowed to their own requests regardless of any `user_id`
/// filter; admins may scope to one employee or see everything.
pub async fn list(
    pool: &SqlitePool,
    ctx: &AuthContext,
    filter: &LeaveFilter,
) -> Result<LeaveListing, ServiceError> {
    let owner_scope: Option<&str> = if ctx.is_admin() {
        filter.user_id.as_deref()
    } else {
        Some(ctx.user_id.as_str())
    };

    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<&str> = Vec::new();

    if let Some(owner) = owner_scope {
        where_sql.push_str(" AND lr.user_id = ?");
        args.push(owner);
    }
    if let Some(status) = filter.status.as_deref() {
        if status != "all" {
            where_sql.push_str(" AND lr.status = ?");
            args.push(status);
        }
    }

    match (filter.page, filter.limit) {
        (Some(page), Some(limit)) if page > 0 && limit > 0 => {
            let count_sql = format!(
                "SELECT COUNT(*) FROM leave_requests lr JOIN users u ON u.id = lr.user_id{where_sql}"
            );
            let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
            for arg in &args {
                count_q = count_q.bind(*arg);
            }
            let total = count_q
                .fetch_one(pool)
                .await
                .map_err(|e| ServiceError::infra(e, FAILED_LIST))?;

            let data_sql =
                format!("{DETAIL_SELECT}{where_sql} ORDER BY lr.requested_at DESC LIMIT ? OFFSET ?");
            let mut data_q = sqlx::query_as::<_, LeaveRequestDetail>(&data_sql);
            for arg in &args {
                data_q = data_q.bind(*arg);
            }
            // Offset math in i64: u32 page/limit are caller-supplied and
            // their product can overflow u32.
            let offset = i64::from(page - 1) * i64::from(limit);
            let items = data_q
                .bind(i64::from(limit))
                .bind(offset)
                .fetch_all(pool)
                .await
                .map_err(|e| ServiceError::infra(e, FAILED_LIST))?;

            // div_ceil spelled out by hand: this toolchain's std still gates
            // i64::div_ceil behind `int_roundings`. Exact for limit > 0.
            let limit_i64 = i64::from(limit);
            let total_pages =
                u32::try_from(total / limit_i64 + i64::from(total % limit_i64 > 0))
                    .unwrap_or(u32::MAX);
            Ok(LeaveListing::Paged {
                items,
                pagination: Pagination {
                    total,
                    page,
                    limit,
                    total_pages,
                },
            })
        }
        _ => {
            let data_sql = format!("{DETAIL_SELECT}{where_sql} ORDER BY lr.requested_at DESC");
            let mut data_q = sqlx::query_as::<_, LeaveRequestDetail>(&data_sql);
            for arg in &args {
                data_q = data_q.bind(*arg);
            }
            let items = data_q
                .fetch_all(pool)
                .await
                .map_err(|e| ServiceError::infra(e, FAILED_LIST))?;
            Ok(LeaveListing::Full(items))
        }
    }
}

/// Fetch one request. Owners and admins only.
pub async fn get_by_id(
    pool: &SqlitePool,
    ctx: &AuthContext,
    id: &str,
) -> Result<LeaveRequestDetail, ServiceError> {
    let detail = fetch_detail(pool, id)
        .await?
        .ok_or_else(|| ServiceError::not_found(NOT_FOUND))?;

    if !ctx.is_admin() && detail.user_id != ctx.user_id {
        return Err(ServiceError::unauthorized());
    }
    Ok(detail)
}

async fn fetch_row_in_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    id: &str,
    public_msg: &str,
) -> Result<LeaveRequest, ServiceError> {
    sqlx::query_as::<_, LeaveRequest>(
        r#"
        SELECT id, user_id, leave_type, start_date, end_date, reason, status,
               days_requested, requested_at, reviewed_at, reviewed_by, admin_comment
        FROM leave_requests
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(|e| ServiceError::infra(e, public_msg))?
    .ok_or_else(|| ServiceError::not_found(NOT_FOUND))
}

/// Formally review a pending request. One-shot: once approved or rejected,
/// this path refuses the request forever; only [`admin_edit`] can move it
/// again. Approval settles the balance ledger in the same transaction, so an
/// insufficient balance leaves the request pending.
pub async fn review(
    pool: &SqlitePool,
    ctx: &AuthContext,
    id: &str,
    input: &ReviewInput,
) -> Result<LeaveRequestDetail, ServiceError> {
    if !ctx.is_admin() {
        return Err(ServiceError::unauthorized());
    }

    let new_status = input
        .status
        .parse::<LeaveStatus>()
        .ok()
        .filter(|s| matches!(s, LeaveStatus::Approved | LeaveStatus::Rejected))
        .ok_or_else(|| ServiceError::validation("Status must be approved or rejected"))?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| ServiceError::infra(e, FAILED_UPDATE))?;

    let current = fetch_row_in_tx(&mut tx, id, FAILED_UPDATE).await?;
    if current.status != LeaveStatus::Pending {
        return Err(ServiceError::conflict("Can only review pending requests"));
    }

    if new_status == LeaveStatus::Approved {
        balance::deduct_in_tx(&mut tx, &current.user_id, current.leave_type, current.days_requested)
            .await?;
    }

    sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = ?, admin_comment = ?, reviewed_at = ?, reviewed_by = ?
        WHERE id = ?
        "#,
    )
    .bind(new_status)
    .bind(&input.review_note)
    .bind(Utc::now())
    .bind(&ctx.user_id)
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(|e| ServiceError::infra(e, FAILED_UPDATE))?;

    tx.commit()
        .await
        .map_err(|e| ServiceError::infra(e, FAILED_UPDATE))?;

    fetch_detail(pool, id)
        .await?
        .ok_or_else(|| ServiceError::not_found(NOT_FOUND))
}

/// Owner edit of a still-pending request. The new range is re-checked for
/// overlap against the owner's other non-rejected requests. Clears review
/// metadata, which should already be empty for a pending row.
pub async fn owner_edit(
    pool: &SqlitePool,
    ctx: &AuthContext,
    id: &str,
    input: &EditLeaveInput,
) -> Result<LeaveRequestDetail, ServiceError> {
    let parsed = parse_fields(
        &input.leave_type,
        &input.start_date,
        &input.end_date,
        input.reason.as_deref(),
    )?;
    if parsed.start > parsed.end {
        return Err(ServiceError::validation("Start date must be before end date"));
    }

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| ServiceError::infra(e, FAILED_UPDATE))?;

    let current = fetch_row_in_tx(&mut tx, id, FAILED_UPDATE).await?;
    if current.user_id != ctx.user_id {
        return Err(ServiceError::Unauthorized(
            "Unauthorized to edit this request".into(),
        ));
    }
    if current.status != LeaveStatus::Pending {
        return Err(ServiceError::conflict("Only pending requests can be edited"));
    }
    if overlap_exists_in_tx(&mut tx, &current.user_id, id, parsed.start, parsed.end, FAILED_UPDATE)
        .await?
    {
        return Err(ServiceError::validation(OVERLAP));
    }

    let days_requested = workdays::business_days(parsed.start, parsed.end);

    sqlx::query(
        r#"
        UPDATE leave_requests
        SET leave_type = ?, start_date = ?, end_date = ?, reason = ?,
            days_requested = ?, reviewed_at = NULL, reviewed_by = NULL
        WHERE id = ?
        "#,
    )
    .bind(parsed.leave_type)
    .bind(parsed.start)
    .bind(parsed.end)
    .bind(&parsed.reason)
    .bind(days_requested)
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(|e| ServiceError::infra(e, FAILED_UPDATE))?;

    tx.commit()
        .await
        .map_err(|e| ServiceError::infra(e, FAILED_UPDATE))?;

    fetch_detail(pool, id)
        .await?
        .ok_or_else(|| ServiceError::not_found(NOT_FOUND))
}

/// Admin edit of any request, pending or not. The new range is re-checked for
/// overlap unless the request ends up rejected, since rejected requests do
/// not participate in the overlap rule. If a status is supplied and differs
/// from the current one, review metadata is re-stamped with this caller;
/// moving a request back to pending deliberately keeps the previous reviewer
/// trail.
pub async fn admin_edit(
    pool: &SqlitePool,
    ctx: &AuthContext,
    id: &str,
    input: &AdminEditInput,
) -> Result<LeaveRequestDetail, ServiceError> {
    if !ctx.is_admin() {
        return Err(ServiceError::unauthorized());
    }

    let parsed = parse_fields(
        &input.leave_type,
        &input.start_date,
        &input.end_date,
        input.reason.as_deref(),
    )?;
    if parsed.start > parsed.end {
        return Err(ServiceError::validation("Start date must be before end date"));
    }

    let new_status = match input.status.as_deref() {
        Some(raw) => Some(
            raw.parse::<LeaveStatus>()
                .map_err(|_| ServiceError::validation("Invalid value for field(s): status"))?,
        ),
        None => None,
    };

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| ServiceError::infra(e, FAILED_UPDATE))?;

    let current = fetch_row_in_tx(&mut tx, id, FAILED_UPDATE).await?;

    let resulting_status = new_status.unwrap_or(current.status);
    if resulting_status != LeaveStatus::Rejected
        && overlap_exists_in_tx(&mut tx, &current.user_id, id, parsed.start, parsed.end, FAILED_UPDATE)
            .await?
    {
        return Err(ServiceError::validation(OVERLAP));
    }

    let days_requested = workdays::business_days(parsed.start, parsed.end);

    match new_status {
        Some(status) if status != current.status => {
            sqlx::query(
                r#"
                UPDATE leave_requests
                SET leave_type = ?, start_date = ?, end_date = ?, reason = ?,
                    days_requested = ?, status = ?, reviewed_at = ?, reviewed_by = ?
                WHERE id = ?
                "#,
            )
            .bind(parsed.leave_type)
            .bind(parsed.start)
            .bind(parsed.end)
            .bind(&parsed.reason)
            .bind(days_requested)
            .bind(status)
            .bind(Utc::now())
            .bind(&ctx.user_id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| ServiceError::infra(e, FAILED_UPDATE))?;
        }
        _ => {
            sqlx::query(
                r#"
                UPDATE leave_requests
                SET leave_type = ?, start_date = ?, end_date = ?, reason = ?,
                    days_requested = ?
                WHERE id = ?
                "#,
            )
            .bind(parsed.leave_type)
            .bind(parsed.start)
            .bind(parsed.end)
            .bind(&parsed.reason)
            .bind(days_requested)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| ServiceError::infra(e, FAILED_UPDATE))?;
        }
    }

    tx.commit()
        .await
        .map_err(|e| ServiceError::infra(e, FAILED_UPDATE))?;

    fetch_detail(pool, id)
        .await?
        .ok_or_else(|| ServiceError::not_found(NOT_FOUND))
}
