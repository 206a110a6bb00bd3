use crate::auth::auth::AuthUser;
use crate::model::leave_request::LeaveRequestDetail;
use crate::service::error::ServiceError;
use crate::service::leave::{
    self, AdminEditInput, CreateLeaveInput, EditLeaveInput, LeaveFilter, ReviewInput,
};
use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

/* =========================
Create leave request
========================= */
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = CreateLeaveInput,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted", body = LeaveRequestDetail),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateLeaveInput>,
) -> Result<HttpResponse, ServiceError> {
    let created = leave::create(pool.get_ref(), &auth.context(), &payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/* =========================
List leave requests
========================= */
#[utoipa::path(
    get,
    path = "/api/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Leave requests, full set or a page", body = Object),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<LeaveFilter>,
) -> Result<HttpResponse, ServiceError> {
    let listing = leave::list(pool.get_ref(), &auth.context(), &query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(listing))
}

/* =========================
Get one leave request
========================= */
#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequestDetail),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let detail = leave::get_by_id(pool.get_ref(), &auth.context(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/* =========================
Review leave request (admin, one-shot)
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/review",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to review")
    ),
    request_body = ReviewInput,
    responses(
        (status = 200, description = "Leave request reviewed", body = LeaveRequestDetail),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Can only review pending requests")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn review_leave(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    payload: web::Json<ReviewInput>,
) -> Result<HttpResponse, ServiceError> {
    let updated =
        leave::review(pool.get_ref(), &auth.context(), &path.into_inner(), &payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/* =========================
Owner edit (pending only)
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to edit")
    ),
    request_body = EditLeaveInput,
    responses(
        (status = 200, description = "Leave request updated", body = LeaveRequestDetail),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Unauthorized to edit this request"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Only pending requests can be edited")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn update_leave(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    payload: web::Json<EditLeaveInput>,
) -> Result<HttpResponse, ServiceError> {
    let updated =
        leave::owner_edit(pool.get_ref(), &auth.context(), &path.into_inner(), &payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/* =========================
Admin edit (any state)
========================= */
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/admin",
    params(
        ("leave_id" = String, Path, description = "ID of the leave request to edit")
    ),
    request_body = AdminEditInput,
    responses(
        (status = 200, description = "Leave request updated", body = LeaveRequestDetail),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn admin_update_leave(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<String>,
    payload: web::Json<AdminEditInput>,
) -> Result<HttpResponse, ServiceError> {
    let updated =
        leave::admin_edit(pool.get_ref(), &auth.context(), &path.into_inner(), &payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}
