use crate::auth::auth::AuthUser;
use crate::model::user::User;
use crate::service::employee::{self, CreateEmployeeInput, EmployeeListPage, EmployeeQuery};
use crate::service::error::ServiceError;
use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployeeInput,
    responses(
        (status = 201, description = "Employee created", body = User),
        (status = 400, description = "Validation failed or email already exists"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployeeInput>,
) -> Result<HttpResponse, ServiceError> {
    let created = employee::create(pool.get_ref(), &auth.context(), &payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListPage),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, ServiceError> {
    let page = employee::list(pool.get_ref(), &auth.context(), &query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}
