use crate::model::leave_request::{LeaveRequest, LeaveRequestDetail, LeaveStatus, LeaveType};
use crate::model::role::Role;
use crate::model::user::User;
use crate::models::LoginReqDto;
use crate::service::balance::LeaveBalance;
use crate::service::employee::{CreateEmployeeInput, EmployeeListPage, EmployeeQuery};
use crate::service::leave::{
    AdminEditInput, CreateLeaveInput, EditLeaveInput, LeaveFilter, Pagination, ReviewInput,
};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave Management API",
        version = "1.0.0",
        description = r#"
## Leave Management System

Employee records, leave-request submission and approval, and per-user leave
balances.

### Key Features
- **Leave Requests**
  - Submit, list, and view leave requests
  - Admin review (approve/reject) and edit paths
  - Business-day counting and overlap protection
- **Employee Directory**
  - Admin-only employee creation and listing
- **Leave Balances**
  - Annual and sick allotments, settled on approval

### Security
Protected endpoints use **JWT Bearer authentication**.

Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::review_leave,
        crate::api::leave_request::update_leave,
        crate::api::leave_request::admin_update_leave,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
    ),
    components(
        schemas(
            Role,
            LeaveType,
            LeaveStatus,
            LeaveRequest,
            LeaveRequestDetail,
            LeaveFilter,
            CreateLeaveInput,
            EditLeaveInput,
            AdminEditInput,
            ReviewInput,
            Pagination,
            LeaveBalance,
            User,
            CreateEmployeeInput,
            EmployeeQuery,
            EmployeeListPage,
            LoginReqDto
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Leave", description = "Leave management APIs"),
        (name = "Employee", description = "Employee directory APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
