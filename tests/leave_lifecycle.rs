//! End-to-end lifecycle tests for the leave-request service, run against a
//! fresh migrated SQLite database per test.

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use leavedesk::model::leave_request::LeaveStatus;
use leavedesk::model::role::Role;
use leavedesk::service::context::AuthContext;
use leavedesk::service::error::ServiceError;
use leavedesk::service::leave::{
    self, AdminEditInput, CreateLeaveInput, EditLeaveInput, LeaveFilter, LeaveListing, ReviewInput,
};
use sqlx::SqlitePool;

const ADMIN_ID: &str = "admin-1";
const U1: &str = "user-1";
const U2: &str = "user-2";

async fn seed_user(pool: &SqlitePool, id: &str, email: &str, role: &str, vacation: i64, sick: i64) {
    sqlx::query(
        r#"
        INSERT INTO users (id, email, password, first_name, last_name, role, vacation_days, sick_days)
        VALUES (?, ?, 'x', 'Test', ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(id)
    .bind(role)
    .bind(vacation)
    .bind(sick)
    .execute(pool)
    .await
    .unwrap();
}

async fn seed_defaults(pool: &SqlitePool) {
    seed_user(pool, ADMIN_ID, "admin@leave.test", "admin", 20, 10).await;
    seed_user(pool, U1, "u1@leave.test", "user", 20, 10).await;
    seed_user(pool, U2, "u2@leave.test", "user", 20, 10).await;
}

fn admin_ctx() -> AuthContext {
    AuthContext::new(ADMIN_ID, Role::Admin)
}

fn user_ctx(id: &str) -> AuthContext {
    AuthContext::new(id, Role::User)
}

/// First occurrence of `target` strictly after today.
fn next_weekday(target: Weekday) -> NaiveDate {
    let mut d = Utc::now().date_naive() + Duration::days(1);
    while d.weekday() != target {
        d += Duration::days(1);
    }
    d
}

fn fmt(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn input(leave_type: &str, start: NaiveDate, end: NaiveDate, reason: Option<&str>) -> CreateLeaveInput {
    CreateLeaveInput {
        leave_type: leave_type.into(),
        start_date: fmt(start),
        end_date: fmt(end),
        reason: reason.map(String::from),
    }
}

async fn vacation_balance(pool: &SqlitePool, user_id: &str) -> i64 {
    sqlx::query_scalar("SELECT vacation_days FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test]
async fn submit_computes_business_days_and_starts_pending(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    let created = leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday, monday + Duration::days(2), Some("trip")),
    )
    .await
    .unwrap();

    assert_eq!(created.days_requested, 3);
    assert_eq!(created.status, LeaveStatus::Pending);
    assert_eq!(created.user_id, U1);
    assert_eq!(created.email, "u1@leave.test");
    assert!(created.reviewed_at.is_none());
    assert!(created.reviewed_by.is_none());
}

#[sqlx::test]
async fn weekend_span_counts_only_weekdays(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let friday = next_weekday(Weekday::Fri);
    let created = leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", friday, friday + Duration::days(3), None),
    )
    .await
    .unwrap();

    // Friday and Monday only.
    assert_eq!(created.days_requested, 2);
}

#[sqlx::test]
async fn start_after_end_is_rejected(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    let err = leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday + Duration::days(2), monday, None),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(err.to_string(), "Start date must be before end date");
}

#[sqlx::test]
async fn annual_leave_may_not_start_in_the_past(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let today = Utc::now().date_naive();
    let err = leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", today - Duration::days(1), today + Duration::days(1), None),
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Start date cannot be in the past");

    // Today itself is allowed.
    leave::create(&pool, &user_ctx(U1), &input("annual", today, today, None))
        .await
        .unwrap();
}

#[sqlx::test]
async fn sick_leave_backdate_boundary_is_thirty_days(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let today = Utc::now().date_naive();

    let ok = leave::create(
        &pool,
        &user_ctx(U1),
        &input("sick", today - Duration::days(30), today - Duration::days(30), None),
    )
    .await;
    assert!(ok.is_ok());

    let err = leave::create(
        &pool,
        &user_ctx(U2),
        &input("sick", today - Duration::days(31), today - Duration::days(31), None),
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Sick leave can start at most 30 days in the past"
    );
}

#[sqlx::test]
async fn malformed_input_names_the_offending_fields(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let err = leave::create(
        &pool,
        &user_ctx(U1),
        &CreateLeaveInput {
            leave_type: "holiday".into(),
            start_date: "not-a-date".into(),
            end_date: "2026-01-07".into(),
            reason: None,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid value for field(s): leave_type, start_date"
    );
}

#[sqlx::test]
async fn overlapping_request_is_rejected(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday, monday + Duration::days(2), Some("trip")),
    )
    .await
    .unwrap();

    // Tuesday through Thursday overlaps the pending Monday-Wednesday request.
    let err = leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday + Duration::days(1), monday + Duration::days(3), None),
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "You have overlapping leave requests for these dates"
    );

    // A different user is free to book the same dates.
    leave::create(
        &pool,
        &user_ctx(U2),
        &input("annual", monday + Duration::days(1), monday + Duration::days(3), None),
    )
    .await
    .unwrap();
}

#[sqlx::test]
async fn overlap_with_rejected_request_is_allowed(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    let first = leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday, monday + Duration::days(2), None),
    )
    .await
    .unwrap();

    leave::review(
        &pool,
        &admin_ctx(),
        &first.id,
        &ReviewInput {
            status: "rejected".into(),
            review_note: Some("coverage gap".into()),
        },
    )
    .await
    .unwrap();

    leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday, monday + Duration::days(2), None),
    )
    .await
    .unwrap();
}

#[sqlx::test]
async fn review_approves_stamps_reviewer_and_settles_balance(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    let created = leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday, monday + Duration::days(2), Some("trip")),
    )
    .await
    .unwrap();

    let reviewed = leave::review(
        &pool,
        &admin_ctx(),
        &created.id,
        &ReviewInput {
            status: "approved".into(),
            review_note: Some("ok".into()),
        },
    )
    .await
    .unwrap();

    assert_eq!(reviewed.status, LeaveStatus::Approved);
    assert_eq!(reviewed.reviewed_by.as_deref(), Some(ADMIN_ID));
    assert!(reviewed.reviewed_at.is_some());
    assert_eq!(reviewed.admin_comment.as_deref(), Some("ok"));

    assert_eq!(vacation_balance(&pool, U1).await, 17);
}

#[sqlx::test]
async fn review_requires_admin(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    let created = leave::create(&pool, &user_ctx(U1), &input("annual", monday, monday, None))
        .await
        .unwrap();

    let err = leave::review(
        &pool,
        &user_ctx(U1),
        &created.id,
        &ReviewInput {
            status: "approved".into(),
            review_note: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized(_)));
}

#[sqlx::test]
async fn review_is_one_shot(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    let created = leave::create(&pool, &user_ctx(U1), &input("annual", monday, monday, None))
        .await
        .unwrap();

    let first = leave::review(
        &pool,
        &admin_ctx(),
        &created.id,
        &ReviewInput {
            status: "approved".into(),
            review_note: None,
        },
    )
    .await
    .unwrap();

    let err = leave::review(
        &pool,
        &admin_ctx(),
        &created.id,
        &ReviewInput {
            status: "rejected".into(),
            review_note: Some("changed my mind".into()),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(err.to_string(), "Can only review pending requests");

    // State reflects only the first review.
    let current = leave::get_by_id(&pool, &admin_ctx(), &created.id).await.unwrap();
    assert_eq!(current.status, LeaveStatus::Approved);
    assert_eq!(current.reviewed_at, first.reviewed_at);
    assert!(current.admin_comment.as_deref() != Some("changed my mind"));
}

#[sqlx::test]
async fn review_of_missing_request_is_not_found(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let err = leave::review(
        &pool,
        &admin_ctx(),
        "no-such-id",
        &ReviewInput {
            status: "approved".into(),
            review_note: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(err.to_string(), "Leave request not found");
}

#[sqlx::test]
async fn insufficient_balance_fails_review_and_leaves_request_pending(pool: SqlitePool) {
    seed_user(&pool, ADMIN_ID, "admin@leave.test", "admin", 20, 10).await;
    seed_user(&pool, U1, "u1@leave.test", "user", 1, 10).await;

    let monday = next_weekday(Weekday::Mon);
    let created = leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday, monday + Duration::days(2), None),
    )
    .await
    .unwrap();

    let err = leave::review(
        &pool,
        &admin_ctx(),
        &created.id,
        &ReviewInput {
            status: "approved".into(),
            review_note: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Insufficient vacation days");

    let current = leave::get_by_id(&pool, &admin_ctx(), &created.id).await.unwrap();
    assert_eq!(current.status, LeaveStatus::Pending);
    assert_eq!(vacation_balance(&pool, U1).await, 1);
}

#[sqlx::test]
async fn unpaid_approval_does_not_touch_balances(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    let created = leave::create(
        &pool,
        &user_ctx(U1),
        &input("unpaid", monday, monday + Duration::days(4), None),
    )
    .await
    .unwrap();

    leave::review(
        &pool,
        &admin_ctx(),
        &created.id,
        &ReviewInput {
            status: "approved".into(),
            review_note: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(vacation_balance(&pool, U1).await, 20);
}

#[sqlx::test]
async fn list_narrows_non_admin_callers_to_their_own_requests(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    leave::create(&pool, &user_ctx(U1), &input("annual", monday, monday, None))
        .await
        .unwrap();
    leave::create(
        &pool,
        &user_ctx(U2),
        &input("annual", monday + Duration::days(7), monday + Duration::days(7), None),
    )
    .await
    .unwrap();

    // No filters: only U2's own requests come back.
    let listing = leave::list(&pool, &user_ctx(U2), &LeaveFilter::default()).await.unwrap();
    let LeaveListing::Full(items) = listing else {
        panic!("expected unpaginated listing");
    };
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].user_id, U2);

    // An explicit user_id pointing at someone else is silently narrowed.
    let listing = leave::list(
        &pool,
        &user_ctx(U2),
        &LeaveFilter {
            user_id: Some(U1.into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let LeaveListing::Full(items) = listing else {
        panic!("expected unpaginated listing");
    };
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].user_id, U2);

    // Admins see everything.
    let listing = leave::list(&pool, &admin_ctx(), &LeaveFilter::default()).await.unwrap();
    let LeaveListing::Full(items) = listing else {
        panic!("expected unpaginated listing");
    };
    assert_eq!(items.len(), 2);
}

#[sqlx::test]
async fn list_paginates_with_metadata_most_recent_first(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    for week in 0..3 {
        leave::create(
            &pool,
            &user_ctx(U1),
            &input(
                "annual",
                monday + Duration::days(7 * week),
                monday + Duration::days(7 * week),
                None,
            ),
        )
        .await
        .unwrap();
    }

    let listing = leave::list(
        &pool,
        &admin_ctx(),
        &LeaveFilter {
            page: Some(1),
            limit: Some(2),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let LeaveListing::Paged { items, pagination } = listing else {
        panic!("expected paginated listing");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(pagination.total, 3);
    assert_eq!(pagination.page, 1);
    assert_eq!(pagination.limit, 2);
    assert_eq!(pagination.total_pages, 2);

    // Most recently submitted first.
    assert_eq!(items[0].start_date, monday + Duration::days(14));
}

#[sqlx::test]
async fn list_tolerates_out_of_range_page_numbers(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    leave::create(&pool, &user_ctx(U1), &input("annual", monday, monday, None))
        .await
        .unwrap();

    // A page far past the end returns an empty page, not an error.
    let listing = leave::list(
        &pool,
        &admin_ctx(),
        &LeaveFilter {
            page: Some(u32::MAX),
            limit: Some(2),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let LeaveListing::Paged { items, pagination } = listing else {
        panic!("expected paginated listing");
    };
    assert!(items.is_empty());
    assert_eq!(pagination.total, 1);
    assert_eq!(pagination.total_pages, 1);
}

#[sqlx::test]
async fn list_filters_by_status(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    let first = leave::create(&pool, &user_ctx(U1), &input("annual", monday, monday, None))
        .await
        .unwrap();
    leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday + Duration::days(7), monday + Duration::days(7), None),
    )
    .await
    .unwrap();

    leave::review(
        &pool,
        &admin_ctx(),
        &first.id,
        &ReviewInput {
            status: "approved".into(),
            review_note: None,
        },
    )
    .await
    .unwrap();

    let listing = leave::list(
        &pool,
        &admin_ctx(),
        &LeaveFilter {
            status: Some("approved".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let LeaveListing::Full(items) = listing else {
        panic!("expected unpaginated listing");
    };
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, first.id);

    // "all" is a sentinel, not a status.
    let listing = leave::list(
        &pool,
        &admin_ctx(),
        &LeaveFilter {
            status: Some("all".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let LeaveListing::Full(items) = listing else {
        panic!("expected unpaginated listing");
    };
    assert_eq!(items.len(), 2);
}

#[sqlx::test]
async fn get_by_id_enforces_owner_or_admin(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    let created = leave::create(&pool, &user_ctx(U1), &input("annual", monday, monday, None))
        .await
        .unwrap();

    assert!(leave::get_by_id(&pool, &user_ctx(U1), &created.id).await.is_ok());
    assert!(leave::get_by_id(&pool, &admin_ctx(), &created.id).await.is_ok());

    let err = leave::get_by_id(&pool, &user_ctx(U2), &created.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized(_)));

    let err = leave::get_by_id(&pool, &admin_ctx(), "no-such-id").await.unwrap_err();
    assert_eq!(err.to_string(), "Leave request not found");
}

#[sqlx::test]
async fn owner_edit_recomputes_days_and_requires_pending_ownership(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    let created = leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday, monday + Duration::days(1), None),
    )
    .await
    .unwrap();
    assert_eq!(created.days_requested, 2);

    let edited = leave::owner_edit(
        &pool,
        &user_ctx(U1),
        &created.id,
        &EditLeaveInput {
            leave_type: "annual".into(),
            start_date: fmt(monday),
            end_date: fmt(monday + Duration::days(4)),
            reason: Some("longer trip".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(edited.days_requested, 5);
    assert_eq!(edited.status, LeaveStatus::Pending);
    assert!(edited.reviewed_at.is_none());
    assert!(edited.reviewed_by.is_none());

    // Someone else's request.
    let err = leave::owner_edit(
        &pool,
        &user_ctx(U2),
        &created.id,
        &EditLeaveInput {
            leave_type: "annual".into(),
            start_date: fmt(monday),
            end_date: fmt(monday),
            reason: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Unauthorized to edit this request");

    // Once reviewed, the owner path is closed.
    leave::review(
        &pool,
        &admin_ctx(),
        &created.id,
        &ReviewInput {
            status: "approved".into(),
            review_note: None,
        },
    )
    .await
    .unwrap();
    let err = leave::owner_edit(
        &pool,
        &user_ctx(U1),
        &created.id,
        &EditLeaveInput {
            leave_type: "annual".into(),
            start_date: fmt(monday),
            end_date: fmt(monday),
            reason: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
    assert_eq!(err.to_string(), "Only pending requests can be edited");
}

#[sqlx::test]
async fn owner_edit_cannot_move_onto_another_request(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday, monday + Duration::days(1), None),
    )
    .await
    .unwrap();
    let second = leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday + Duration::days(7), monday + Duration::days(8), None),
    )
    .await
    .unwrap();

    // Editing the second request onto the first one's dates must fail.
    let err = leave::owner_edit(
        &pool,
        &user_ctx(U1),
        &second.id,
        &EditLeaveInput {
            leave_type: "annual".into(),
            start_date: fmt(monday),
            end_date: fmt(monday + Duration::days(1)),
            reason: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "You have overlapping leave requests for these dates"
    );

    // The request's own current dates are not counted against it.
    leave::owner_edit(
        &pool,
        &user_ctx(U1),
        &second.id,
        &EditLeaveInput {
            leave_type: "annual".into(),
            start_date: fmt(monday + Duration::days(7)),
            end_date: fmt(monday + Duration::days(9)),
            reason: None,
        },
    )
    .await
    .unwrap();
}

#[sqlx::test]
async fn admin_edit_rechecks_overlap_unless_rejecting(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday, monday + Duration::days(1), None),
    )
    .await
    .unwrap();
    let second = leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday + Duration::days(7), monday + Duration::days(8), None),
    )
    .await
    .unwrap();

    let onto_first = |status: Option<&str>| AdminEditInput {
        leave_type: "annual".into(),
        start_date: fmt(monday),
        end_date: fmt(monday + Duration::days(1)),
        reason: None,
        status: status.map(String::from),
    };

    let err = leave::admin_edit(&pool, &admin_ctx(), &second.id, &onto_first(None))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "You have overlapping leave requests for these dates"
    );

    // Rejected requests sit outside the overlap rule, so rejecting while
    // moving the dates is fine.
    let rejected = leave::admin_edit(&pool, &admin_ctx(), &second.id, &onto_first(Some("rejected")))
        .await
        .unwrap();
    assert_eq!(rejected.status, LeaveStatus::Rejected);
    assert_eq!(rejected.start_date, monday);
}

#[sqlx::test]
async fn admin_edit_is_the_rereview_escape_hatch(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    let created = leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday, monday + Duration::days(2), None),
    )
    .await
    .unwrap();

    let approved = leave::review(
        &pool,
        &admin_ctx(),
        &created.id,
        &ReviewInput {
            status: "approved".into(),
            review_note: None,
        },
    )
    .await
    .unwrap();

    // Flip the approved request to rejected; review() cannot do this.
    let flipped = leave::admin_edit(
        &pool,
        &admin_ctx(),
        &created.id,
        &AdminEditInput {
            leave_type: "annual".into(),
            start_date: fmt(monday),
            end_date: fmt(monday + Duration::days(2)),
            reason: None,
            status: Some("rejected".into()),
        },
    )
    .await
    .unwrap();

    assert_eq!(flipped.status, LeaveStatus::Rejected);
    assert_eq!(flipped.reviewed_by.as_deref(), Some(ADMIN_ID));
    assert!(flipped.reviewed_at >= approved.reviewed_at);

    // Non-admins never reach this path.
    let err = leave::admin_edit(
        &pool,
        &user_ctx(U1),
        &created.id,
        &AdminEditInput {
            leave_type: "annual".into(),
            start_date: fmt(monday),
            end_date: fmt(monday),
            reason: None,
            status: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized(_)));
}

#[sqlx::test]
async fn admin_edit_without_status_change_keeps_review_metadata(pool: SqlitePool) {
    seed_defaults(&pool).await;

    let monday = next_weekday(Weekday::Mon);
    let created = leave::create(
        &pool,
        &user_ctx(U1),
        &input("annual", monday, monday + Duration::days(2), None),
    )
    .await
    .unwrap();

    let approved = leave::review(
        &pool,
        &admin_ctx(),
        &created.id,
        &ReviewInput {
            status: "approved".into(),
            review_note: Some("ok".into()),
        },
    )
    .await
    .unwrap();

    // Same status supplied: dates change, review stamp does not.
    let edited = leave::admin_edit(
        &pool,
        &admin_ctx(),
        &created.id,
        &AdminEditInput {
            leave_type: "annual".into(),
            start_date: fmt(monday),
            end_date: fmt(monday + Duration::days(3)),
            reason: None,
            status: Some("approved".into()),
        },
    )
    .await
    .unwrap();

    assert_eq!(edited.days_requested, 4);
    assert_eq!(edited.reviewed_at, approved.reviewed_at);
}
