//! Integration tests for scoring previews, rankings and summary metrics.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, TestApp};
use serde_json::json;
use tms_core::roles::Role;

/// Create a ticket as `token`, put `assignees` on it and complete it with
/// the given effort checklist. Returns the ticket id.
async fn complete_ticket(
    app: &TestApp,
    token: &str,
    assignees: &[uuid::Uuid],
    effort: serde_json::Value,
) -> String {
    let ticket = app
        .create_ticket(
            Some(token),
            json!({ "initialType": "SERVICE_REQUEST_GENERAL", "title": "Work item" }),
        )
        .await;
    let id = ticket["id"].as_str().unwrap().to_string();

    let response = app
        .post_json(
            &format!("/api/v1/tickets/{id}/assign"),
            Some(token),
            json!({ "assigneeIds": assignees }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let uri = format!("/api/v1/tickets/{id}/status");
    for body in [
        json!({ "status": "in_progress" }),
        json!({ "status": "completed", "effortData": effort }),
    ] {
        let response = app.post_json(&uri, Some(token), body).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    id
}

// ---------------------------------------------------------------------------
// Previews
// ---------------------------------------------------------------------------

#[tokio::test]
async fn priority_preview_scores_questionnaire() {
    let app = build_test_app();

    let response = app
        .post_json(
            "/api/v1/priority/compute",
            None,
            json!({
                "impact": { "lostRevenue": true, "coreProcesses": true, "dataLoss": true },
                "urgency": "3-7d"
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["impact"], 6);
    assert_eq!(data["urgency"], 3);
    assert_eq!(data["final"], 9);
    assert_eq!(data["redFlag"], false);
    assert_eq!(data["priority"], "P1");
}

#[tokio::test]
async fn priority_preview_red_flag_short_circuits() {
    let app = build_test_app();

    let response = app
        .post_json(
            "/api/v1/priority/compute",
            None,
            json!({ "redFlags": { "paymentsFailing": true }, "urgency": "≥31d" }),
        )
        .await;

    let data = &body_json(response).await["data"];
    assert_eq!(data["final"], 10);
    assert_eq!(data["impact"], 0);
    assert_eq!(data["urgency"], 0);
    assert_eq!(data["priority"], "P0");
}

#[tokio::test]
async fn effort_preview_includes_collaboration_bonus() {
    let app = build_test_app();

    let response = app
        .post_json(
            "/api/v1/effort/compute",
            None,
            json!({
                "development": { "versionControl": true },
                "data": { "migration": true, "encryption": true },
                "assigneeCount": 3
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["base"], 3);
    assert_eq!(data["bonusPerPerson"], 4);
    assert_eq!(data["totalForDistribution"], 15.0);
    assert_eq!(data["perPerson"], 5.0);
}

#[tokio::test]
async fn effort_preview_defaults_to_one_person() {
    let app = build_test_app();

    let response = app
        .post_json(
            "/api/v1/effort/compute",
            None,
            json!({ "operations": { "offHours": true, "training": true, "uat": true } }),
        )
        .await;

    let data = &body_json(response).await["data"];
    assert_eq!(data["base"], 3);
    assert_eq!(data["bonusPerPerson"], 0);
    assert_eq!(data["perPerson"], 3.0);
}

// ---------------------------------------------------------------------------
// Rankings and summary
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rankings_order_users_by_points() {
    let app = build_test_app();
    let (_, manager) = app.user("Max", Role::Manager);
    let (ana, _) = app.user("Ana", Role::User);
    let (bo, _) = app.user("Bo", Role::User);

    // Ana alone: base 2, no bonus.
    complete_ticket(
        &app,
        &manager,
        &[ana],
        json!({ "development": { "versionControl": true, "externalService": true } }),
    )
    .await;
    // Ana and Bo: base 2 + 2 * 2 = 6, three each.
    complete_ticket(
        &app,
        &manager,
        &[ana, bo],
        json!({ "security": { "legalCompliance": true, "personalData": true } }),
    )
    .await;

    let response = app.get("/api/v1/rankings?limit=2").await;
    assert_eq!(response.status(), StatusCode::OK);
    let rows = body_json(response).await["data"].as_array().unwrap().clone();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Ana");
    assert_eq!(rows[0]["totalPoints"], 5.0);
    assert_eq!(rows[0]["ticketsCompleted"], 2);
    assert_eq!(rows[0]["rank"], 1);
    assert_eq!(rows[1]["name"], "Bo");
    assert_eq!(rows[1]["totalPoints"], 3.0);
    assert_eq!(rows[1]["rank"], 2);
}

#[tokio::test]
async fn summary_counts_by_status_and_issue_bucket() {
    let app = build_test_app();
    let (_, manager) = app.user("Max", Role::Manager);

    let issue = app
        .create_ticket(
            Some(&manager),
            json!({ "initialType": "ISSUE_REPORT", "title": "Totals off" }),
        )
        .await;
    app.post_json(
        &format!("/api/v1/tickets/{}/classify", issue["id"].as_str().unwrap()),
        Some(&manager),
        json!({ "resolvedType": "EMERGENCY_CHANGE" }),
    )
    .await;

    let rejected = app
        .create_ticket(
            Some(&manager),
            json!({ "initialType": "ISSUE_REPORT", "title": "Not a bug" }),
        )
        .await;
    app.post_json(
        &format!("/api/v1/tickets/{}/status", rejected["id"].as_str().unwrap()),
        Some(&manager),
        json!({ "status": "canceled" }),
    )
    .await;

    app.create_ticket(
        Some(&manager),
        json!({ "initialType": "SERVICE_REQUEST_ADVISORY", "title": "Advice" }),
    )
    .await;

    let response = app.get("/api/v1/metrics/summary").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];

    assert_eq!(data["total"], 3);
    assert_eq!(data["statusCounts"]["pending"], 2);
    assert_eq!(data["statusCounts"]["canceled"], 1);
    assert_eq!(data["categoryCounts"]["EMERGENCY_CHANGE"], 1);
    assert_eq!(data["categoryCounts"]["ISSUE_REPORT"], 1);
    assert_eq!(data["categoryCounts"]["SERVICE_REQUEST_ADVISORY"], 1);
    assert_eq!(data["issueReportCounts"]["Emergency Change"], 1);
    assert_eq!(data["issueReportCounts"]["Rejected"], 1);
    assert!(data["issueReportCounts"].get("Unclassified").is_none());
}
