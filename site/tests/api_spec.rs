mod common;

use axum::http::{header, StatusCode};
use common::*;
use inceptum_content::SubmissionStatus;
use inceptum_site::auth::SessionSettings;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn given_app_when_health_requested_then_returns_ok() {
    let (app, _) = seeded_app();
    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn given_seeded_store_when_listing_services_then_returns_active_rows_in_order() {
    let (app, store) = seeded_app();
    let first = store.list_services(inceptum_content::Visibility::All).unwrap()[0].id;
    store
        .update_service(
            first,
            inceptum_content::ServicePatch {
                is_active: Some(false),
                ..Default::default()
            },
            None,
        )
        .unwrap();

    let response = app.oneshot(get("/api/services", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let services = body.as_array().unwrap();
    assert_eq!(services.len(), 5);
    assert_eq!(services[0]["name"], "Compliance & Legal");
    assert_eq!(services[0]["isActive"], true);
}

#[tokio::test]
async fn given_missing_faq_when_fetched_then_returns_not_found_json() {
    let (app, _) = seeded_app();
    let response = app.oneshot(get("/api/faq/999", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["message"], "FAQ item not found: 999");
}

#[tokio::test]
async fn given_no_session_when_creating_faq_then_returns_unauthorized() {
    let (app, _) = seeded_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/faq",
            None,
            json!({"category": "Costs", "question": "Q?", "answer": "A"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({"code": "unauthorized", "message": "Please login"})
    );
}

#[tokio::test]
async fn given_regular_user_when_creating_faq_then_returns_forbidden() {
    let (app, _) = seeded_app();
    let token = token_for("visitor-1");
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/faq",
            Some(&token),
            json!({"category": "Costs", "question": "Q?", "answer": "A"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await,
        json!({"code": "forbidden", "message": "Unauthorized: Admin access required"})
    );
}

#[tokio::test]
async fn given_admin_when_creating_faq_then_defaults_apply_and_row_is_readable() {
    let (app, _) = seeded_app();
    let token = admin_token();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/faq",
            Some(&token),
            json!({"category": "Visas", "question": "Can my family join me?", "answer": "Yes, through dependent visas."}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["displayOrder"], 0);
    assert_eq!(created["isActive"], true);
    assert!(created["updatedBy"].is_i64());

    let id = created["id"].as_i64().unwrap();
    let response = app
        .oneshot(get(&format!("/api/faq/{id}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["question"], "Can my family join me?");
}

#[tokio::test]
async fn given_admin_when_deleting_faq_twice_then_second_delete_is_not_found() {
    let (app, store) = seeded_app();
    let token = admin_token();
    let id = store
        .list_faq_items(inceptum_content::Visibility::All)
        .unwrap()[0]
        .id;

    let uri = format!("/api/faq/{id}");
    let response = app
        .clone()
        .oneshot(json_request("DELETE", &uri, Some(&token), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true}));

    let response = app
        .oneshot(json_request("DELETE", &uri, Some(&token), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_bad_colour_when_patching_service_then_reports_field_errors() {
    let (app, store) = seeded_app();
    let id = store
        .list_services(inceptum_content::Visibility::All)
        .unwrap()[0]
        .id;
    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/services/{id}"),
            Some(&admin_token()),
            json!({"gradientFrom": "purple"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "validation_failed");
    assert_eq!(body["fields"]["gradientFrom"][0], "must be a #RRGGBB colour");
}

#[tokio::test]
async fn given_admin_when_patching_tier_features_then_only_features_change() {
    let (app, store) = seeded_app();
    let tier = store
        .list_solution_tiers(inceptum_content::Visibility::All)
        .unwrap()
        .remove(0);
    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/solution-tiers/{}", tier.id),
            Some(&admin_token()),
            json!({"features": ["Trade License", "Bank Account"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get(&format!("/api/solution-tiers/{}", tier.id), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["features"], json!(["Trade License", "Bank Account"]));
    assert_eq!(body["name"], tier.name);
    assert_eq!(body["price"], tier.price);
}

#[tokio::test]
async fn given_admin_when_updating_page_section_then_get_returns_merged_copy() {
    let (app, _) = seeded_app();
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/page-content/hero",
            Some(&admin_token()),
            json!({"title": "Launch in Dubai"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get("/api/page-content/hero", None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["title"], "Launch in Dubai");
    assert_eq!(body["subtitle"], "For Tech Startups");
}

#[tokio::test]
async fn given_unknown_section_when_fetched_then_returns_not_found() {
    let (app, _) = seeded_app();
    let response = app
        .oneshot(get("/api/page-content/careers", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_visitor_when_submitting_contact_then_row_is_new_inquiry() {
    let (app, _) = seeded_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/contact",
            None,
            json!({"name": "Noor", "email": "noor@example.com", "message": "Need a free zone license"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let row = body_json(response).await;
    assert_eq!(row["status"], "new");
    assert_eq!(row["type"], "inquiry");
    assert!(row["phone"].is_null());
}

#[tokio::test]
async fn given_invalid_email_when_submitting_contact_then_validation_fails() {
    let (app, store) = seeded_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/contact",
            None,
            json!({"name": "Noor", "email": "noor-at-example", "message": "Hi"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "validation_failed");
    assert!(store.list_submissions(None).unwrap().is_empty());
}

#[tokio::test]
async fn given_submissions_when_admin_filters_by_status_then_only_matching_rows_return() {
    let (app, store) = seeded_app();
    let token = admin_token();
    for name in ["First", "Second"] {
        store
            .create_submission(inceptum_content::NewContactSubmission {
                name: name.to_string(),
                email: "lead@example.com".to_string(),
                phone: None,
                company: None,
                message: "Hello".to_string(),
                kind: "inquiry".to_string(),
            })
            .unwrap();
    }
    let first = store.list_submissions(None).unwrap()[1].id;

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/contact/{first}/status"),
            Some(&token),
            json!({"status": "contacted", "adminNotes": "Called on WhatsApp"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/api/contact?status=contacted", Some(&token)))
        .await
        .unwrap();
    let rows = body_json(response).await;
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
    assert_eq!(rows[0]["name"], "First");
    assert_eq!(rows[0]["adminNotes"], "Called on WhatsApp");

    let response = app
        .clone()
        .oneshot(get("/api/contact", Some(&token)))
        .await
        .unwrap();
    let rows = body_json(response).await;
    assert_eq!(rows[0]["name"], "Second");

    let response = app
        .oneshot(get("/api/contact?status=archived", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(
        store.get_submission(first).unwrap().unwrap().status,
        SubmissionStatus::Contacted
    );
}

#[tokio::test]
async fn given_sessions_when_asking_me_then_returns_viewer_or_null() {
    let (app, _) = seeded_app();

    let response = app.clone().oneshot(get("/api/auth/me", None)).await.unwrap();
    assert_eq!(body_json(response).await, serde_json::Value::Null);

    let response = app
        .clone()
        .oneshot(get("/api/auth/me", Some("not-a-jwt")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::Value::Null);

    let response = app
        .oneshot(get("/api/auth/me", Some(&admin_token())))
        .await
        .unwrap();
    let me = body_json(response).await;
    assert_eq!(me["openId"], OWNER);
    assert_eq!(me["role"], "admin");
}

#[tokio::test]
async fn given_logout_when_posted_then_session_cookie_expires() {
    let (app, _) = seeded_app();
    let response = app
        .oneshot(json_request("POST", "/api/auth/logout", None, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("app_session_id=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(cookie.contains("HttpOnly"));
    assert_eq!(body_json(response).await, json!({"success": true}));
}

#[tokio::test]
async fn given_sessions_disabled_when_admin_token_presented_then_still_unauthorized() {
    let store = seeded_store();
    let app = app_with(store, SessionSettings::disabled());
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/faq",
            Some(&admin_token()),
            json!({"category": "Costs", "question": "Q?", "answer": "A"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_seeded_store_when_listing_public_tables_then_counts_match_catalogue() {
    let (app, _) = seeded_app();
    for (uri, expected) in [
        ("/api/solution-tiers", 3),
        ("/api/process-steps", 6),
        ("/api/faq", 10),
        ("/api/page-content", 9),
        ("/api/testimonials", 0),
    ] {
        let response = app.clone().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let body = body_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(expected), "{uri}");
    }
}

#[tokio::test]
async fn given_session_cookie_when_asking_me_then_returns_signed_in_user() {
    let (app, _) = seeded_app();
    let response = app
        .oneshot(cookie_get("/api/auth/me", &admin_token()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["openId"], OWNER);
    assert_eq!(me["role"], "admin");
}

#[tokio::test]
async fn given_missing_field_when_creating_faq_then_returns_validation_failed_json() {
    let (app, store) = seeded_app();
    let before = store.list_faq_items(inceptum_content::Visibility::All).unwrap().len();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/faq",
            Some(&admin_token()),
            json!({"category": "Visas", "answer": "Yes."}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "validation_failed");
    assert!(body["message"].as_str().unwrap().contains("question"));
    assert_eq!(
        store.list_faq_items(inceptum_content::Visibility::All).unwrap().len(),
        before
    );
}

#[tokio::test]
async fn given_unknown_status_when_patching_submission_then_returns_validation_failed_json() {
    let (app, store) = seeded_app();
    let row = store
        .create_submission(inceptum_content::NewContactSubmission {
            name: "Layla".to_string(),
            email: "layla@example.com".to_string(),
            phone: None,
            company: None,
            message: "Hello".to_string(),
            kind: "inquiry".to_string(),
        })
        .unwrap();
    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/contact/{}/status", row.id),
            Some(&admin_token()),
            json!({"status": "archived"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "validation_failed");
    assert_eq!(
        store.get_submission(row.id).unwrap().unwrap().status,
        SubmissionStatus::New
    );
}

#[tokio::test]
async fn given_broken_json_when_submitting_contact_then_returns_validation_failed_json() {
    let (app, _) = seeded_app();
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "validation_failed");
}
