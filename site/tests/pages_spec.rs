mod common;

use axum::http::{header, StatusCode};
use common::*;
use tower::ServiceExt;

#[tokio::test]
async fn given_seeded_store_when_home_requested_then_renders_every_section() {
    let (app, _) = seeded_app();
    let response = app.oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Launch Your Tech Startup in the UAE"));
    assert!(html.contains("Companies Launched"));
    assert!(html.contains("UAE Business Licensing"));
    assert!(html.contains("License Application"));
    assert!(html.contains("Transparent Pricing"));
    assert!(html.contains("Scale Package"));
    assert!(html.contains("The Foundation"));
    assert!(html.contains("How long does it take to get a business license?"));
    assert!(html.contains("Which package interests you?"));
    assert!(html.contains("application/ld+json"));
    assert!(html.contains("\"FAQPage\""));
    // No testimonials are seeded, so the section is left out.
    assert!(!html.contains("What Founders Say"));
}

#[tokio::test]
async fn given_empty_store_when_home_requested_then_default_copy_is_used() {
    let app = app_with(store(), sessions());
    let response = app.oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Launch Your Tech Startup in the UAE"));
    assert!(html.contains("Why Choose Inceptum"));
}

#[tokio::test]
async fn given_growth_view_when_home_requested_then_packages_list_digital_features() {
    let (app, _) = seeded_app();
    let roots = body_string(app.clone().oneshot(get("/", None)).await.unwrap()).await;
    assert!(roots.contains("Trade License Setup"));
    assert!(!roots.contains("Professional Website"));

    let growth = body_string(app.oneshot(get("/?view=growth", None)).await.unwrap()).await;
    assert!(growth.contains("Professional Website"));
    assert!(!growth.contains("Trade License Setup"));
}

#[tokio::test]
async fn given_tier_query_when_home_requested_then_slider_wraps_around() {
    let (app, _) = seeded_app();
    let html = body_string(app.clone().oneshot(get("/?tier=0", None)).await.unwrap()).await;
    assert!(html.contains(r#"href="/?tier=2&amp;view=roots#solutions" aria-label="Previous tier""#));
    assert!(html.contains(r#"href="/?tier=1&amp;view=roots#solutions" aria-label="Next tier""#));

    let html = body_string(app.oneshot(get("/?tier=99", None)).await.unwrap()).await;
    assert!(html.contains(r#"href="/?tier=0&amp;view=roots#solutions" aria-label="Next tier""#));
}

#[tokio::test]
async fn given_denied_flag_when_home_requested_then_shows_access_banner() {
    let (app, _) = seeded_app();
    let html = body_string(app.oneshot(get("/?denied=1", None)).await.unwrap()).await;
    assert!(html.contains("Access denied: Admin privileges required"));
}

#[tokio::test]
async fn given_unknown_path_when_requested_then_renders_not_found_page() {
    let (app, _) = seeded_app();
    let response = app.oneshot(get("/pricing-2019", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_string(response).await.contains("404 - Page Not Found"));
}

#[tokio::test]
async fn given_static_stylesheet_when_requested_then_served() {
    let (app, _) = seeded_app();
    let response = app.oneshot(get("/static/site.css", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_about_page_when_requested_then_renders_roadmap() {
    let (app, _) = seeded_app();
    let html = body_string(app.oneshot(get("/about", None)).await.unwrap()).await;
    assert!(html.contains("The Architecture of Growth"));
    assert!(html.contains("The 30-Day Launch Roadmap"));
}

#[tokio::test]
async fn given_thank_you_page_when_requested_then_renders_next_steps() {
    let (app, _) = seeded_app();
    let html = body_string(app.oneshot(get("/thank-you", None)).await.unwrap()).await;
    assert!(html.contains("What Happens Next"));
}

#[tokio::test]
async fn given_package_slug_when_requested_then_shows_both_feature_lists() {
    let (app, _) = seeded_app();
    let response = app.clone().oneshot(get("/packages/scaler", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("The Scaler"));
    assert!(html.contains("HR &amp; Payroll Setup") || html.contains("HR & Payroll Setup"));
    assert!(html.contains("SEO Optimization"));

    let response = app.oneshot(get("/packages/platinum", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_incomplete_inquiry_when_posted_then_form_is_redisplayed() {
    let (app, store) = seeded_app();
    let response = app
        .oneshot(form_request(
            "/packages/scaler",
            None,
            "name=Layla&email=layla%40example.com&phone=",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(response).await;
    assert!(html.contains("Please fill in all required fields"));
    assert!(html.contains(r#"value="Layla""#));
    assert!(store.list_submissions(None).unwrap().is_empty());
}

#[tokio::test]
async fn given_complete_inquiry_when_posted_then_stored_and_redirected() {
    let (app, store) = seeded_app();
    let response = app
        .oneshot(form_request(
            "/packages/scaler",
            None,
            "name=Layla&email=layla%40example.com&phone=%2B971501234567&company=Falcon",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/?inquiry=sent#packages");

    let rows = store.list_submissions(None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, "package_inquiry");
    assert_eq!(rows[0].message, "Package Interest: The Scaler");
    assert_eq!(rows[0].phone.as_deref(), Some("+971501234567"));
}

#[tokio::test]
async fn given_valid_token_when_callback_visited_then_cookie_set_and_redirected() {
    let (app, store) = seeded_app();
    let token = admin_token();
    let response = app
        .oneshot(get(&format!("/auth/callback?token={token}"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin");
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with(&format!("app_session_id={token};")));
    assert!(store.get_user_by_open_id(OWNER).unwrap().unwrap().is_admin());
}

#[tokio::test]
async fn given_forged_token_when_callback_visited_then_unauthorized() {
    let (app, _) = seeded_app();
    let response = app
        .oneshot(get("/auth/callback?token=forged.token.value", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_store_failure_when_inquiry_posted_then_form_shows_error() {
    let (app, _dir) = app_without_submissions_table();
    let response = app
        .oneshot(form_request(
            "/packages/scaler",
            None,
            "name=Layla&email=layla%40example.com&phone=%2B971501234567&company=Falcon",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_string(response).await;
    assert!(html.contains("Something went wrong. Please try again."));
    assert!(html.contains(r#"value="Layla""#));
}
