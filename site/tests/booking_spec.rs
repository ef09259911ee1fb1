mod common;

use axum::http::StatusCode;
use common::*;
use tower::ServiceExt;

const COMPLETE_BOOKING: &str = "step=4&action=submit\
&full_name=Amira+Haddad&email=amira%40startup.ae&phone=0501234567\
&legal_status=international&hurdle_banking=on&hurdle_visas=on\
&digital_presence=scaling&growth_budget=5kplus&timeframe=months";

#[tokio::test]
async fn given_booking_page_when_requested_then_starts_at_step_one() {
    let (app, _) = seeded_app();
    let html = body_string(app.oneshot(get("/booking", None)).await.unwrap()).await;
    assert!(html.contains("Step 1 of 4"));
    assert!(html.contains("25% complete"));
    assert!(html.contains(r#"name="full_name""#));
}

#[tokio::test]
async fn given_empty_first_step_when_next_pressed_then_name_error_is_shown() {
    let (app, _) = seeded_app();
    let response = app
        .oneshot(form_request("/booking", None, "step=1&action=next"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_string(response).await;
    assert!(html.contains("Please enter your full name"));
    assert!(html.contains("Step 1 of 4"));
}

#[tokio::test]
async fn given_valid_first_step_when_next_pressed_then_answers_carry_forward() {
    let (app, _) = seeded_app();
    let response = app
        .oneshot(form_request(
            "/booking",
            None,
            "step=1&action=next&full_name=Amira&email=amira%40startup.ae&phone=0501234567",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Step 2 of 4"));
    assert!(html.contains("50% complete"));
    assert!(html.contains(r#"<input type="hidden" name="full_name" value="Amira">"#));
    assert!(html.contains("Trade Licensing &amp; Legalities") || html.contains("Trade Licensing & Legalities"));
}

#[tokio::test]
async fn given_bad_email_when_next_pressed_then_email_error_is_shown() {
    let (app, _) = seeded_app();
    let response = app
        .oneshot(form_request(
            "/booking",
            None,
            "step=1&action=next&full_name=Amira&email=amira&phone=0501234567",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_string(response).await.contains("Please enter a valid email address"));
}

#[tokio::test]
async fn given_back_on_step_three_when_pressed_then_returns_to_step_two_without_errors() {
    let (app, _) = seeded_app();
    let response = app
        .oneshot(form_request("/booking", None, "step=3&action=back"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Step 2 of 4"));
    assert!(!html.contains("form-error"));
}

#[tokio::test]
async fn given_complete_booking_when_submitted_then_stored_and_redirected() {
    let (app, store) = seeded_app();
    let response = app
        .oneshot(form_request("/booking", None, COMPLETE_BOOKING))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/thank-you");

    let rows = store.list_submissions(None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, "booking_request");
    assert_eq!(rows[0].name, "Amira Haddad");
    assert_eq!(
        rows[0].message,
        "Strategy Session Request\n\nLegal Status: international\nOperational Hurdles: banking, visas\nDigital Presence: scaling\nGrowth Budget: 5kplus\nTimeframe: months"
    );
}

#[tokio::test]
async fn given_missing_timeframe_when_submitted_then_nothing_is_stored() {
    let (app, store) = seeded_app();
    let body = COMPLETE_BOOKING.replace("&timeframe=months", "");
    let response = app
        .oneshot(form_request("/booking", None, &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_string(response)
        .await
        .contains("Please select your desired timeframe"));
    assert!(store.list_submissions(None).unwrap().is_empty());
}

#[tokio::test]
async fn given_lead_wizard_when_package_and_license_chosen_then_details_step_shows() {
    let (app, _) = seeded_app();
    let response = app
        .clone()
        .oneshot(form_request("/lead", None, "step=initial&action=select_package%3Afortress"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Do you already have a UAE trade license?"));
    assert!(html.contains(r#"name="package_interest" value="The Fortress""#));

    let response = app
        .oneshot(form_request(
            "/lead",
            None,
            "step=package&package_interest=The+Fortress&action=select_license%3Ayes",
        ))
        .await
        .unwrap();
    let html = body_string(response).await;
    assert!(html.contains("Your details"));
    assert!(html.contains(r#"name="has_license" value="Yes""#));
}

#[tokio::test]
async fn given_lead_details_without_phone_when_submitted_then_required_fields_error() {
    let (app, store) = seeded_app();
    let response = app
        .oneshot(form_request(
            "/lead",
            None,
            "step=details&package_interest=The+Scaler&has_license=No&name=Sara&email=sara%40example.com&action=submit",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_string(response)
        .await
        .contains("Please fill in all required fields"));
    assert!(store.list_submissions(None).unwrap().is_empty());
}

#[tokio::test]
async fn given_lead_details_when_submitted_then_strategy_session_is_stored() {
    let (app, store) = seeded_app();
    let response = app
        .oneshot(form_request(
            "/lead",
            None,
            "step=details&package_interest=The+Scaler&has_license=No&name=Sara&email=sara%40example.com&phone=0559876543&company=&action=submit",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Thank you!"));

    let rows = store.list_submissions(None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, "strategy_session");
    assert_eq!(rows[0].message, "Package Interest: The Scaler\nHas License: No");
    assert_eq!(rows[0].company, None);
}

#[tokio::test]
async fn given_store_failure_when_booking_submitted_then_final_step_shows_error() {
    let (app, _dir) = app_without_submissions_table();
    let response = app
        .oneshot(form_request("/booking", None, COMPLETE_BOOKING))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_string(response).await;
    assert!(html.contains("Something went wrong. Please try again."));
    assert!(html.contains("Step 4 of 4"));
    assert!(html.contains(r#"value="Amira Haddad""#));
}

#[tokio::test]
async fn given_store_failure_when_lead_submitted_then_details_step_shows_error() {
    let (app, _dir) = app_without_submissions_table();
    let response = app
        .oneshot(form_request(
            "/lead",
            None,
            "step=details&package_interest=The+Scaler&has_license=No&name=Sara&email=sara%40example.com&phone=0559876543&action=submit",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_string(response).await;
    assert!(html.contains("Something went wrong. Please try again."));
    assert!(!html.contains("Thank you!"));
}
