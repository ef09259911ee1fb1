use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use inceptum_content::StoreError;
use serde_json::{json, Map, Value};
use tracing::error;
use validator::ValidationErrors;

/// Error returned by every JSON handler, rendered as
/// `{"code": ..., "message": ..., "fields": ...}`.
#[derive(Debug)]
pub struct AppError {
    pub status_code: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub fields: Option<Value>,
}

impl AppError {
    pub fn new(status_code: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status_code,
            code,
            message: message.into(),
            fields: None,
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", "Please login")
    }

    pub fn forbidden() -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            "forbidden",
            "Unauthorized: Admin access required",
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            message,
        )
    }
}

/// Field names in API payloads are camelCase; the validator reports the Rust
/// field names.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = Map::new();
        let mut names: Vec<_> = errors.field_errors().into_iter().collect();
        names.sort_by(|a, b| a.0.cmp(&b.0));
        for (field, errs) in names {
            let messages: Vec<Value> = errs
                .iter()
                .map(|e| {
                    Value::String(
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string()),
                    )
                })
                .collect();
            fields.insert(camel_case(&field), Value::Array(messages));
        }
        Self {
            status_code: StatusCode::BAD_REQUEST,
            code: "validation_failed",
            message: "Validation failed".to_string(),
            fields: Some(Value::Object(fields)),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => AppError::not_found(err.to_string()),
            StoreError::Validation(errors) => AppError::from(errors),
            StoreError::Invalid(message) => AppError::bad_request(message),
            other => {
                error!("Store failure: {}", other);
                AppError::internal("Internal server error")
            }
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(err: tera::Error) -> Self {
        error!("Template rendering error: {:?}", err);
        AppError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "template_error",
            format!("Template rendering error: {}", err),
        )
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        error!("Internal error: {:#}", err);
        AppError::internal(format!("Internal server error: {}", err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::new(
            StatusCode::BAD_REQUEST,
            "validation_failed",
            rejection.body_text(),
        )
    }
}

/// `Json` body extractor whose failures answer in the API error shape
/// instead of axum's plain-text rejection.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "code": self.code,
            "message": self.message,
        });
        if let Some(fields) = self.fields {
            body["fields"] = fields;
        }
        (self.status_code, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn store_not_found_maps_to_404() {
        let err = AppError::from(StoreError::not_found("FAQ item", 9));
        assert_eq!(err.status_code, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "not_found");
        assert_eq!(err.message, "FAQ item not found: 9");
    }

    #[test]
    fn validation_errors_list_camel_case_fields() {
        let patch = inceptum_content::ServicePatch {
            gradient_from: Some("violet".into()),
            ..Default::default()
        };
        let err = AppError::from(patch.validate().unwrap_err());
        assert_eq!(err.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "validation_failed");
        let fields = err.fields.unwrap();
        assert_eq!(fields["gradientFrom"][0], "must be a #RRGGBB colour");
    }

    #[tokio::test]
    async fn malformed_json_body_is_a_validation_failure() {
        let req = axum::http::Request::builder()
            .header("content-type", "application/json")
            .body(axum::body::Body::from(r#"{"answer": 3}"#))
            .unwrap();
        let err = ApiJson::<inceptum_content::NewFaqItem>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "validation_failed");
        assert!(!err.message.is_empty());
    }

    #[test]
    fn camel_case_conversion() {
        assert_eq!(camel_case("display_order"), "displayOrder");
        assert_eq!(camel_case("name"), "name");
    }
}
