use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Query parameter '{0}' is required")]
    MissingParameter(&'static str),

    #[error("Query parameter 'forecast' is invalid, please provide a number between 0 and 6")]
    InvalidForecastDay,

    #[error("{0}")]
    Upstream(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingParameter(_) | AppError::InvalidForecastDay => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

/// Convert a caught request-handler panic into a 500 response.
///
/// Installed via `CatchPanicLayer::custom` so a fault in one request is
/// logged and answered without taking down the process or affecting other
/// in-flight requests.
pub fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!("Request handler panicked: {}", detail);

    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from(detail))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_message() {
        let err = AppError::MissingParameter("city");
        assert_eq!(err.to_string(), "Query parameter 'city' is required");
    }

    #[test]
    fn test_invalid_forecast_message() {
        assert_eq!(
            AppError::InvalidForecastDay.to_string(),
            "Query parameter 'forecast' is invalid, please provide a number between 0 and 6"
        );
    }

    #[test]
    fn test_status_codes() {
        let resp = AppError::MissingParameter("country").into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let resp = AppError::Upstream("boom".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_handle_panic_uses_message() {
        let resp = handle_panic(Box::new("PANIC TEST"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
