pub mod health;
pub mod weather;

use axum::routing::get;
use axum::Router;

use crate::config::AppConfig;
use crate::services::cache::ResponseCache;
use crate::services::openweather::OpenWeatherClient;

/// Shared application state for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub client: OpenWeatherClient,
    pub cache: ResponseCache,
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(weather::get_weather))
        .route("/healthcheck", get(health::health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::handle_panic;
    use tower_http::catch_panic::CatchPanicLayer;

    /// A fault inside one request handler must become a 500 for that request
    /// while the process keeps serving: the liveness endpoint stays healthy.
    #[tokio::test]
    async fn test_panic_in_handler_does_not_kill_the_server() {
        // Same middleware stack main() installs, with a handler that blows up
        // the way a fault in the upstream-call path would.
        async fn boom() {
            panic!("PANIC TEST")
        }

        let app = Router::new()
            .route("/weather", get(boom))
            .route("/healthcheck", get(health::health_check))
            .layer(CatchPanicLayer::custom(handle_panic));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let base = format!("http://{}", addr);

        let health = reqwest::get(format!("{}/healthcheck", base)).await.unwrap();
        assert_eq!(health.status(), 200);

        let faulted = reqwest::get(format!("{}/weather", base)).await.unwrap();
        assert_eq!(faulted.status(), 500);
        assert_eq!(faulted.text().await.unwrap(), "PANIC TEST");

        // Server still operates after the panic.
        let health = reqwest::get(format!("{}/healthcheck", base)).await.unwrap();
        assert_eq!(health.status(), 200);
    }
}
