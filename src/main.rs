// Weather API v0.1
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod errors;
mod routes;
mod services;

use config::AppConfig;
use routes::AppState;
use services::cache::ResponseCache;
use services::openweather::OpenWeatherClient;

/// Weather API OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weather API",
        version = "0.1.0",
        description = "Caching HTTP facade for the OpenWeather API. \
            Fetches current conditions (and optional daily forecasts) from \
            OpenWeather, translates them into a compact human-readable form, \
            and caches each translated response per request URL.",
    ),
    tags(
        (name = "Health", description = "Service liveness check"),
        (name = "Weather", description = "Human-readable weather retrieval"),
    ),
    paths(routes::health::health_check, routes::weather::get_weather),
    components(
        schemas(
            routes::health::HealthResponse,
            services::translate::HumanReadableResponse,
            services::openweather::ForecastDay,
            services::openweather::DayTemperatures,
            services::openweather::DayFeelsLike,
            services::openweather::WeatherCondition,
        )
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    // Create the OpenWeather client and the shared response cache
    let client = OpenWeatherClient::new(config.clone());
    let cache = ResponseCache::new();

    // Spawn the background cache sweeper
    tokio::spawn(cache.clone().run_sweeper());

    let state = AppState {
        config: config.clone(),
        client,
        cache,
    };

    // Build router. The catch-panic layer is the per-request failure
    // boundary: a fault in one request becomes a 500 for that request only.
    let app = routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CatchPanicLayer::custom(errors::handle_panic))
        .layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!("API server listening on {}", config.server_address);

    let listener = tokio::net::TcpListener::bind(&config.server_address)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
