use crate::opt::Run;
use crate::routes;
use anketo_db::sea_orm::DatabaseConnection;
use axum::routing::get;
use axum::{Extension, Router};
use axum_prometheus::PrometheusMetricLayerBuilder;
use http::{Method, header};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

pub(crate) fn create_app(opt: &Run, pool: DatabaseConnection) -> anyhow::Result<Router> {
    let (prometheus_layer, metric_handle) = PrometheusMetricLayerBuilder::new()
        .with_prefix("api")
        .with_default_metrics()
        .build_pair();

    let api_cors = CorsLayer::new()
        .allow_origin(
            opt.origins
                .iter()
                .map(|origin| origin.parse())
                .collect::<Result<Vec<_>, _>>()?,
        )
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .max_age(Duration::from_secs(3600));

    let app = Router::new()
        .merge(routes::swagger::create_router())
        .nest(
            "/api/v0",
            Router::new()
                .nest("/status", routes::api::v0::status::create_router())
                .nest("/surveys", routes::api::v0::survey::create_router())
                .layer(api_cors),
        )
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(ServiceBuilder::new().layer(prometheus_layer).layer(Extension(pool)));

    Ok(app)
}
