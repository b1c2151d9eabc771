use super::api;

use axum::Router;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::v0::status::get_status,
        api::v0::survey::list_surveys,
        api::v0::survey::create_survey,
        api::v0::survey::get_survey,
        api::v0::survey::delete_survey,
        api::v0::survey::category::create_category,
        api::v0::survey::category::update_category,
        api::v0::survey::category::delete_category,
        api::v0::survey::response::submit_response,
        api::v0::survey::response::list_responses,
        api::v0::survey::analysis::get_analysis,
        api::v0::survey::export::export_csv,
    ),
    tags()
)]
struct ApiDoc;

pub fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        // The OpenApi json is already served via SwaggerUi, rapidoc only
        // points at it.
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
}
