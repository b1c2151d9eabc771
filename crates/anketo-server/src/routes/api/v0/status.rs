use anketo_db::sea_orm::prelude::Expr;
use anketo_db::sea_orm::sea_query;
use anketo_db::sea_orm::{ConnectionTrait, DatabaseConnection};
use anketo_model::status::{ComponentStatus, Status};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use http::StatusCode;
use std::error::Error;
use std::time::Duration;
use tokio::time::timeout;
use tracing::instrument;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(get_status)).with_state(())
}

#[instrument(skip_all)]
async fn get_db_status(conn: &DatabaseConnection) -> ComponentStatus {
    let mut query = sea_query::Query::select();
    query.expr(Expr::current_timestamp());
    match timeout(
        Duration::from_secs(5),
        conn.execute(conn.get_database_backend().build(&query)),
    )
    .await
    {
        Ok(result) => result
            .inspect_err(|error| tracing::error!(error = error as &dyn Error, "db error during health check"))
            .into(),
        Err(_) => {
            tracing::error!("db health check timed out");
            ComponentStatus::Error
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v0/status",
    responses(
        (status = OK, description = "Service is ok", body = Status),
    ),
    tag = "util"
)]
#[instrument(skip_all)]
pub(crate) async fn get_status(Extension(conn): Extension<DatabaseConnection>) -> impl IntoResponse {
    let database = get_db_status(&conn).await;
    let status_code = if database.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status_code, Json(Status { database }))
}
