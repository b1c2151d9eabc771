use super::error::SurveyError;
use anketo_db::sea_orm::DatabaseConnection;
use anketo_model::survey::QuestionCategory;
use anketo_model::survey::upload::{CategoryCreate, CategoryUpdate};
use anketo_model_tools::convert::IntoModel;
use axum::extract::Path;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use http::StatusCode;
use uuid::Uuid;

#[utoipa::path(
    post,
    request_body = CategoryCreate,
    path = "/api/v0/surveys/{survey_id}/categories",
    params(
        ("survey_id" = Uuid, Path, description = "the survey the category belongs to"),
    ),
    responses(
        (status = CREATED, body = QuestionCategory, description = "Inserts a category, shifting later ones up"),
        (status = BAD_REQUEST, description = "The requested category number is out of range"),
    ),
    tag = "v0/surveys"
)]
pub(crate) async fn create_category(
    Extension(conn): Extension<DatabaseConnection>,
    Path(survey_id): Path<Uuid>,
    Json(body): Json<CategoryCreate>,
) -> Result<impl IntoResponse, SurveyError> {
    anketo_db::survey::Query::load_survey(&conn, survey_id)
        .await?
        .ok_or(SurveyError::SurveyNotFound)?;

    let count = count_categories(&conn, survey_id).await?;
    if let Some(position) = body.cat_number
        && (position < 1 || position > count + 1)
    {
        return Err(SurveyError::CategoryNumberOutOfRange(position));
    }

    let created = anketo_db::category::Mutation::insert(&conn, survey_id, body.name, body.cat_number).await?;
    Ok((StatusCode::CREATED, Json::<QuestionCategory>(created.into_model())))
}

#[utoipa::path(
    put,
    request_body = CategoryUpdate,
    path = "/api/v0/surveys/{survey_id}/categories/{category_id}",
    params(
        ("survey_id" = Uuid, Path, description = "the survey the category belongs to"),
        ("category_id" = Uuid, Path, description = "the category to rename or move"),
    ),
    responses(
        (status = OK, body = QuestionCategory, description = "Renames and/or moves the category"),
        (status = BAD_REQUEST, description = "The requested category number is out of range"),
    ),
    tag = "v0/surveys"
)]
pub(crate) async fn update_category(
    Extension(conn): Extension<DatabaseConnection>,
    Path((survey_id, category_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<CategoryUpdate>,
) -> Result<impl IntoResponse, SurveyError> {
    anketo_db::category::Query::load_category(&conn, survey_id, category_id)
        .await?
        .ok_or(SurveyError::CategoryNotFound)?;

    let count = count_categories(&conn, survey_id).await?;
    if let Some(position) = body.cat_number
        && (position < 1 || position > count)
    {
        return Err(SurveyError::CategoryNumberOutOfRange(position));
    }

    let updated =
        anketo_db::category::Mutation::update(&conn, survey_id, category_id, body.name, body.cat_number).await?;
    Ok(Json::<QuestionCategory>(updated.into_model()))
}

#[utoipa::path(
    delete,
    path = "/api/v0/surveys/{survey_id}/categories/{category_id}",
    params(
        ("survey_id" = Uuid, Path, description = "the survey the category belongs to"),
        ("category_id" = Uuid, Path, description = "the category to delete"),
    ),
    responses(
        (status = NO_CONTENT, description = "Deletes the category and its questions, then renumbers"),
    ),
    tag = "v0/surveys"
)]
pub(crate) async fn delete_category(
    Extension(conn): Extension<DatabaseConnection>,
    Path((survey_id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, SurveyError> {
    anketo_db::category::Query::load_category(&conn, survey_id, category_id)
        .await?
        .ok_or(SurveyError::CategoryNotFound)?;

    anketo_db::category::Mutation::delete(&conn, survey_id, category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn count_categories(conn: &DatabaseConnection, survey_id: Uuid) -> Result<i32, SurveyError> {
    let categories = anketo_db::category::Query::load_categories(conn, survey_id).await?;
    Ok(i32::try_from(categories.len()).unwrap_or(i32::MAX))
}
