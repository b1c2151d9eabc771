use anketo_db::sea_orm::DatabaseConnection;
use anketo_db::survey::{NewCategory, NewKeyChoice, NewOption, NewQuestion, NewSurvey};
use anketo_entity::{question_option, survey};
use anketo_model::survey::SurveyDocument;
use anketo_model::survey::upload::{OptionUpload, SurveyUpload};
use anketo_model_tools::convert::survey::SurveyRows;
use anketo_model_tools::convert::{IntoDbModel, IntoModel};
use axum::extract::{Path, Query};
use axum::response::IntoResponse;
use axum::routing::{Router, get, post, put};
use axum::{Extension, Json};
use chrono::{NaiveDate, Utc};
use error::SurveyError;
use http::StatusCode;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tokio::try_join;
use uuid::Uuid;

pub(crate) mod analysis;
pub(crate) mod category;
pub(crate) mod error;
pub(crate) mod export;
pub(crate) mod response;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_surveys).post(create_survey))
        .nest(
            "/{survey_id}",
            Router::new()
                .route("/", get(get_survey).delete(delete_survey))
                .route("/analysis", get(analysis::get_analysis))
                .route("/export", get(export::export_csv))
                .route(
                    "/responses",
                    get(response::list_responses).post(response::submit_response),
                )
                .nest(
                    "/categories",
                    Router::new().route("/", post(category::create_category)).route(
                        "/{category_id}",
                        put(category::update_category).delete(category::delete_category),
                    ),
                ),
        )
        .with_state(())
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListFlags {
    lang: Option<String>,
    show_all: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/v0/surveys",
    params(
        ("lang" = Option<String>, Query, description = "only surveys with this language tag"),
        ("show_all" = Option<bool>, Query, description = "include surveys whose window has closed"),
    ),
    responses(
        (status = OK, body = [SurveyDocument], description = "Returns the matching surveys as full documents"),
    ),
    tag = "v0/surveys"
)]
pub(crate) async fn list_surveys(
    Extension(conn): Extension<DatabaseConnection>,
    Query(flags): Query<ListFlags>,
) -> Result<impl IntoResponse, SurveyError> {
    let surveys = anketo_db::survey::Query::load_surveys(
        &conn,
        flags.lang.as_deref(),
        flags.show_all.unwrap_or(false),
        Utc::now().naive_utc(),
    )
    .await?;
    let mut documents = Vec::with_capacity(surveys.len());
    for survey in surveys {
        documents.push(load_document(&conn, survey).await?);
    }
    Ok(Json(documents))
}

#[utoipa::path(
    post,
    request_body = SurveyUpload,
    path = "/api/v0/surveys",
    responses(
        (status = CREATED, body = SurveyDocument, description = "Creates a survey from the nested document"),
    ),
    tag = "v0/surveys"
)]
pub(crate) async fn create_survey(
    Extension(conn): Extension<DatabaseConnection>,
    Json(upload): Json<SurveyUpload>,
) -> Result<impl IntoResponse, SurveyError> {
    let rows = build_survey_rows(upload, Utc::now().date_naive())?;
    let survey = anketo_db::survey::Mutation::create(&conn, rows).await?;
    tracing::debug!(survey_id = %survey.id.as_hyphenated(), "created survey");
    let document = load_document(&conn, survey).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

#[utoipa::path(
    get,
    path = "/api/v0/surveys/{survey_id}",
    params(
        ("survey_id" = Uuid, Path, description = "the survey to load"),
    ),
    responses(
        (status = OK, body = SurveyDocument, description = "Returns one survey as a full document"),
    ),
    tag = "v0/surveys"
)]
pub(crate) async fn get_survey(
    Extension(conn): Extension<DatabaseConnection>,
    Path(survey_id): Path<Uuid>,
) -> Result<impl IntoResponse, SurveyError> {
    let survey = anketo_db::survey::Query::load_survey(&conn, survey_id)
        .await?
        .ok_or(SurveyError::SurveyNotFound)?;
    Ok(Json(load_document(&conn, survey).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v0/surveys/{survey_id}",
    params(
        ("survey_id" = Uuid, Path, description = "the survey to delete"),
    ),
    responses(
        (status = NO_CONTENT, description = "Removes the survey and everything attached to it"),
    ),
    tag = "v0/surveys"
)]
pub(crate) async fn delete_survey(
    Extension(conn): Extension<DatabaseConnection>,
    Path(survey_id): Path<Uuid>,
) -> Result<impl IntoResponse, SurveyError> {
    if !anketo_db::survey::Mutation::delete(&conn, survey_id).await? {
        return Err(SurveyError::SurveyNotFound);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Loads everything attached to the survey row and assembles the document.
pub(super) async fn load_document(
    conn: &DatabaseConnection,
    survey: survey::Model,
) -> Result<SurveyDocument, SurveyError> {
    let (categories, key_choices, questions) = try_join!(
        anketo_db::category::Query::load_categories(conn, survey.id),
        anketo_db::survey::Query::load_key_choices(conn, survey.id),
        anketo_db::question::Query::load_questions(conn, survey.id),
    )?;

    let question_ids: Vec<_> = questions.iter().map(|question| question.id).collect();
    let options = anketo_db::question::Query::load_options(conn, &question_ids).await?;
    let mut grouped: HashMap<Uuid, Vec<question_option::Model>> = HashMap::new();
    for option in options {
        grouped.entry(option.question_id).or_default().push(option);
    }
    let questions = questions
        .into_iter()
        .map(|question| {
            let options = grouped.remove(&question.id).unwrap_or_default();
            (question, options)
        })
        .collect();

    Ok(SurveyRows {
        survey,
        categories,
        key_choices,
        questions,
        now: Utc::now().naive_utc(),
    }
    .into_model())
}

const DEFAULT_SCALE: (i32, i32) = (1, 5);

/// Bounds of a rating question, parsed from its `"min-max"` scale string.
pub(super) fn scale_bounds(scale: Option<&str>) -> (i32, i32) {
    let Some(scale) = scale else {
        return DEFAULT_SCALE;
    };
    let Some((min, max)) = scale.split_once('-') else {
        return DEFAULT_SCALE;
    };
    match (min.trim().parse(), max.trim().parse()) {
        (Ok(min), Ok(max)) if min <= max => (min, max),
        _ => DEFAULT_SCALE,
    }
}

/// Maps the uploaded document onto the row bundle the db layer writes.
///
/// Categories get a dense `cat_number` 1..=N: any numbers the document
/// carries decide the order (stable, so unnumbered entries keep their
/// position at the end), the values themselves are discarded. Question
/// numbers default to the document position; the label is derived from the
/// number once unless the document brings its own.
fn build_survey_rows(upload: SurveyUpload, today: NaiveDate) -> Result<NewSurvey, SurveyError> {
    let metadata = upload.metadata;
    let (start_time, end_time) = anketo_utils::date::day_window(
        metadata.start.unwrap_or(today),
        metadata.end.unwrap_or(today),
    )?;

    let mut uploads = upload.question_categories;
    uploads.sort_by_key(|cat| cat.cat_number.unwrap_or(i32::MAX));
    let categories: Vec<NewCategory> = uploads
        .into_iter()
        .enumerate()
        .map(|(index, cat)| NewCategory {
            document_id: cat.id,
            cat_number: i32::try_from(index).unwrap_or(i32::MAX - 1) + 1,
            name: cat.name.unwrap_or_else(|| format!("Category {}", cat.id)),
        })
        .collect();
    let known_categories: HashSet<i64> = categories.iter().map(|cat| cat.document_id).collect();

    let mut seen_numbers = HashSet::new();
    let mut questions = Vec::with_capacity(upload.questions.len());
    for (index, question) in upload.questions.into_iter().enumerate() {
        let number = question
            .id
            .unwrap_or_else(|| i32::try_from(index).unwrap_or(i32::MAX - 1) + 1);
        if !seen_numbers.insert(number) {
            return Err(SurveyError::DuplicateQuestionNumber(number));
        }
        if !known_categories.contains(&question.category) {
            return Err(SurveyError::UnknownCategory {
                question: number,
                category: question.category,
            });
        }
        let label = question
            .label
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| format!("q{number}"));
        let options = question
            .options
            .into_iter()
            .map(|option| match option {
                OptionUpload::Inline(label) => NewOption {
                    option_number: None,
                    value: None,
                    label,
                    text: None,
                    is_other: false,
                },
                OptionUpload::Detailed(detail) => NewOption {
                    option_number: detail.id,
                    value: detail.value,
                    label: detail.label.unwrap_or_default(),
                    text: detail.text,
                    is_other: detail.is_other,
                },
            })
            .collect();
        questions.push(NewQuestion {
            question_number: number,
            category: question.category,
            question_type: question.question_type.into_db_model(),
            question_text: question.question,
            question_label: label,
            scale: question.scale,
            placeholder: question.placeholder,
            options,
        });
    }

    Ok(NewSurvey {
        title: metadata.title.unwrap_or_default(),
        instructions: metadata.instructions.unwrap_or_default(),
        version: metadata.version.unwrap_or_else(|| "1.0".to_owned()),
        language: metadata.language.unwrap_or_default(),
        start_time,
        end_time,
        categories,
        key_choices: upload
            .key_choice
            .into_iter()
            .map(|kc| NewKeyChoice {
                key: kc.key,
                description: kc.description,
            })
            .collect(),
        questions,
    })
}
