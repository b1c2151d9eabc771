use super::error::SurveyError;
use super::scale_bounds;
use anketo_db::response::NewAnswer;
use anketo_db::sea_orm::DatabaseConnection;
use anketo_entity::question::QuestionType;
use anketo_entity::{answer, question, question_option};
use anketo_model::response::{ResponseRecord, ResponseUpload, SubmissionReceipt};
use anketo_model_tools::convert::IntoModel;
use anketo_model_tools::convert::response::ResponseRows;
use axum::extract::Path;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::Utc;
use http::StatusCode;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[utoipa::path(
    post,
    request_body = ResponseUpload,
    path = "/api/v0/surveys/{survey_id}/responses",
    params(
        ("survey_id" = Uuid, Path, description = "the survey being answered"),
    ),
    responses(
        (status = CREATED, body = SubmissionReceipt, description = "Stores one response with its answers"),
        (status = CONFLICT, description = "The survey window has closed"),
    ),
    tag = "v0/surveys"
)]
pub(crate) async fn submit_response(
    Extension(conn): Extension<DatabaseConnection>,
    Path(survey_id): Path<Uuid>,
    Json(upload): Json<ResponseUpload>,
) -> Result<impl IntoResponse, SurveyError> {
    let survey = anketo_db::survey::Query::load_survey(&conn, survey_id)
        .await?
        .ok_or(SurveyError::SurveyNotFound)?;
    if Utc::now().naive_utc() > survey.end_time {
        return Err(SurveyError::SurveyClosed);
    }

    let questions = anketo_db::question::Query::load_questions(&conn, survey_id).await?;
    let question_ids: Vec<_> = questions.iter().map(|question| question.id).collect();
    let options = anketo_db::question::Query::load_options(&conn, &question_ids).await?;

    let answers = build_answer_rows(&questions, &options, upload)?;
    let response = anketo_db::response::Mutation::create(&conn, survey_id, answers).await?;
    tracing::debug!(
        survey_id = %survey_id.as_hyphenated(),
        response_id = %response.id.as_hyphenated(),
        "stored survey response"
    );
    Ok((StatusCode::CREATED, Json(SubmissionReceipt { response_id: response.id })))
}

#[utoipa::path(
    get,
    path = "/api/v0/surveys/{survey_id}/responses",
    params(
        ("survey_id" = Uuid, Path, description = "the survey whose responses to list"),
    ),
    responses(
        (status = OK, body = [ResponseRecord], description = "Returns the stored responses with their answers"),
    ),
    tag = "v0/surveys"
)]
pub(crate) async fn list_responses(
    Extension(conn): Extension<DatabaseConnection>,
    Path(survey_id): Path<Uuid>,
) -> Result<impl IntoResponse, SurveyError> {
    anketo_db::survey::Query::load_survey(&conn, survey_id)
        .await?
        .ok_or(SurveyError::SurveyNotFound)?;

    let questions = anketo_db::question::Query::load_questions(&conn, survey_id).await?;
    let question_numbers: HashMap<Uuid, i32> = questions
        .iter()
        .map(|question| (question.id, question.question_number))
        .collect();

    let responses = anketo_db::response::Query::load_responses(&conn, survey_id).await?;
    let answers = anketo_db::response::Query::load_answers_for_survey(&conn, survey_id).await?;
    let answer_ids: Vec<_> = answers.iter().map(|answer| answer.id).collect();
    let selections = anketo_db::response::Query::load_selections(&conn, &answer_ids).await?;

    let mut selected_by_answer: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for link in selections {
        selected_by_answer.entry(link.answer_id).or_default().push(link.option_id);
    }
    let mut answers_by_response: HashMap<Uuid, Vec<(answer::Model, Vec<Uuid>)>> = HashMap::new();
    for answer in answers {
        let selected = selected_by_answer.remove(&answer.id).unwrap_or_default();
        answers_by_response
            .entry(answer.response_id)
            .or_default()
            .push((answer, selected));
    }

    let records: Vec<ResponseRecord> = responses
        .into_iter()
        .map(|response| {
            ResponseRows {
                answers: answers_by_response.remove(&response.id).unwrap_or_default(),
                response,
                question_numbers: question_numbers.clone(),
            }
            .into_model()
        })
        .collect();
    Ok(Json(records))
}

/// Resolves the uploaded answers against the survey's questions. Unknown
/// question numbers and foreign option ids are skipped; a value of the wrong
/// shape for the question type fails the submission.
fn build_answer_rows(
    questions: &[question::Model],
    options: &[question_option::Model],
    upload: ResponseUpload,
) -> Result<Vec<NewAnswer>, SurveyError> {
    let by_number: HashMap<i32, &question::Model> = questions
        .iter()
        .map(|question| (question.question_number, question))
        .collect();
    let mut options_by_question: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
    for option in options {
        options_by_question
            .entry(option.question_id)
            .or_default()
            .insert(option.id);
    }

    let mut rows = Vec::with_capacity(upload.answers.len());
    for answer in upload.answers {
        let Some(&question) = by_number.get(&answer.question) else {
            tracing::warn!(question = answer.question, "skipping answer for unknown question");
            continue;
        };
        let row = match question.question_type {
            QuestionType::Rating => {
                let value = answer.rating.ok_or(SurveyError::InvalidAnswer(answer.question))?;
                let (min, max) = scale_bounds(question.scale.as_deref());
                if value < min || value > max {
                    return Err(SurveyError::RatingOutOfRange {
                        question: answer.question,
                        value,
                        min,
                        max,
                    });
                }
                NewAnswer {
                    question_id: question.id,
                    rating_value: Some(value),
                    number_value: None,
                    text_value: None,
                    selected_options: Vec::new(),
                }
            }
            QuestionType::Number => NewAnswer {
                question_id: question.id,
                rating_value: None,
                number_value: Some(answer.number.ok_or(SurveyError::InvalidAnswer(answer.question))?),
                text_value: None,
                selected_options: Vec::new(),
            },
            QuestionType::Text => NewAnswer {
                question_id: question.id,
                rating_value: None,
                number_value: None,
                text_value: Some(answer.text.ok_or(SurveyError::InvalidAnswer(answer.question))?),
                selected_options: Vec::new(),
            },
            QuestionType::SingleChoice | QuestionType::MultiSelect => {
                let known = options_by_question.get(&question.id);
                let selected: Vec<Uuid> = answer
                    .selected_options
                    .into_iter()
                    .filter(|id| {
                        let keep = known.is_some_and(|options| options.contains(id));
                        if !keep {
                            tracing::warn!(
                                option = %id.as_hyphenated(),
                                question = answer.question,
                                "skipping selection of unknown option"
                            );
                        }
                        keep
                    })
                    .collect();
                if selected.is_empty() {
                    tracing::warn!(question = answer.question, "skipping choice answer without selections");
                    continue;
                }
                if question.question_type == QuestionType::SingleChoice && selected.len() > 1 {
                    return Err(SurveyError::InvalidAnswer(answer.question));
                }
                NewAnswer {
                    question_id: question.id,
                    rating_value: None,
                    number_value: None,
                    text_value: None,
                    selected_options: selected,
                }
            }
        };
        rows.push(row);
    }
    Ok(rows)
}
