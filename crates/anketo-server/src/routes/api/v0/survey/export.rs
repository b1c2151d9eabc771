use super::error::SurveyError;
use anketo_db::sea_orm::DatabaseConnection;
use anketo_entity::{answer, answer_option, question, question_option, response};
use axum::extract::Path;
use axum::response::IntoResponse;
use axum::Extension;
use http::header;
use std::borrow::Cow;
use std::collections::HashMap;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/v0/surveys/{survey_id}/export",
    params(
        ("survey_id" = Uuid, Path, description = "the survey to export"),
    ),
    responses(
        (status = OK, body = String, description = "All responses as CSV, one column per question label", content_type = "text/csv"),
    ),
    tag = "v0/surveys"
)]
pub(crate) async fn export_csv(
    Extension(conn): Extension<DatabaseConnection>,
    Path(survey_id): Path<Uuid>,
) -> Result<impl IntoResponse, SurveyError> {
    let survey = anketo_db::survey::Query::load_survey(&conn, survey_id)
        .await?
        .ok_or(SurveyError::SurveyNotFound)?;

    let questions = anketo_db::question::Query::load_questions(&conn, survey_id).await?;
    let question_ids: Vec<_> = questions.iter().map(|question| question.id).collect();
    let options = anketo_db::question::Query::load_options(&conn, &question_ids).await?;
    let responses = anketo_db::response::Query::load_responses(&conn, survey_id).await?;
    let answers = anketo_db::response::Query::load_answers_for_survey(&conn, survey_id).await?;
    let answer_ids: Vec<_> = answers.iter().map(|answer| answer.id).collect();
    let selections = anketo_db::response::Query::load_selections(&conn, &answer_ids).await?;

    let csv = build_csv(&questions, &options, &responses, &answers, &selections);
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"survey-{}.csv\"", survey.id.as_hyphenated()),
        ),
    ];
    Ok((headers, csv))
}

/// One row per response; header is `response_id`, `submitted_at` and the
/// question labels in question order. Multi-select cells join the selected
/// option labels with `;`.
fn build_csv(
    questions: &[question::Model],
    options: &[question_option::Model],
    responses: &[response::Model],
    answers: &[answer::Model],
    selections: &[answer_option::Model],
) -> String {
    let options_by_id: HashMap<Uuid, &question_option::Model> =
        options.iter().map(|option| (option.id, option)).collect();
    let mut selections_by_answer: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for link in selections {
        selections_by_answer.entry(link.answer_id).or_default().push(link.option_id);
    }
    let cells: HashMap<(Uuid, Uuid), &answer::Model> = answers
        .iter()
        .map(|answer| ((answer.response_id, answer.question_id), answer))
        .collect();

    let mut out = String::new();
    let mut header = vec!["response_id".to_owned(), "submitted_at".to_owned()];
    header.extend(questions.iter().map(|question| question.question_label.clone()));
    push_record(&mut out, &header);

    for response in responses {
        let mut record = vec![
            response.id.as_hyphenated().to_string(),
            response.submitted_at.and_utc().to_rfc3339(),
        ];
        for question in questions {
            let cell = cells
                .get(&(response.id, question.id))
                .map_or_else(String::new, |answer| {
                    answer_cell(answer, &selections_by_answer, &options_by_id)
                });
            record.push(cell);
        }
        push_record(&mut out, &record);
    }
    out
}

fn answer_cell(
    answer: &answer::Model,
    selections_by_answer: &HashMap<Uuid, Vec<Uuid>>,
    options_by_id: &HashMap<Uuid, &question_option::Model>,
) -> String {
    if let Some(value) = answer.rating_value {
        return value.to_string();
    }
    if let Some(value) = answer.number_value {
        return value.to_string();
    }
    if let Some(value) = &answer.text_value {
        return value.clone();
    }
    selections_by_answer.get(&answer.id).map_or_else(String::new, |ids| {
        ids.iter()
            .filter_map(|id| options_by_id.get(id))
            .map(|option| option.display_label())
            .collect::<Vec<_>>()
            .join(";")
    })
}

fn push_record(out: &mut String, fields: &[String]) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&escape_field(field));
    }
    out.push_str("\r\n");
}

/// RFC 4180 quoting.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains(['"', ',', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anketo_entity::question::QuestionType;
    use test_log::test;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_build_csv() {
        let survey_id = Uuid::new_v4();
        let rating = question::Model {
            id: Uuid::new_v4(),
            survey_id,
            category_id: Uuid::new_v4(),
            question_number: 1,
            question_type: QuestionType::Rating,
            question_text: String::new(),
            question_label: "q1".to_owned(),
            scale: Some("1-5".to_owned()),
            placeholder: None,
        };
        let multi = question::Model {
            id: Uuid::new_v4(),
            survey_id,
            category_id: rating.category_id,
            question_number: 2,
            question_type: QuestionType::MultiSelect,
            question_text: String::new(),
            question_label: "q2".to_owned(),
            scale: None,
            placeholder: None,
        };
        let option = question_option::Model {
            id: Uuid::new_v4(),
            question_id: multi.id,
            option_number: Some(1),
            value: None,
            label: "Editor, IDE".to_owned(),
            text: None,
            is_other: false,
        };
        let response = response::Model {
            id: Uuid::new_v4(),
            survey_id,
            submitted_at: "2026-08-01T12:00:00".parse().unwrap(),
        };
        let rating_answer = answer::Model {
            id: Uuid::new_v4(),
            response_id: response.id,
            question_id: rating.id,
            rating_value: Some(4),
            number_value: None,
            text_value: None,
        };
        let multi_answer = answer::Model {
            id: Uuid::new_v4(),
            response_id: response.id,
            question_id: multi.id,
            rating_value: None,
            number_value: None,
            text_value: None,
        };
        let link = answer_option::Model {
            answer_id: multi_answer.id,
            option_id: option.id,
        };

        let csv = build_csv(
            &[rating, multi],
            &[option],
            &[response.clone()],
            &[rating_answer, multi_answer],
            &[link],
        );

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("response_id,submitted_at,q1,q2"));
        let row = lines.next().unwrap();
        assert!(row.starts_with(&response.id.as_hyphenated().to_string()));
        // the option label contains a comma, so the cell is quoted
        assert!(row.ends_with(",4,\"Editor, IDE\""));
        assert_eq!(lines.next(), None);
    }
}
