use super::error::SurveyError;
use super::scale_bounds;
use anketo_db::sea_orm::DatabaseConnection;
use anketo_entity::question::QuestionType;
use anketo_entity::{answer, answer_option, category, key_choice, question, question_option};
use anketo_model::analysis::{CategoryAnalysis, QuestionAnalysis, QuestionStats, SurveyAnalysis};
use anketo_model_tools::convert::IntoModel;
use axum::extract::Path;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::try_join;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/v0/surveys/{survey_id}/analysis",
    params(
        ("survey_id" = Uuid, Path, description = "the survey to aggregate"),
    ),
    responses(
        (status = OK, body = SurveyAnalysis, description = "Descriptive statistics over all stored responses"),
    ),
    tag = "v0/surveys"
)]
pub(crate) async fn get_analysis(
    Extension(conn): Extension<DatabaseConnection>,
    Path(survey_id): Path<Uuid>,
) -> Result<impl IntoResponse, SurveyError> {
    anketo_db::survey::Query::load_survey(&conn, survey_id)
        .await?
        .ok_or(SurveyError::SurveyNotFound)?;

    let (categories, key_choices, questions, total_responses) = try_join!(
        anketo_db::category::Query::load_categories(&conn, survey_id),
        anketo_db::survey::Query::load_key_choices(&conn, survey_id),
        anketo_db::question::Query::load_questions(&conn, survey_id),
        anketo_db::response::Query::count_responses(&conn, survey_id),
    )?;

    let question_ids: Vec<_> = questions.iter().map(|question| question.id).collect();
    let options = anketo_db::question::Query::load_options(&conn, &question_ids).await?;
    let answers = anketo_db::response::Query::load_answers_for_survey(&conn, survey_id).await?;
    let answer_ids: Vec<_> = answers.iter().map(|answer| answer.id).collect();
    let selections = anketo_db::response::Query::load_selections(&conn, &answer_ids).await?;

    let analysis = build_analysis(
        &categories,
        &key_choices,
        &questions,
        &options,
        &answers,
        &selections,
        total_responses,
    );
    Ok(Json(analysis))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Tabulates every stored answer into per-category, per-question statistics.
fn build_analysis(
    categories: &[category::Model],
    key_choices: &[key_choice::Model],
    questions: &[question::Model],
    options: &[question_option::Model],
    answers: &[answer::Model],
    selections: &[answer_option::Model],
    total_responses: u64,
) -> SurveyAnalysis {
    let options_by_id: HashMap<Uuid, &question_option::Model> =
        options.iter().map(|option| (option.id, option)).collect();
    let mut answers_by_question: HashMap<Uuid, Vec<&answer::Model>> = HashMap::new();
    for answer in answers {
        answers_by_question.entry(answer.question_id).or_default().push(answer);
    }
    let mut selections_by_answer: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for link in selections {
        selections_by_answer.entry(link.answer_id).or_default().push(link.option_id);
    }

    let category_names: HashMap<Uuid, &str> = categories
        .iter()
        .map(|category| (category.id, category.name.as_str()))
        .collect();
    let mut by_category: IndexMap<String, CategoryAnalysis> = categories
        .iter()
        .map(|category| {
            (
                category.name.clone(),
                CategoryAnalysis {
                    questions: Vec::new(),
                    avg_rating: None,
                },
            )
        })
        .collect();
    let mut completion_rate = IndexMap::new();

    for question in questions {
        let question_answers = answers_by_question
            .get(&question.id)
            .map_or(&[][..], Vec::as_slice);

        let responded = question_answers
            .iter()
            .map(|answer| answer.response_id)
            .collect::<HashSet<_>>()
            .len() as u64;
        let rate = if total_responses == 0 {
            0.0
        } else {
            round2(responded as f64 / total_responses as f64)
        };
        completion_rate.insert(question.question_label.clone(), rate);

        let stats = tabulate(question, question_answers, &options_by_id, &selections_by_answer);
        let Some(name) = category_names.get(&question.category_id) else {
            continue;
        };
        if let Some(block) = by_category.get_mut(*name) {
            block.questions.push(QuestionAnalysis {
                id: question.question_number,
                text: question.question_text.clone(),
                question_type: question.question_type.into_model(),
                stats,
            });
        }
    }

    for block in by_category.values_mut() {
        let rating_averages: Vec<f64> = block
            .questions
            .iter()
            .filter_map(|question| match &question.stats {
                QuestionStats::Rating { avg_rating, .. } => Some(*avg_rating),
                _ => None,
            })
            .collect();
        if !rating_averages.is_empty() {
            block.avg_rating = Some(round2(
                rating_averages.iter().sum::<f64>() / rating_averages.len() as f64,
            ));
        }
    }

    SurveyAnalysis {
        total_responses,
        key_choices: key_choices
            .iter()
            .map(|kc| (kc.key.clone(), kc.description.clone()))
            .collect(),
        by_category,
        completion_rate,
    }
}

fn tabulate(
    question: &question::Model,
    question_answers: &[&answer::Model],
    options_by_id: &HashMap<Uuid, &question_option::Model>,
    selections_by_answer: &HashMap<Uuid, Vec<Uuid>>,
) -> QuestionStats {
    match question.question_type {
        QuestionType::Rating => {
            let (min, max) = scale_bounds(question.scale.as_deref());
            let mut rating_distribution: BTreeMap<i32, u64> = (min..=max).map(|value| (value, 0)).collect();
            let mut sum = 0i64;
            let mut total_answers = 0u64;
            for answer in question_answers {
                let Some(value) = answer.rating_value else {
                    continue;
                };
                sum += i64::from(value);
                total_answers += 1;
                if let Some(slot) = rating_distribution.get_mut(&value) {
                    *slot += 1;
                }
            }
            let avg_rating = if total_answers == 0 {
                0.0
            } else {
                round2(sum as f64 / total_answers as f64)
            };
            QuestionStats::Rating {
                avg_rating,
                total_answers,
                rating_distribution,
            }
        }
        QuestionType::SingleChoice | QuestionType::MultiSelect => {
            let mut selection_counts: IndexMap<String, u64> = IndexMap::new();
            let mut total_responded = 0u64;
            for answer in question_answers {
                let selected = selections_by_answer.get(&answer.id).map_or(&[][..], Vec::as_slice);
                let mut any = false;
                for option_id in selected {
                    let Some(option) = options_by_id.get(option_id) else {
                        continue;
                    };
                    *selection_counts.entry(option.display_label().to_owned()).or_insert(0) += 1;
                    any = true;
                    if question.question_type == QuestionType::SingleChoice {
                        total_responded += 1;
                    }
                }
                if question.question_type == QuestionType::MultiSelect && any {
                    total_responded += 1;
                }
            }
            QuestionStats::Choice {
                selection_counts,
                total_responded,
            }
        }
        QuestionType::Number => {
            let values: Vec<f64> = question_answers
                .iter()
                .filter_map(|answer| answer.number_value)
                .collect();
            let avg_value = if values.is_empty() {
                0.0
            } else {
                round2(values.iter().sum::<f64>() / values.len() as f64)
            };
            QuestionStats::Number {
                avg_value,
                total_answers: values.len() as u64,
            }
        }
        QuestionType::Text => QuestionStats::Text {
            total_answers: question_answers
                .iter()
                .filter(|answer| answer.text_value.is_some())
                .count() as u64,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    struct Fixture {
        categories: Vec<category::Model>,
        key_choices: Vec<key_choice::Model>,
        questions: Vec<question::Model>,
        options: Vec<question_option::Model>,
        answers: Vec<answer::Model>,
        selections: Vec<answer_option::Model>,
    }

    fn rating_answer(response_id: Uuid, question_id: Uuid, value: i32) -> answer::Model {
        answer::Model {
            id: Uuid::new_v4(),
            response_id,
            question_id,
            rating_value: Some(value),
            number_value: None,
            text_value: None,
        }
    }

    fn choice_answer(response_id: Uuid, question_id: Uuid) -> answer::Model {
        answer::Model {
            id: Uuid::new_v4(),
            response_id,
            question_id,
            rating_value: None,
            number_value: None,
            text_value: None,
        }
    }

    /// Two categories; a rating and a multi-select question in the first,
    /// a number question in the second. Three responses, one of which only
    /// answered the rating question.
    fn fixture() -> Fixture {
        let survey_id = Uuid::new_v4();
        let experience = category::Model {
            id: Uuid::new_v4(),
            survey_id,
            cat_number: 1,
            name: "Experience".to_owned(),
        };
        let usage = category::Model {
            id: Uuid::new_v4(),
            survey_id,
            cat_number: 2,
            name: "Usage".to_owned(),
        };

        let rating = question::Model {
            id: Uuid::new_v4(),
            survey_id,
            category_id: experience.id,
            question_number: 1,
            question_type: QuestionType::Rating,
            question_text: "How satisfied are you?".to_owned(),
            question_label: "q1".to_owned(),
            scale: Some("1-5".to_owned()),
            placeholder: None,
        };
        let multi = question::Model {
            id: Uuid::new_v4(),
            survey_id,
            category_id: experience.id,
            question_number: 2,
            question_type: QuestionType::MultiSelect,
            question_text: "Which features do you use?".to_owned(),
            question_label: "q2".to_owned(),
            scale: None,
            placeholder: None,
        };
        let number = question::Model {
            id: Uuid::new_v4(),
            survey_id,
            category_id: usage.id,
            question_number: 3,
            question_type: QuestionType::Number,
            question_text: "Hours per week?".to_owned(),
            question_label: "q3".to_owned(),
            scale: None,
            placeholder: None,
        };

        let editor = question_option::Model {
            id: Uuid::new_v4(),
            question_id: multi.id,
            option_number: Some(1),
            value: None,
            label: "Editor".to_owned(),
            text: None,
            is_other: false,
        };
        let terminal = question_option::Model {
            id: Uuid::new_v4(),
            question_id: multi.id,
            option_number: Some(2),
            value: None,
            label: "Terminal".to_owned(),
            text: None,
            is_other: false,
        };

        let responses = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let mut answers = vec![
            rating_answer(responses[0], rating.id, 4),
            rating_answer(responses[1], rating.id, 5),
            rating_answer(responses[2], rating.id, 4),
        ];
        let first_multi = choice_answer(responses[0], multi.id);
        let second_multi = choice_answer(responses[1], multi.id);
        let selections = vec![
            answer_option::Model {
                answer_id: first_multi.id,
                option_id: editor.id,
            },
            answer_option::Model {
                answer_id: first_multi.id,
                option_id: terminal.id,
            },
            answer_option::Model {
                answer_id: second_multi.id,
                option_id: editor.id,
            },
        ];
        answers.push(first_multi);
        answers.push(second_multi);
        answers.push(answer::Model {
            id: Uuid::new_v4(),
            response_id: responses[0],
            question_id: number.id,
            rating_value: None,
            number_value: Some(10.0),
            text_value: None,
        });
        answers.push(answer::Model {
            id: Uuid::new_v4(),
            response_id: responses[1],
            question_id: number.id,
            rating_value: None,
            number_value: Some(15.5),
            text_value: None,
        });

        Fixture {
            categories: vec![experience, usage],
            key_choices: vec![key_choice::Model {
                id: Uuid::new_v4(),
                survey_id,
                key: "1".to_owned(),
                description: "Strongly disagree".to_owned(),
            }],
            questions: vec![rating, multi, number],
            options: vec![editor, terminal],
            answers,
            selections,
        }
    }

    #[test]
    fn test_build_analysis() {
        let fixture = fixture();
        let analysis = build_analysis(
            &fixture.categories,
            &fixture.key_choices,
            &fixture.questions,
            &fixture.options,
            &fixture.answers,
            &fixture.selections,
            3,
        );

        assert_eq!(analysis.total_responses, 3);
        assert_eq!(analysis.key_choices.get("1").map(String::as_str), Some("Strongly disagree"));

        let experience = &analysis.by_category["Experience"];
        assert_eq!(experience.questions.len(), 2);
        let QuestionStats::Rating {
            avg_rating,
            total_answers,
            rating_distribution,
        } = &experience.questions[0].stats
        else {
            panic!("expected rating stats");
        };
        assert!((avg_rating - 4.33).abs() < f64::EPSILON);
        assert_eq!(*total_answers, 3);
        assert_eq!(rating_distribution[&4], 2);
        assert_eq!(rating_distribution[&5], 1);
        assert_eq!(rating_distribution[&1], 0);

        let QuestionStats::Choice {
            selection_counts,
            total_responded,
        } = &experience.questions[1].stats
        else {
            panic!("expected choice stats");
        };
        assert_eq!(selection_counts["Editor"], 2);
        assert_eq!(selection_counts["Terminal"], 1);
        assert_eq!(*total_responded, 2);

        // only the rating question feeds the category average
        assert_eq!(experience.avg_rating, Some(4.33));

        let usage = &analysis.by_category["Usage"];
        let QuestionStats::Number {
            avg_value,
            total_answers,
        } = &usage.questions[0].stats
        else {
            panic!("expected number stats");
        };
        assert!((avg_value - 12.75).abs() < f64::EPSILON);
        assert_eq!(*total_answers, 2);
        assert_eq!(usage.avg_rating, None);

        assert!((analysis.completion_rate["q1"] - 1.0).abs() < f64::EPSILON);
        assert!((analysis.completion_rate["q2"] - 0.67).abs() < f64::EPSILON);
        assert!((analysis.completion_rate["q3"] - 0.67).abs() < f64::EPSILON);
    }

    #[test]
    fn test_build_analysis_without_responses() {
        let fixture = fixture();
        let analysis = build_analysis(
            &fixture.categories,
            &fixture.key_choices,
            &fixture.questions,
            &fixture.options,
            &[],
            &[],
            0,
        );

        assert_eq!(analysis.total_responses, 0);
        let experience = &analysis.by_category["Experience"];
        let QuestionStats::Rating {
            avg_rating,
            total_answers,
            ..
        } = &experience.questions[0].stats
        else {
            panic!("expected rating stats");
        };
        assert!(avg_rating.abs() < f64::EPSILON);
        assert_eq!(*total_answers, 0);
        assert!(analysis.completion_rate.values().all(|rate| rate.abs() < f64::EPSILON));
    }
}
