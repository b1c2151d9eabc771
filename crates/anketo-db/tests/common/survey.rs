use anketo_db::survey::{Mutation, NewCategory, NewKeyChoice, NewOption, NewQuestion, NewSurvey};
use anketo_entity::question::QuestionType;
use anketo_entity::survey;
use sea_orm::DbConn;

/// One survey with two categories, three questions (rating, single choice
/// with two options, text) and a key legend. The window closes end of 2030.
pub fn test_survey_rows() -> NewSurvey {
    NewSurvey {
        title: "Developer Experience".to_owned(),
        instructions: "Please answer honestly.".to_owned(),
        version: "1.0".to_owned(),
        language: "en".to_owned(),
        start_time: "2026-01-01T00:00:00".parse().unwrap(),
        end_time: "2030-12-31T23:59:59".parse().unwrap(),
        categories: vec![
            NewCategory {
                document_id: 1,
                cat_number: 1,
                name: "Tooling".to_owned(),
            },
            NewCategory {
                document_id: 2,
                cat_number: 2,
                name: "Workflow".to_owned(),
            },
        ],
        key_choices: vec![NewKeyChoice {
            key: "1".to_owned(),
            description: "Strongly disagree".to_owned(),
        }],
        questions: vec![
            NewQuestion {
                question_number: 1,
                category: 1,
                question_type: QuestionType::Rating,
                question_text: "How satisfied are you with your tools?".to_owned(),
                question_label: "q1".to_owned(),
                scale: Some("1-5".to_owned()),
                placeholder: None,
                options: Vec::new(),
            },
            NewQuestion {
                question_number: 2,
                category: 1,
                question_type: QuestionType::SingleChoice,
                question_text: "Would you recommend them?".to_owned(),
                question_label: "q2".to_owned(),
                scale: None,
                placeholder: None,
                options: vec![
                    NewOption {
                        option_number: Some(1),
                        value: Some("yes".to_owned()),
                        label: "Yes".to_owned(),
                        text: None,
                        is_other: false,
                    },
                    NewOption {
                        option_number: Some(2),
                        value: Some("no".to_owned()),
                        label: "No".to_owned(),
                        text: None,
                        is_other: false,
                    },
                ],
            },
            NewQuestion {
                question_number: 3,
                category: 2,
                question_type: QuestionType::Text,
                question_text: "Anything else?".to_owned(),
                question_label: "q3".to_owned(),
                scale: None,
                placeholder: Some("Your thoughts".to_owned()),
                options: Vec::new(),
            },
        ],
    }
}

pub async fn create_test_survey(db: &DbConn) -> survey::Model {
    Mutation::create(db, test_survey_rows()).await.unwrap()
}
