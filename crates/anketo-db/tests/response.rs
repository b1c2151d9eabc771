mod common;

use crate::common::setup_schema;
use crate::common::survey::create_test_survey;
use anketo_db::response::{self, NewAnswer};
use anketo_db::question;
use sea_orm::Database;
use test_log::test;

#[test(tokio::test)]
async fn test_store_and_load_response() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();
    let survey = create_test_survey(db).await;

    let questions = question::Query::load_questions(db, survey.id).await.unwrap();
    let question_ids: Vec<_> = questions.iter().map(|q| q.id).collect();
    let options = question::Query::load_options(db, &question_ids).await.unwrap();

    let stored = response::Mutation::create(
        db,
        survey.id,
        vec![
            NewAnswer {
                question_id: questions[0].id,
                rating_value: Some(4),
                number_value: None,
                text_value: None,
                selected_options: Vec::new(),
            },
            NewAnswer {
                question_id: questions[1].id,
                rating_value: None,
                number_value: None,
                text_value: None,
                selected_options: vec![options[0].id],
            },
            NewAnswer {
                question_id: questions[2].id,
                rating_value: None,
                number_value: None,
                text_value: Some("more docs please".to_owned()),
                selected_options: Vec::new(),
            },
        ],
    )
    .await
    .unwrap();

    assert_eq!(response::Query::count_responses(db, survey.id).await.unwrap(), 1);

    let responses = response::Query::load_responses(db, survey.id).await.unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].id, stored.id);

    let answers = response::Query::load_answers_for_survey(db, survey.id).await.unwrap();
    assert_eq!(answers.len(), 3);
    assert!(answers.iter().any(|a| a.rating_value == Some(4)));
    assert!(answers.iter().any(|a| a.text_value.as_deref() == Some("more docs please")));

    let answer_ids: Vec<_> = answers.iter().map(|a| a.id).collect();
    let selections = response::Query::load_selections(db, &answer_ids).await.unwrap();
    assert_eq!(selections.len(), 1);
    assert_eq!(selections[0].option_id, options[0].id);
}

#[test(tokio::test)]
async fn test_empty_response_counts() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();
    let survey = create_test_survey(db).await;

    response::Mutation::create(db, survey.id, Vec::new()).await.unwrap();
    response::Mutation::create(db, survey.id, Vec::new()).await.unwrap();

    assert_eq!(response::Query::count_responses(db, survey.id).await.unwrap(), 2);
    assert!(response::Query::load_answers_for_survey(db, survey.id).await.unwrap().is_empty());
    assert!(response::Query::load_selections(db, &[]).await.unwrap().is_empty());
}
