mod common;

use crate::common::setup_schema;
use crate::common::survey::{create_test_survey, test_survey_rows};
use anketo_db::survey::NewSurvey;
use anketo_db::{question, survey};
use anketo_entity::question::QuestionType;
use sea_orm::Database;
use test_log::test;
use uuid::Uuid;

#[test(tokio::test)]
async fn test_create_and_load_survey() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();

    let created = create_test_survey(db).await;
    let loaded = survey::Query::load_survey(db, created.id).await.unwrap().unwrap();
    assert_eq!(loaded.title, "Developer Experience");
    assert_eq!(loaded.language, "en");

    let questions = question::Query::load_questions(db, created.id).await.unwrap();
    assert_eq!(questions.len(), 3);
    assert_eq!(
        questions.iter().map(|q| q.question_number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(questions[0].question_type, QuestionType::Rating);

    let question_ids: Vec<_> = questions.iter().map(|q| q.id).collect();
    let options = question::Query::load_options(db, &question_ids).await.unwrap();
    assert_eq!(options.len(), 2);
    assert!(options.iter().all(|option| option.question_id == questions[1].id));

    let key_choices = survey::Query::load_key_choices(db, created.id).await.unwrap();
    assert_eq!(key_choices.len(), 1);
    assert_eq!(key_choices[0].description, "Strongly disagree");
}

#[test(tokio::test)]
async fn test_load_surveys_filters() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();

    let open = create_test_survey(db).await;
    let closed = survey::Mutation::create(
        db,
        NewSurvey {
            language: "de".to_owned(),
            end_time: "2026-01-31T23:59:59".parse().unwrap(),
            ..test_survey_rows()
        },
    )
    .await
    .unwrap();

    let now = "2026-08-01T12:00:00".parse().unwrap();

    let active = survey::Query::load_surveys(db, None, false, now).await.unwrap();
    assert_eq!(active.iter().map(|s| s.id).collect::<Vec<_>>(), vec![open.id]);

    let all = survey::Query::load_surveys(db, None, true, now).await.unwrap();
    assert_eq!(all.len(), 2);

    let german = survey::Query::load_surveys(db, Some("de"), true, now).await.unwrap();
    assert_eq!(german.iter().map(|s| s.id).collect::<Vec<_>>(), vec![closed.id]);

    let none = survey::Query::load_surveys(db, Some("fr"), true, now).await.unwrap();
    assert!(none.is_empty());
}

#[test(tokio::test)]
async fn test_delete_survey() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();

    let created = create_test_survey(db).await;
    assert!(survey::Mutation::delete(db, created.id).await.unwrap());
    assert!(survey::Query::load_survey(db, created.id).await.unwrap().is_none());

    // a second delete finds nothing
    assert!(!survey::Mutation::delete(db, created.id).await.unwrap());
    assert!(!survey::Mutation::delete(db, Uuid::new_v4()).await.unwrap());
}
