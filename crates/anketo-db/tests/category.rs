mod common;

use crate::common::setup_schema;
use crate::common::survey::create_test_survey;
use anketo_db::category;
use sea_orm::{Database, DbConn};
use test_log::test;
use uuid::Uuid;

async fn category_numbers(db: &DbConn, survey_id: Uuid) -> Vec<(String, i32)> {
    category::Query::load_categories(db, survey_id)
        .await
        .unwrap()
        .into_iter()
        .map(|cat| (cat.name, cat.cat_number))
        .collect()
}

#[test(tokio::test)]
async fn test_insert_category_appends() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();
    let survey = create_test_survey(db).await;

    let created = category::Mutation::insert(db, survey.id, "Extras".to_owned(), None)
        .await
        .unwrap();
    assert_eq!(created.cat_number, 3);
    assert_eq!(
        category_numbers(db, survey.id).await,
        vec![
            ("Tooling".to_owned(), 1),
            ("Workflow".to_owned(), 2),
            ("Extras".to_owned(), 3)
        ]
    );
}

#[test(tokio::test)]
async fn test_insert_category_shifts_later_ones() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();
    let survey = create_test_survey(db).await;

    let created = category::Mutation::insert(db, survey.id, "First things".to_owned(), Some(1))
        .await
        .unwrap();
    assert_eq!(created.cat_number, 1);
    assert_eq!(
        category_numbers(db, survey.id).await,
        vec![
            ("First things".to_owned(), 1),
            ("Tooling".to_owned(), 2),
            ("Workflow".to_owned(), 3)
        ]
    );
}

#[test(tokio::test)]
async fn test_move_category() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();
    let survey = create_test_survey(db).await;

    let categories = category::Query::load_categories(db, survey.id).await.unwrap();
    let workflow = categories.last().unwrap();

    let moved = category::Mutation::update(db, survey.id, workflow.id, None, Some(1))
        .await
        .unwrap();
    assert_eq!(moved.cat_number, 1);
    assert_eq!(
        category_numbers(db, survey.id).await,
        vec![("Workflow".to_owned(), 1), ("Tooling".to_owned(), 2)]
    );
}

#[test(tokio::test)]
async fn test_rename_category_keeps_order() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();
    let survey = create_test_survey(db).await;

    let categories = category::Query::load_categories(db, survey.id).await.unwrap();
    let tooling = &categories[0];

    let renamed = category::Mutation::update(db, survey.id, tooling.id, Some("Editors".to_owned()), None)
        .await
        .unwrap();
    assert_eq!(renamed.name, "Editors");
    assert_eq!(
        category_numbers(db, survey.id).await,
        vec![("Editors".to_owned(), 1), ("Workflow".to_owned(), 2)]
    );
}

#[test(tokio::test)]
async fn test_delete_category_renumbers() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();
    let survey = create_test_survey(db).await;

    let extras = category::Mutation::insert(db, survey.id, "Extras".to_owned(), None)
        .await
        .unwrap();
    assert_eq!(extras.cat_number, 3);

    let categories = category::Query::load_categories(db, survey.id).await.unwrap();
    let tooling = &categories[0];
    category::Mutation::delete(db, survey.id, tooling.id).await.unwrap();

    assert_eq!(
        category_numbers(db, survey.id).await,
        vec![("Workflow".to_owned(), 1), ("Extras".to_owned(), 2)]
    );
}

#[test(tokio::test)]
async fn test_delete_unknown_category() {
    let db = &Database::connect("sqlite::memory:").await.unwrap();
    setup_schema(db).await.unwrap();
    let survey = create_test_survey(db).await;

    let res = category::Mutation::delete(db, survey.id, Uuid::new_v4()).await;
    assert!(res.is_err());
    assert_eq!(category_numbers(db, survey.id).await.len(), 2);
}
