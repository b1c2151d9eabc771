use crate::FlattenTransactionResultExt;
use anketo_entity::question::QuestionType;
use anketo_entity::{category, key_choice, question, question_option, survey};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, TransactionTrait};
use std::collections::HashMap;
use std::error::Error;
use uuid::Uuid;

/// Row bundle for one survey ingestion, already validated and densely
/// numbered by the caller. `NewQuestion::category` references the document
/// id of one of the `categories` entries.
#[derive(Debug)]
pub struct NewSurvey {
    pub title: String,
    pub instructions: String,
    pub version: String,
    pub language: String,
    pub start_time: chrono::NaiveDateTime,
    pub end_time: chrono::NaiveDateTime,
    pub categories: Vec<NewCategory>,
    pub key_choices: Vec<NewKeyChoice>,
    pub questions: Vec<NewQuestion>,
}

#[derive(Debug)]
pub struct NewCategory {
    pub document_id: i64,
    pub cat_number: i32,
    pub name: String,
}

#[derive(Debug)]
pub struct NewKeyChoice {
    pub key: String,
    pub description: String,
}

#[derive(Debug)]
pub struct NewQuestion {
    pub question_number: i32,
    pub category: i64,
    pub question_type: QuestionType,
    pub question_text: String,
    pub question_label: String,
    pub scale: Option<String>,
    pub placeholder: Option<String>,
    pub options: Vec<NewOption>,
}

#[derive(Debug)]
pub struct NewOption {
    pub option_number: Option<i32>,
    pub value: Option<String>,
    pub label: String,
    pub text: Option<String>,
    pub is_other: bool,
}

pub struct Mutation;

impl Mutation {
    /// Writes the whole document in one transaction: the survey row, its
    /// categories, key choices, questions and their options.
    pub async fn create<C: TransactionTrait>(conn: &C, new: NewSurvey) -> Result<survey::Model, DbErr> {
        conn.transaction::<_, survey::Model, DbErr>(|txn| {
            Box::pin(async move {
                let now = Utc::now().naive_utc();
                let created = survey::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    title: Set(new.title),
                    instructions: Set(new.instructions),
                    version: Set(new.version),
                    language: Set(new.language),
                    start_time: Set(new.start_time),
                    end_time: Set(new.end_time),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(txn)
                .await?;

                let mut category_ids = HashMap::with_capacity(new.categories.len());
                for cat in new.categories {
                    let row = category::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        survey_id: Set(created.id),
                        cat_number: Set(cat.cat_number),
                        name: Set(cat.name),
                    }
                    .insert(txn)
                    .await?;
                    category_ids.insert(cat.document_id, row.id);
                }

                if !new.key_choices.is_empty() {
                    let rows: Vec<_> = new
                        .key_choices
                        .into_iter()
                        .map(|kc| key_choice::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            survey_id: Set(created.id),
                            key: Set(kc.key),
                            description: Set(kc.description),
                        })
                        .collect();
                    key_choice::Entity::insert_many(rows).exec(txn).await?;
                }

                for q in new.questions {
                    let category_id = category_ids
                        .get(&q.category)
                        .copied()
                        .ok_or_else(|| DbErr::Custom(format!("unknown category {}", q.category)))?;
                    let row = question::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        survey_id: Set(created.id),
                        category_id: Set(category_id),
                        question_number: Set(q.question_number),
                        question_type: Set(q.question_type),
                        question_text: Set(q.question_text),
                        question_label: Set(q.question_label),
                        scale: Set(q.scale),
                        placeholder: Set(q.placeholder),
                    }
                    .insert(txn)
                    .await?;

                    if !q.options.is_empty() {
                        let rows: Vec<_> = q
                            .options
                            .into_iter()
                            .map(|opt| question_option::ActiveModel {
                                id: Set(Uuid::new_v4()),
                                question_id: Set(row.id),
                                option_number: Set(opt.option_number),
                                value: Set(opt.value),
                                label: Set(opt.label),
                                text: Set(opt.text),
                                is_other: Set(opt.is_other),
                            })
                            .collect();
                        question_option::Entity::insert_many(rows).exec(txn).await?;
                    }
                }

                Ok(created)
            })
        })
        .await
        .flatten_res()
        .inspect_err(|error| tracing::error!(error = error as &dyn Error, "failed to create survey"))
    }

    /// Deletes the survey; dependents go with it via the cascading foreign
    /// keys. Returns whether a row was actually removed.
    pub async fn delete<C: ConnectionTrait>(conn: &C, survey_id: Uuid) -> Result<bool, DbErr> {
        let res = survey::Entity::delete_many()
            .filter(survey::Column::Id.eq(survey_id))
            .exec(conn)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, %survey_id, "failed to delete survey");
            })?;
        Ok(res.rows_affected > 0)
    }
}
