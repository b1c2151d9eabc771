use crate::FlattenTransactionResultExt;
use anketo_entity::{answer, answer_option, response};
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, TransactionTrait};
use std::error::Error;
use uuid::Uuid;

/// One answer row plus the options it selected, already resolved against the
/// survey's questions by the caller.
#[derive(Debug)]
pub struct NewAnswer {
    pub question_id: Uuid,
    pub rating_value: Option<i32>,
    pub number_value: Option<f64>,
    pub text_value: Option<String>,
    pub selected_options: Vec<Uuid>,
}

pub struct Mutation;

impl Mutation {
    /// Writes the response row, its answers and their option links in one
    /// transaction.
    pub async fn create<C: TransactionTrait>(
        conn: &C,
        survey_id: Uuid,
        answers: Vec<NewAnswer>,
    ) -> Result<response::Model, DbErr> {
        conn.transaction::<_, response::Model, DbErr>(|txn| {
            Box::pin(async move {
                let created = response::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    survey_id: Set(survey_id),
                    submitted_at: Set(Utc::now().naive_utc()),
                }
                .insert(txn)
                .await?;

                for new in answers {
                    let row = answer::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        response_id: Set(created.id),
                        question_id: Set(new.question_id),
                        rating_value: Set(new.rating_value),
                        number_value: Set(new.number_value),
                        text_value: Set(new.text_value),
                    }
                    .insert(txn)
                    .await?;

                    if !new.selected_options.is_empty() {
                        let links: Vec<_> = new
                            .selected_options
                            .into_iter()
                            .map(|option_id| answer_option::ActiveModel {
                                answer_id: Set(row.id),
                                option_id: Set(option_id),
                            })
                            .collect();
                        answer_option::Entity::insert_many(links).exec(txn).await?;
                    }
                }

                Ok(created)
            })
        })
        .await
        .flatten_res()
        .inspect_err(|error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to store response"))
    }
}
