use crate::{FlattenTransactionResultExt, RequireRecord};
use anketo_entity::category;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::prelude::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};
use std::error::Error;
use uuid::Uuid;

pub struct Mutation;

impl Mutation {
    /// Inserts a category at `position` (1-based, clamped to the end of the
    /// list) and shifts the categories at or after it up by one. The whole
    /// sequence runs in one transaction so `cat_number` stays dense.
    pub async fn insert<C: TransactionTrait>(
        conn: &C,
        survey_id: Uuid,
        name: String,
        position: Option<i32>,
    ) -> Result<category::Model, DbErr> {
        conn.transaction::<_, category::Model, DbErr>(|txn| {
            Box::pin(async move {
                let count = i32::try_from(
                    category::Entity::find()
                        .filter(category::Column::SurveyId.eq(survey_id))
                        .all(txn)
                        .await?
                        .len(),
                )
                .map_err(|_| DbErr::Custom("category count out of range".to_owned()))?;
                let position = position.unwrap_or(count + 1).clamp(1, count + 1);

                category::Entity::update_many()
                    .col_expr(
                        category::Column::CatNumber,
                        Expr::col(category::Column::CatNumber).add(1),
                    )
                    .filter(category::Column::SurveyId.eq(survey_id))
                    .filter(category::Column::CatNumber.gte(position))
                    .exec(txn)
                    .await?;

                category::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    survey_id: Set(survey_id),
                    cat_number: Set(position),
                    name: Set(name),
                }
                .insert(txn)
                .await
            })
        })
        .await
        .flatten_res()
        .inspect_err(|error| tracing::error!(error = error as &dyn Error, %survey_id, "failed to insert category"))
    }

    /// Renames and/or moves a category. Moving rebuilds the dense ordering
    /// from the full list instead of shifting ranges, which also repairs any
    /// gaps left behind by earlier manual edits.
    pub async fn update<C: TransactionTrait>(
        conn: &C,
        survey_id: Uuid,
        category_id: Uuid,
        name: Option<String>,
        position: Option<i32>,
    ) -> Result<category::Model, DbErr> {
        conn.transaction::<_, category::Model, DbErr>(|txn| {
            Box::pin(async move {
                let mut ordered = load_ordered(txn, survey_id).await?;
                let index = ordered
                    .iter()
                    .position(|cat| cat.id == category_id)
                    .ok_or_else(|| DbErr::RecordNotFound("category not found".to_owned()))?;

                if let Some(name) = name {
                    let updated = category::ActiveModel {
                        id: Unchanged(category_id),
                        name: Set(name),
                        ..Default::default()
                    }
                    .update(txn)
                    .await?;
                    ordered[index] = updated;
                }

                if let Some(position) = position {
                    let target = usize::try_from(position.clamp(1, i32::try_from(ordered.len()).unwrap_or(i32::MAX)))
                        .unwrap_or(1)
                        - 1;
                    let moved = ordered.remove(index);
                    ordered.insert(target, moved);
                }

                apply_plan(txn, renumber_plan(&ordered)).await?;

                category::Entity::find_by_id(category_id).one(txn).await.require()
            })
        })
        .await
        .flatten_res()
        .inspect_err(|error| tracing::error!(error = error as &dyn Error, %category_id, "failed to update category"))
    }

    /// Deletes the category (its questions cascade) and renumbers the
    /// remainder back to a dense 1..=N.
    pub async fn delete<C: TransactionTrait>(conn: &C, survey_id: Uuid, category_id: Uuid) -> Result<(), DbErr> {
        conn.transaction::<_, (), DbErr>(|txn| {
            Box::pin(async move {
                let res = category::Entity::delete_many()
                    .filter(category::Column::SurveyId.eq(survey_id))
                    .filter(category::Column::Id.eq(category_id))
                    .exec(txn)
                    .await?;
                if res.rows_affected == 0 {
                    return Err(DbErr::RecordNotFound("category not found".to_owned()));
                }

                let ordered = load_ordered(txn, survey_id).await?;
                apply_plan(txn, renumber_plan(&ordered)).await
            })
        })
        .await
        .flatten_res()
        .inspect_err(|error| tracing::error!(error = error as &dyn Error, %category_id, "failed to delete category"))
    }
}

async fn load_ordered<C: ConnectionTrait>(conn: &C, survey_id: Uuid) -> Result<Vec<category::Model>, DbErr> {
    category::Entity::find()
        .filter(category::Column::SurveyId.eq(survey_id))
        .order_by_asc(category::Column::CatNumber)
        .all(conn)
        .await
}

/// The updates needed to make `ordered` densely numbered 1..=N. Only rows
/// whose `cat_number` is out of place are touched.
fn renumber_plan(ordered: &[category::Model]) -> Vec<(Uuid, i32)> {
    ordered
        .iter()
        .enumerate()
        .filter_map(|(index, cat)| {
            let expected = i32::try_from(index).ok()? + 1;
            (cat.cat_number != expected).then_some((cat.id, expected))
        })
        .collect()
}

async fn apply_plan<C: ConnectionTrait>(conn: &C, plan: Vec<(Uuid, i32)>) -> Result<(), DbErr> {
    for (id, cat_number) in plan {
        category::ActiveModel {
            id: Unchanged(id),
            cat_number: Set(cat_number),
            ..Default::default()
        }
        .update(conn)
        .await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(cat_number: i32) -> category::Model {
        category::Model {
            id: Uuid::new_v4(),
            survey_id: Uuid::nil(),
            cat_number,
            name: String::new(),
        }
    }

    #[test]
    fn test_renumber_plan_dense_list_untouched() {
        let ordered = [cat(1), cat(2), cat(3)];
        assert!(renumber_plan(&ordered).is_empty());
    }

    #[test]
    fn test_renumber_plan_closes_gap() {
        let ordered = [cat(1), cat(3), cat(4)];
        let plan = renumber_plan(&ordered);
        assert_eq!(plan, vec![(ordered[1].id, 2), (ordered[2].id, 3)]);
    }

    #[test]
    fn test_renumber_plan_after_reorder() {
        // a category moved from the tail to the head
        let ordered = [cat(3), cat(1), cat(2)];
        let plan = renumber_plan(&ordered);
        assert_eq!(plan, vec![(ordered[0].id, 1), (ordered[1].id, 2), (ordered[2].id, 3)]);
    }
}
