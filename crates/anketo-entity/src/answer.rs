use sea_orm::entity::prelude::*;

/// One respondent's value for one question within one response.
///
/// Exactly one of the value columns is set, depending on the question type;
/// choice questions carry their selections in the `answer_option` join.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "answer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub response_id: Uuid,
    pub question_id: Uuid,
    pub rating_value: Option<i32>,
    #[sea_orm(column_type = "Double", nullable)]
    pub number_value: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub text_value: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::response::Entity",
        from = "Column::ResponseId",
        to = "super::response::Column::Id"
    )]
    Response,
    #[sea_orm(
        belongs_to = "super::question::Entity",
        from = "Column::QuestionId",
        to = "super::question::Column::Id"
    )]
    Question,
}

impl Related<super::response::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Response.def()
    }
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::question_option::Entity> for Entity {
    fn to() -> RelationDef {
        super::answer_option::Relation::Option.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::answer_option::Relation::Answer.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
