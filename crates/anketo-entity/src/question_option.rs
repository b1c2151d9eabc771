use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "question_option")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub question_id: Uuid,
    pub option_number: Option<i32>,
    pub value: Option<String>,
    pub label: String,
    pub text: Option<String>,
    pub is_other: bool,
}

impl Model {
    /// Display label used for tabulation and export, `label` first, then
    /// `text`, then `value`.
    #[must_use]
    pub fn display_label(&self) -> &str {
        if !self.label.is_empty() {
            return &self.label;
        }
        if let Some(text) = self.text.as_deref()
            && !text.is_empty()
        {
            return text;
        }
        self.value.as_deref().unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::question::Entity",
        from = "Column::QuestionId",
        to = "super::question::Column::Id"
    )]
    Question,
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::answer::Entity> for Entity {
    fn to() -> RelationDef {
        super::answer_option::Relation::Answer.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::answer_option::Relation::Option.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
