pub mod mutation;
pub mod query;

pub use mutation::{Mutation, NewCategory, NewKeyChoice, NewOption, NewQuestion, NewSurvey};
pub use query::Query;
