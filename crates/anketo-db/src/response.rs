pub mod mutation;
pub mod query;

pub use mutation::{Mutation, NewAnswer};
pub use query::Query;
