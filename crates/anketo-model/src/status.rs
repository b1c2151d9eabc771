use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct Status {
    pub database: ComponentStatus,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComponentStatus {
    Ok,
    Error,
}

impl ComponentStatus {
    #[must_use]
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl<T, E> From<Result<T, E>> for ComponentStatus {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(_) => Self::Error,
        }
    }
}
