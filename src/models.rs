use serde::Deserialize;
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Body of `POST /record_action`.
///
/// `action` stays a plain string so unknown values can be ignored instead
/// of failing form extraction.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordActionForm {
    #[schema(example = "2024-01-01T09:00")]
    pub datetime: String,

    #[schema(example = "Alice")]
    pub employee_name: String,

    #[schema(example = "check_in")]
    pub action: String,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    CheckIn,
    CheckOut,
}
