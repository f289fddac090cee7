use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Location fields merged into a record before it is saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocationInfo {
    pub country: String,
    pub city: String,
    pub region: String,
}
