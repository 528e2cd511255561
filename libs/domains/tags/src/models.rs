use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Tag entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

/// DTO for creating a tag
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTag {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

impl CreateTag {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// DTO for renaming a tag; the name is the only field, so it is required
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateTag {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}
