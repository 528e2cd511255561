use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use validator::Validate;

pub const DEFAULT_COLOR: &str = "#000000";

/// `#RRGGBB`
static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap());

fn validate_hex_color(color: &str) -> Result<(), validator::ValidationError> {
    if !HEX_COLOR.is_match(color) {
        return Err(validator::ValidationError::new("invalid_hex_color"));
    }
    Ok(())
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Category entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub color: String,
}

impl Category {
    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
    }
}

/// DTO for creating a new category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default = "default_color")]
    #[validate(custom(function = "validate_hex_color"))]
    #[schema(example = "#1E90FF")]
    pub color: String,
}

impl CreateCategory {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: default_color(),
        }
    }
}

/// DTO for updating an existing category
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
}
