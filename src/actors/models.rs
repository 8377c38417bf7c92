use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::{validate_not_blank, validate_sex};

/// Represents an actor in the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Actor {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Meryl")]
    pub name: String,
    #[schema(example = "Streep")]
    pub surname: String,
    #[schema(example = "F", pattern = "M|F")]
    pub sex: String,
    #[schema(example = 1949)]
    pub birth_year: i32,
    #[schema(example = "Summit")]
    pub birth_place: String,
    pub rest_year: Option<i32>,
    #[schema(example = "English")]
    pub language: Option<String>,
}

/// Data needed to create an actor; the id is assigned by the store
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateActor {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    #[schema(example = "Meryl")]
    pub name: String,
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    #[schema(example = "Streep")]
    pub surname: String,
    #[validate(custom = "validate_sex")]
    #[schema(example = "F")]
    pub sex: String,
    #[validate(range(min = 1800, max = 2100))]
    #[schema(example = 1949)]
    pub birth_year: i32,
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    #[schema(example = "Summit")]
    pub birth_place: String,
    #[validate(range(min = 1800, max = 2100))]
    pub rest_year: Option<i32>,
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "English")]
    pub language: Option<String>,
}

/// Partial update; only supplied fields change
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateActor {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub surname: Option<String>,
    #[validate(custom = "validate_sex")]
    pub sex: Option<String>,
    #[validate(range(min = 1800, max = 2100))]
    pub birth_year: Option<i32>,
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub birth_place: Option<String>,
    #[validate(range(min = 1800, max = 2100))]
    pub rest_year: Option<i32>,
    #[validate(length(min = 1, max = 50))]
    pub language: Option<String>,
}

impl UpdateActor {
    /// True when no field was supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.surname.is_none()
            && self.sex.is_none()
            && self.birth_year.is_none()
            && self.birth_place.is_none()
            && self.rest_year.is_none()
            && self.language.is_none()
    }

    /// Whether the update touches the birth/rest year pair
    pub fn touches_lifespan(&self) -> bool {
        self.birth_year.is_some() || self.rest_year.is_some()
    }

    /// Apply this update on top of `actor`
    pub fn apply_to(&self, actor: &Actor) -> Actor {
        Actor {
            id: actor.id,
            name: self.name.clone().unwrap_or_else(|| actor.name.clone()),
            surname: self.surname.clone().unwrap_or_else(|| actor.surname.clone()),
            sex: self.sex.clone().unwrap_or_else(|| actor.sex.clone()),
            birth_year: self.birth_year.unwrap_or(actor.birth_year),
            birth_place: self
                .birth_place
                .clone()
                .unwrap_or_else(|| actor.birth_place.clone()),
            rest_year: self.rest_year.or(actor.rest_year),
            language: self.language.clone().or_else(|| actor.language.clone()),
        }
    }
}
