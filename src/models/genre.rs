//! Genre model and submission form

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{
    catalog_url,
    validation::{self, FieldError},
    BookSummary,
};

/// Genre document, e.g. Fantasy or Science Fiction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreData {
    pub name: String,
}

impl Genre {
    pub fn new(id: Uuid, data: GenreData) -> Self {
        Self {
            id,
            name: data.name,
            url: catalog_url("genre", id),
        }
    }
}

fn validate_genre_name_length(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    // empty names are reported by the required check
    if len == 0 || (3..=100).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new("length"))
    }
}

/// Genre create/update request body
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Genre name required"),
        custom(
            function = "validate_genre_name_length",
            message = "Genre name must be between 3 and 100 characters."
        )
    )]
    pub name: String,
}

impl GenreForm {
    pub fn sanitize(self) -> Self {
        Self {
            name: validation::clean(&self.name),
        }
    }

    pub fn check(self) -> Result<GenreData, (Self, Vec<FieldError>)> {
        let form = self.sanitize();
        match form.validate() {
            Ok(()) => Ok(GenreData { name: form.name }),
            Err(errors) => {
                let errors = validation::collect_errors(&errors, &[("name", form.name.clone())]);
                Err((form, errors))
            }
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenreFormRejection {
    pub title: String,
    pub genre: GenreForm,
    pub errors: Vec<FieldError>,
}

/// Genre detail with the books filed under it
#[derive(Debug, Serialize, ToSchema)]
pub struct GenreDetail {
    pub genre: Genre,
    pub genre_books: Vec<BookSummary>,
}
