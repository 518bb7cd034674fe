//! Author model and submission form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{
    catalog_url,
    validation::{self, FieldError},
    BookSummary,
};

/// Author document as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    /// `"<family_name>, <first_name>"`
    pub name: String,
    /// `"<birth> - <death>"`, either side may be blank
    pub lifespan: String,
    pub url: String,
}

/// Persisted author fields
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorData {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn new(id: Uuid, data: AuthorData) -> Self {
        let name = if data.first_name.is_empty() || data.family_name.is_empty() {
            String::new()
        } else {
            format!("{}, {}", data.family_name, data.first_name)
        };
        let lifespan = match (data.date_of_birth, data.date_of_death) {
            (None, None) => String::new(),
            (birth, death) => format!(
                "{} - {}",
                birth.map(|d| d.to_string()).unwrap_or_default(),
                death.map(|d| d.to_string()).unwrap_or_default()
            ),
        };
        Self {
            id,
            first_name: data.first_name,
            family_name: data.family_name,
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
            name,
            lifespan,
            url: catalog_url("author", id),
        }
    }
}

fn validate_first_name(value: &str) -> Result<(), ValidationError> {
    validation::validate_name(value, "First name")
}

fn validate_family_name(value: &str) -> Result<(), ValidationError> {
    validation::validate_name(value, "Family name")
}

/// Author create/update request body
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "First name must be specified."),
        custom(function = "validate_first_name")
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Family name must be specified."),
        custom(function = "validate_family_name")
    )]
    pub family_name: String,
    /// ISO-8601 date, blank means unknown
    #[validate(custom(function = "validation::validate_iso8601", message = "Invalid date of birth"))]
    pub date_of_birth: Option<String>,
    /// ISO-8601 date, blank means unknown
    #[validate(custom(function = "validation::validate_iso8601", message = "Invalid date of death"))]
    pub date_of_death: Option<String>,
}

impl AuthorForm {
    /// Trims and escapes names; blank dates become absent
    pub fn sanitize(self) -> Self {
        Self {
            first_name: validation::clean(&self.first_name),
            family_name: validation::clean(&self.family_name),
            date_of_birth: validation::optional(self.date_of_birth.as_deref()),
            date_of_death: validation::optional(self.date_of_death.as_deref()),
        }
    }

    /// Sanitizes and validates, yielding either the fields to persist or the
    /// sanitized form together with its errors
    pub fn check(self) -> Result<AuthorData, (Self, Vec<FieldError>)> {
        let form = self.sanitize();
        if let Err(errors) = form.validate() {
            let fields = [
                ("first_name", form.first_name.clone()),
                ("family_name", form.family_name.clone()),
                ("date_of_birth", form.date_of_birth.clone().unwrap_or_default()),
                ("date_of_death", form.date_of_death.clone().unwrap_or_default()),
            ];
            let errors = validation::collect_errors(&errors, &fields);
            return Err((form, errors));
        }

        Ok(AuthorData {
            date_of_birth: form.date_of_birth.as_deref().and_then(validation::parse_iso8601_date),
            date_of_death: form.date_of_death.as_deref().and_then(validation::parse_iso8601_date),
            first_name: form.first_name,
            family_name: form.family_name,
        })
    }
}

/// Rejected author submission echoed back to the client
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorFormRejection {
    pub title: String,
    pub author: AuthorForm,
    pub errors: Vec<FieldError>,
}

/// Author detail with the books that reference it
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorDetail {
    pub author: Author,
    pub author_books: Vec<BookSummary>,
}
