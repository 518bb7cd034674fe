//! Book instance (physical copy) model and submission form

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{
    catalog_url,
    validation::{self, FieldError},
    Book, BookTitle,
};

/// Availability of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum BookStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Maintenance => "Maintenance",
            BookStatus::Loaned => "Loaned",
            BookStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(BookStatus::Available),
            "Maintenance" => Ok(BookStatus::Maintenance),
            "Loaned" => Ok(BookStatus::Loaned),
            "Reserved" => Ok(BookStatus::Reserved),
            other => Err(format!("Unknown book status: {}", other)),
        }
    }
}

/// Book instance document with the book stored as an identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    /// Identifier of the book this is a copy of
    pub book: Uuid,
    pub imprint: String,
    pub status: BookStatus,
    /// Date the copy is due back
    pub due_back: NaiveDate,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookInstanceData {
    pub book: Uuid,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: NaiveDate,
}

impl BookInstance {
    pub fn new(id: Uuid, data: BookInstanceData) -> Self {
        Self {
            id,
            book: data.book,
            imprint: data.imprint,
            status: data.status,
            due_back: data.due_back,
            url: catalog_url("bookinstance", id),
        }
    }

    /// Replaces the book identifier with the book document (`None` when dangling)
    pub fn populate(self, book: Option<Book>) -> PopulatedBookInstance {
        PopulatedBookInstance {
            id: self.id,
            book,
            imprint: self.imprint,
            status: self.status,
            due_back: self.due_back,
            url: self.url,
        }
    }
}

/// Book instance with its book populated
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PopulatedBookInstance {
    pub id: Uuid,
    pub book: Option<Book>,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: NaiveDate,
    pub url: String,
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    if status.is_empty() || status.parse::<BookStatus>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("status"))
    }
}

/// Book instance create/update request body
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookInstanceForm {
    /// Book identifier
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Book must be specified"),
        custom(function = "validation::validate_reference", message = "Invalid book reference")
    )]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    /// One of Available, Maintenance, Loaned, Reserved; blank means Maintenance
    #[serde(default)]
    #[validate(custom(function = "validate_status", message = "Invalid status"))]
    pub status: String,
    /// ISO-8601 date, blank means today
    #[validate(custom(function = "validation::validate_iso8601", message = "Invalid date"))]
    pub due_back: Option<String>,
}

impl BookInstanceForm {
    pub fn sanitize(self) -> Self {
        Self {
            book: validation::clean(&self.book),
            imprint: validation::clean(&self.imprint),
            status: validation::clean(&self.status),
            due_back: validation::optional(self.due_back.as_deref()),
        }
    }

    pub fn check(self) -> Result<BookInstanceData, (Self, Vec<FieldError>)> {
        let form = self.sanitize();
        if let Err(errors) = form.validate() {
            let fields = [
                ("book", form.book.clone()),
                ("imprint", form.imprint.clone()),
                ("status", form.status.clone()),
                ("due_back", form.due_back.clone().unwrap_or_default()),
            ];
            let errors = validation::collect_errors(&errors, &fields);
            return Err((form, errors));
        }

        let book = match Uuid::parse_str(&form.book) {
            Ok(book) => book,
            Err(_) => {
                let error = FieldError {
                    location: "body".to_string(),
                    param: "book".to_string(),
                    value: form.book.clone(),
                    msg: "Invalid book reference".to_string(),
                };
                return Err((form, vec![error]));
            }
        };
        let status = form.status.parse().unwrap_or_default();
        let due_back = form
            .due_back
            .as_deref()
            .and_then(validation::parse_iso8601_date)
            .unwrap_or_else(|| Utc::now().date_naive());

        Ok(BookInstanceData {
            book,
            imprint: form.imprint,
            status,
            due_back,
        })
    }
}

/// Rejected book instance submission with the book list needed to redisplay the form
#[derive(Debug, Serialize, ToSchema)]
pub struct BookInstanceFormRejection {
    pub title: String,
    pub book_list: Vec<BookTitle>,
    pub selected_book: String,
    pub errors: Vec<FieldError>,
    pub bookinstance: BookInstanceForm,
}

/// Everything needed to edit a book instance
#[derive(Debug, Serialize, ToSchema)]
pub struct BookInstanceEditContext {
    pub book_list: Vec<BookTitle>,
    pub selected_book: Uuid,
    pub bookinstance: PopulatedBookInstance,
}
