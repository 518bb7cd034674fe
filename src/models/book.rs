//! Book model, populated views and submission form

use serde::{Deserialize, Serialize};
use serde_with::{formats::PreferMany, serde_as, OneOrMany};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{
    catalog_url,
    validation::{self, FieldError},
    Author, BookInstance, Genre,
};

/// Book document with its references stored as identifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    /// Identifier of the author
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    /// Identifiers of the genres
    pub genre: Vec<Uuid>,
    pub url: String,
}

/// Persisted book fields
#[derive(Debug, Clone, PartialEq)]
pub struct BookData {
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

impl Book {
    pub fn new(id: Uuid, data: BookData) -> Self {
        Self {
            id,
            title: data.title,
            author: data.author,
            summary: data.summary,
            isbn: data.isbn,
            genre: data.genre,
            url: catalog_url("book", id),
        }
    }

    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id,
            title: self.title.clone(),
            summary: self.summary.clone(),
            url: self.url.clone(),
        }
    }

    pub fn title_only(&self) -> BookTitle {
        BookTitle {
            id: self.id,
            title: self.title.clone(),
            url: self.url.clone(),
        }
    }

    /// Replaces the author and genre identifiers with the referenced documents.
    ///
    /// A dangling author becomes `None`; dangling genres are dropped.
    pub fn populate(self, author: Option<Author>, genres: &[Genre]) -> PopulatedBook {
        let genre = self
            .genre
            .iter()
            .filter_map(|id| genres.iter().find(|g| g.id == *id).cloned())
            .collect();
        PopulatedBook {
            id: self.id,
            title: self.title,
            author,
            summary: self.summary,
            isbn: self.isbn,
            genre,
            url: self.url,
        }
    }
}

/// Book with author and genres populated
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PopulatedBook {
    pub id: Uuid,
    pub title: String,
    pub author: Option<Author>,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Genre>,
    pub url: String,
}

/// Book list entry with only the author populated
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookWithAuthor {
    pub id: Uuid,
    pub title: String,
    pub author: Option<Author>,
    pub url: String,
}

/// Title and summary projection
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub url: String,
}

/// Title projection, used to fill selection lists
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookTitle {
    pub id: Uuid,
    pub title: String,
    pub url: String,
}

/// Book create/update request body
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    /// Author identifier
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Author must not be empty."),
        custom(function = "validation::validate_reference", message = "Invalid author reference")
    )]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    /// Genre identifiers; a single value is accepted as a one-element list
    #[serde_as(as = "OneOrMany<_, PreferMany>")]
    #[serde(default)]
    #[validate(custom(function = "validation::validate_references", message = "Invalid genre reference"))]
    pub genre: Vec<String>,
}

impl BookForm {
    pub fn sanitize(self) -> Self {
        Self {
            title: validation::clean(&self.title),
            author: validation::clean(&self.author),
            summary: validation::clean(&self.summary),
            isbn: validation::clean(&self.isbn),
            genre: self
                .genre
                .iter()
                .map(|g| validation::clean(g))
                .filter(|g| !g.is_empty())
                .collect(),
        }
    }

    pub fn check(self) -> Result<BookData, (Self, Vec<FieldError>)> {
        let form = self.sanitize();
        if let Err(errors) = form.validate() {
            let fields = [
                ("title", form.title.clone()),
                ("author", form.author.clone()),
                ("summary", form.summary.clone()),
                ("isbn", form.isbn.clone()),
                ("genre", form.genre.join(",")),
            ];
            let errors = validation::collect_errors(&errors, &fields);
            return Err((form, errors));
        }

        match form.parse_references() {
            Ok((author, genre)) => Ok(BookData {
                title: form.title,
                author,
                summary: form.summary,
                isbn: form.isbn,
                genre,
            }),
            Err(errors) => Err((form, errors)),
        }
    }

    /// Parses the author and genre identifiers, reporting each field that fails
    fn parse_references(&self) -> Result<(Uuid, Vec<Uuid>), Vec<FieldError>> {
        let author = Uuid::parse_str(&self.author);
        let genre = self
            .genre
            .iter()
            .map(|g| Uuid::parse_str(g))
            .collect::<Result<Vec<_>, _>>();

        let mut errors = Vec::new();
        if author.is_err() {
            errors.push(FieldError {
                location: "body".to_string(),
                param: "author".to_string(),
                value: self.author.clone(),
                msg: "Invalid author reference".to_string(),
            });
        }
        if genre.is_err() {
            errors.push(FieldError {
                location: "body".to_string(),
                param: "genre".to_string(),
                value: self.genre.join(","),
                msg: "Invalid genre reference".to_string(),
            });
        }

        match (author, genre) {
            (Ok(author), Ok(genre)) => Ok((author, genre)),
            _ => Err(errors),
        }
    }
}

/// Genre offered on a book form, flagged when the submitted book selected it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreChoice {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub checked: bool,
}

impl GenreChoice {
    pub fn from_genres(genres: Vec<Genre>, selected: &[String]) -> Vec<Self> {
        genres
            .into_iter()
            .map(|g| {
                let checked = selected.iter().any(|s| *s == g.id.to_string());
                GenreChoice {
                    id: g.id,
                    name: g.name,
                    url: g.url,
                    checked,
                }
            })
            .collect()
    }
}

/// Rejected book submission echoed back with the data needed to redisplay the form
#[derive(Debug, Serialize, ToSchema)]
pub struct BookFormRejection {
    pub title: String,
    pub authors: Vec<Author>,
    pub genres: Vec<GenreChoice>,
    pub book: BookForm,
    pub errors: Vec<FieldError>,
}

/// Book detail with the copies held by the library
#[derive(Debug, Serialize, ToSchema)]
pub struct BookDetail {
    pub book: PopulatedBook,
    pub book_instances: Vec<BookInstance>,
}

/// Everything needed to edit a book
#[derive(Debug, Serialize, ToSchema)]
pub struct BookEditContext {
    pub book: PopulatedBook,
    pub authors: Vec<Author>,
    pub genres: Vec<GenreChoice>,
}
