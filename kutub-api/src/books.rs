use serde::{Serialize, Deserialize};

use kutub_lib::ids::{Id, AuthorId};
use kutub_lib::validation;
use kutub_lib::serde::id_as_number;

use crate::ApiError;
use crate::traits::{Validator, Invalid};
use crate::resource::{resource, CreateResource, UpdateResource, DeleteResource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub auther_id: Option<AuthorId>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub book_code: Option<String>,
}

impl Book {
    /// case insensitive match against the name or book code
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();

        if term.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&term)
            || self.book_code.as_deref()
                .map(|code| code.to_lowercase().contains(&term))
                .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookBody {
    pub name: String,
    #[serde(serialize_with = "id_as_number")]
    pub auther_id: AuthorId,
    pub year: i64,
    pub page: i64,
    pub book_code: String,
}

impl Validator for BookBody {
    fn validate(&self) -> Result<(), ApiError> {
        Invalid::new()
            .check("name", validation::name_valid(&self.name))
            .check("auther_id", validation::required(&self.auther_id))
            .check("year", self.year > 0)
            .check("page", self.page > 0)
            .check("book_code", validation::name_valid(&self.book_code))
            .finish()
    }
}

resource!(Books, Book, "book", "/api/books");

impl CreateResource for Books {
    type Create = BookBody;
}

impl UpdateResource for Books {
    type Update = BookBody;
}

impl DeleteResource for Books {}

#[cfg(test)]
mod test {
    use super::*;

    fn body() -> BookBody {
        BookBody {
            name: "O'tkan kunlar".into(),
            auther_id: Id::from("3"),
            year: 1926,
            page: 400,
            book_code: "BK-001".into(),
        }
    }

    #[test]
    fn author_is_sent_as_number() {
        let json = serde_json::to_value(body()).unwrap();

        assert_eq!(json["auther_id"], serde_json::json!(3));
    }

    #[test]
    fn missing_fields_are_listed() {
        let mut given = body();
        given.name = String::new();
        given.page = 0;

        let err = given.validate().unwrap_err();

        assert_eq!(
            err.detail().map(|d| d.keys().to_vec()),
            Some(vec!["name".to_owned(), "page".to_owned()])
        );
    }

    #[test]
    fn search_checks_name_and_code() {
        let book: Book = serde_json::from_str(
            r#"{"id":5,"name":"Kecha va kunduz","auther_id":2,"book_code":"KV-12"}"#
        ).unwrap();

        assert_eq!(book.year, None);
        assert!(book.matches_search("KECHA"));
        assert!(book.matches_search(" kv-1 "));
        assert!(book.matches_search(""));
        assert!(!book.matches_search("sarob"));
    }
}
