use serde::{Deserialize, Serialize};

pub type BookId = i64;

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
/// Catalog record as returned by GET /api/books and GET /api/search
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    /// Sent on create, never rendered
    pub publisher: Option<String>,
    /// Sent on create, never rendered
    pub year: Option<i64>,
    /// Nullable on the backend, a blank count is stored as null
    pub copies: Option<i64>,
    pub available_copies: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
/// Payload of POST /api/books, a book without the backend assigned fields
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publisher: String,
    pub year: Option<i64>,
    pub copies: i64,
    pub available_copies: i64,
}

impl NewBook {
    /// Builds the record the backend would store for this payload
    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: Some(self.author),
            isbn: Some(self.isbn),
            publisher: Some(self.publisher),
            year: self.year,
            copies: Some(self.copies),
            available_copies: Some(self.available_copies),
            created_at: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Error body the backend attaches to rejected requests
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod api_tests {
    use crate::api::{Book, NewBook};

    #[test]
    fn test_book_decodes_with_missing_optional_fields() {
        let book: Book = serde_json::from_str(
            r#"{"id":1,"title":"Dune","author":"Herbert","copies":2,"available_copies":1}"#,
        )
        .expect("Failed to decode book");

        assert_eq!(book.id, 1);
        assert_eq!(book.author.as_deref(), Some("Herbert"));
        assert_eq!(book.isbn, None);
        assert_eq!(book.year, None);
        assert_eq!(book.created_at, None);
    }

    #[test]
    fn test_book_decodes_backend_record() {
        let book: Book = serde_json::from_str(
            r#"{
                "id": 7,
                "title": "Solaris",
                "author": null,
                "isbn": "978-0156027601",
                "publisher": "Harvest",
                "year": 1961,
                "copies": 3,
                "available_copies": 3,
                "created_at": "2024-03-01T10:00:00"
            }"#,
        )
        .expect("Failed to decode book");

        assert_eq!(book.author, None);
        assert_eq!(book.year, Some(1961));
        assert_eq!(book.created_at.as_deref(), Some("2024-03-01T10:00:00"));
    }

    #[test]
    fn test_book_list_decodes_null_counts() {
        let books: Vec<Book> = serde_json::from_str(
            r#"[
                {"id":1,"title":"Dune","copies":2,"available_copies":1},
                {"id":2,"title":"Blank copies","copies":null,"available_copies":null}
            ]"#,
        )
        .expect("Failed to decode book list");

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].copies, Some(2));
        assert_eq!(books[1].copies, None);
        assert_eq!(books[1].available_copies, None);
    }

    #[test]
    fn test_new_book_sends_null_year() {
        let payload = NewBook {
            title: "Dune".to_string(),
            author: "".to_string(),
            isbn: "".to_string(),
            publisher: "".to_string(),
            year: None,
            copies: 1,
            available_copies: 1,
        };

        let json = serde_json::to_value(&payload).expect("Failed to encode");
        assert!(json["year"].is_null());
        assert_eq!(json["copies"], 1);
        assert!(json.get("id").is_none());
    }
}
