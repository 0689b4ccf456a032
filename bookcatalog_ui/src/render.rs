//! Pure rendering of a book list into the table body.
//!
//! Rendering never touches the network and never binds anything per row: every
//! delete control only carries its book id, events are routed by
//! [`crate::controller::ViewController::dispatch`].

use std::fmt::Write;

use crate::api::{Book, BookId};

/// Column headers, in cell order
pub const COLUMNS: [&str; 7] = [
    "ID",
    "Title",
    "Author",
    "ISBN",
    "Copies",
    "Available",
    "Actions",
];

#[derive(Debug, Clone, Eq, PartialEq)]
/// One rendered row, the text of the six data cells plus the id its delete control is tagged with
pub struct BookRow {
    pub cells: [String; 6],
    pub delete_target: BookId,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// Rendered table body, one row per book in the order received
pub struct BookTable {
    rows: Vec<BookRow>,
}

/// Builds the table body for `books`
pub fn render(books: &[Book]) -> BookTable {
    BookTable {
        rows: books.iter().map(render_row).collect(),
    }
}

fn render_row(book: &Book) -> BookRow {
    BookRow {
        cells: [
            book.id.to_string(),
            book.title.clone(),
            book.author.clone().unwrap_or_default(),
            book.isbn.clone().unwrap_or_default(),
            count_text(book.copies),
            count_text(book.available_copies),
        ],
        delete_target: book.id,
    }
}

fn count_text(count: Option<i64>) -> String {
    count.map(|count| count.to_string()).unwrap_or_default()
}

impl BookTable {
    pub fn rows(&self) -> &[BookRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True if a delete control for `book_id` is part of this render
    pub fn has_delete_target(&self, book_id: BookId) -> bool {
        self.rows.iter().any(|row| row.delete_target == book_id)
    }

    /// Serializes the body as a `<tbody>` element
    pub fn to_html(&self) -> String {
        let mut html = String::from("<tbody>\n");
        for row in &self.rows {
            let _ = write!(html, "<tr data-id=\"{}\">", row.delete_target);
            for cell in &row.cells {
                let _ = write!(html, "<td>{}</td>", escape_html(cell));
            }
            let _ = write!(
                html,
                "<td><a class=\"deleteBtn\" data-id=\"{id}\" href=\"/books/{id}/delete\">Delete</a></td></tr>\n",
                id = row.delete_target
            );
        }
        html.push_str("</tbody>");
        html
    }
}

/// Escapes text for use in element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}
