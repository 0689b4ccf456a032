use std::fmt::Write;

use crate::api::BookId;
use crate::controller::{ViewState, DELETE_CONFIRMATION};
use crate::form::BookForm;
use crate::render::{escape_html, COLUMNS};

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse}td,th{border:1px solid #ccc;padding:4px 8px}\
.notice{background:#fdecea;border:1px solid #f5c2c0;padding:8px;margin-bottom:1em}";

fn layout(title: &str, content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        STYLE,
        content
    )
}

fn text_input(html: &mut String, name: &str, label: &str, value: &str, extra: &str) {
    let _ = write!(
        html,
        "<label>{label} <input name=\"{name}\" value=\"{value}\"{extra}></label>\n",
        label = label,
        name = name,
        value = escape_html(value),
        extra = extra
    );
}

fn add_book_form(form: &BookForm) -> String {
    let mut html = String::from("<form id=\"addBookForm\" method=\"post\" action=\"/books\">\n");
    text_input(&mut html, "title", "Title", &form.title, " required");
    text_input(&mut html, "author", "Author", &form.author, "");
    text_input(&mut html, "isbn", "ISBN", &form.isbn, "");
    text_input(&mut html, "publisher", "Publisher", &form.publisher, "");
    text_input(&mut html, "year", "Year", &form.year, " type=\"number\"");
    text_input(&mut html, "copies", "Copies", &form.copies, " type=\"number\" min=\"1\"");
    html.push_str("<button type=\"submit\">Add book</button>\n</form>\n");
    html
}

/// The catalog page: notice, add form, search box and the book table
pub fn index_page(state: &ViewState) -> String {
    let mut content = String::from("<h1>Book catalog</h1>\n");

    if let Some(notice) = &state.notice {
        let _ = writeln!(
            content,
            "<div class=\"notice\" role=\"status\">{}</div>",
            escape_html(&notice.message)
        );
    }

    content.push_str(&add_book_form(&state.form));

    let _ = write!(
        content,
        "<form method=\"post\" action=\"/search\">\n\
         <input id=\"searchInput\" name=\"q\" value=\"{}\">\n\
         <button id=\"searchBtn\" type=\"submit\">Search</button>\n\
         <button id=\"clearBtn\" type=\"submit\" formaction=\"/search/clear\">Clear</button>\n\
         </form>\n",
        escape_html(&state.search_input)
    );

    content.push_str("<table id=\"booksTable\">\n<thead><tr>");
    for column in COLUMNS {
        let _ = write!(content, "<th>{}</th>", column);
    }
    content.push_str("</tr></thead>\n");
    content.push_str(&state.table.to_html());
    content.push_str("\n</table>\n");

    layout("Book catalog", &content)
}

/// Yes/no question shown before a delete is sent
pub fn confirm_delete_page(book_id: BookId) -> String {
    let content = format!(
        "<p>{question}</p>\n\
         <form method=\"post\" action=\"/books/{id}/delete\">\n\
         <button name=\"confirm\" value=\"yes\" type=\"submit\">Yes</button>\n\
         <button name=\"confirm\" value=\"no\" type=\"submit\">No</button>\n\
         </form>\n",
        question = DELETE_CONFIRMATION,
        id = book_id
    );
    layout(DELETE_CONFIRMATION, &content)
}
