use chrono::NaiveDate;

use inventory_console::adapters::{
    AUTHOR_PLACEHOLDER, EDITORIAL_PLACEHOLDER, GENRE_PLACEHOLDER, adapt_books_response,
    adapt_catalog_response, book_to_payload,
};
use inventory_console::domain::book::NewBook;
use inventory_console::domain::types::{AuthorId, BookTitle, EditorialId, GenreId};
use inventory_console::models::book::BooksResponse;
use inventory_console::models::catalog::CatalogRecord;
use inventory_console::models::envelope::ListEnvelope;

const BOOK: &str = "5f0c2b1e-1d3a-4c8e-9a7b-6e2f4d1c0a99";
const AUTHOR: &str = "0b6f7c1e-55a4-4d52-8f0e-3f1c2a9b7d10";
const EDITORIAL: &str = "3a9d7e21-0c4b-4f1a-8e6d-5b2c9f0e1a47";
const GENRE: &str = "7d3c1a52-8a4e-4f60-9b1d-2e6f0c8a5b31";

#[test]
fn books_response_is_flattened() {
    let body = format!(
        r#"{{
            "statusCode": 200,
            "data": {{
                "data": [{{
                    "id": "{BOOK}",
                    "title": "Rayuela",
                    "price": "21.90",
                    "stock": 4,
                    "availability": true,
                    "publishedAt": "1963-06-28T00:00:00.000Z",
                    "imageUrl": "https://cdn.example.com/rayuela.jpg",
                    "authorId": "{AUTHOR}",
                    "author": {{ "id": "{AUTHOR}", "name": "Julio Cortázar" }},
                    "editorial": {{ "id": "{EDITORIAL}", "name": "Sudamericana" }},
                    "genre": {{ "id": "{GENRE}", "name": "Novela" }}
                }}],
                "pagination": {{
                    "page": 2, "limit": 12, "total": 13, "totalPages": 2,
                    "hasNext": false, "hasPrev": true
                }}
            }}
        }}"#
    );
    let response: BooksResponse = serde_json::from_str(&body).unwrap();
    let listing = adapt_books_response(response);

    assert_eq!(listing.page.current_page, 2);
    assert_eq!(listing.page.total_pages, 2);
    assert!(listing.page.has_prev);

    let book = &listing.items[0];
    assert_eq!(book.id.to_string(), BOOK);
    assert_eq!(book.price, 21.9);
    assert_eq!(book.published_at, NaiveDate::from_ymd_opt(1963, 6, 28));
    assert_eq!(book.author.name, "Julio Cortázar");
    assert_eq!(book.editorial.name, "Sudamericana");
    assert_eq!(book.genre.name, "Novela");
}

#[test]
fn missing_relations_get_placeholders() {
    let body = format!(
        r#"{{
            "data": {{
                "data": [{{
                    "id": "{BOOK}",
                    "title": "Sin datos",
                    "price": 10,
                    "authorId": "{AUTHOR}",
                    "publishedAt": "pronto"
                }}],
                "pagination": {{
                    "page": 1, "limit": 12, "total": 1, "totalPages": 1,
                    "hasNext": false, "hasPrev": false
                }}
            }}
        }}"#
    );
    let response: BooksResponse = serde_json::from_str(&body).unwrap();
    let book = adapt_books_response(response).items.remove(0);

    assert_eq!(book.author.name, AUTHOR_PLACEHOLDER);
    assert_eq!(book.author.id.map(|id| id.to_string()).as_deref(), Some(AUTHOR));
    assert_eq!(book.editorial.name, EDITORIAL_PLACEHOLDER);
    assert_eq!(book.editorial.id, None);
    assert_eq!(book.genre.name, GENRE_PLACEHOLDER);
    assert_eq!(book.published_at, None);
    assert_eq!(book.stock, 0);
    assert!(!book.availability);
}

#[test]
fn plain_catalog_array_is_a_single_page() {
    let body = format!(
        r#"{{ "data": [
            {{ "id": "{AUTHOR}", "name": "Borges" }},
            {{ "id": "{GENRE}", "name": "Bioy Casares" }}
        ] }}"#
    );
    let response: ListEnvelope<CatalogRecord> = serde_json::from_str(&body).unwrap();
    let listing = adapt_catalog_response(response);

    assert_eq!(listing.items.len(), 2);
    assert_eq!(listing.items[0].name, "Borges");
    assert_eq!(listing.page.current_page, 1);
    assert_eq!(listing.page.total_pages, 1);
    assert_eq!(listing.page.total, 2);
    assert!(!listing.page.has_next);
}

#[test]
fn payload_uses_backend_formats() {
    let book = NewBook {
        title: BookTitle::new("Ficciones").unwrap(),
        price: 12.5,
        stock: 3,
        published_at: NaiveDate::from_ymd_opt(1944, 1, 1).unwrap(),
        availability: true,
        image_url: None,
        author_id: AuthorId::parse(AUTHOR).unwrap(),
        editorial_id: EditorialId::parse(EDITORIAL).unwrap(),
        genre_id: GenreId::parse(GENRE).unwrap(),
    };
    let payload = serde_json::to_value(book_to_payload(&book)).unwrap();

    assert_eq!(payload["title"], "Ficciones");
    assert_eq!(payload["price"], "12.50");
    assert_eq!(payload["publishedAt"], "1944-01-01");
    assert_eq!(payload["authorId"], AUTHOR);
    assert!(payload.get("imageUrl").is_none());
}

#[test]
fn malformed_relation_ids_do_not_fail_the_page() {
    let body = format!(
        r#"{{
            "data": {{
                "data": [
                    {{
                        "id": "{BOOK}",
                        "title": "Completo",
                        "price": "9.99",
                        "author": {{ "id": "{AUTHOR}", "name": "Borges" }}
                    }},
                    {{
                        "id": "{EDITORIAL}",
                        "title": "Huérfano",
                        "price": "5.00",
                        "authorId": "",
                        "author": null,
                        "editorialId": "",
                        "genre": {{ "id": "abc", "name": "Cuento" }}
                    }}
                ],
                "pagination": {{
                    "page": 1, "limit": 12, "total": 2, "totalPages": 1,
                    "hasNext": false, "hasPrev": false
                }}
            }}
        }}"#
    );
    let response: BooksResponse = serde_json::from_str(&body).unwrap();
    let listing = adapt_books_response(response);

    assert_eq!(listing.items.len(), 2);
    assert_eq!(listing.items[0].author.name, "Borges");

    let orphan = &listing.items[1];
    assert_eq!(orphan.author.name, AUTHOR_PLACEHOLDER);
    assert_eq!(orphan.author.id, None);
    assert_eq!(orphan.editorial.name, EDITORIAL_PLACEHOLDER);
    assert_eq!(orphan.genre.name, "Cuento");
    assert_eq!(orphan.genre.id, None);
}
