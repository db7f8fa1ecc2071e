use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::adapters::DATE_FORMAT;
use crate::api::ImageUpload;
use crate::domain::book::{Book, NewBook};
use crate::domain::types::{AuthorId, BookTitle, EditorialId, GenreId};
use crate::forms::{FormError, invalid};

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/gif"];
const MIN_PRICE: f64 = 0.01;

/// Raw multipart body posted by the book create/edit page.
#[derive(MultipartForm)]
pub struct BookUploadForm {
    pub title: Text<String>,
    pub price: Text<String>,
    pub stock: Text<String>,
    pub published_at: Text<String>,
    /// Checkbox; absent when unchecked.
    pub availability: Option<Text<String>>,
    pub author_id: Text<String>,
    pub editorial_id: Text<String>,
    pub genre_id: Text<String>,
    pub current_image_url: Option<Text<String>>,
    /// Above `MAX_IMAGE_BYTES` so oversized files reach `check_image` and
    /// come back as a field error instead of a rejected request.
    #[multipart(limit = "6MiB")]
    pub image: Option<TempFile>,
}

impl BookUploadForm {
    /// Splits the body into its text fields and the optional image.
    ///
    /// An unreadable or rejected image does not discard the text fields, so
    /// the form can be re-rendered with everything the user typed.
    pub fn into_parts(self) -> (BookForm, Result<Option<ImageUpload>, FormError>) {
        let form = BookForm {
            title: self.title.into_inner(),
            price: self.price.into_inner(),
            stock: self.stock.into_inner(),
            published_at: self.published_at.into_inner(),
            availability: self
                .availability
                .map(|value| matches!(value.as_str(), "on" | "true" | "1"))
                .unwrap_or(false),
            author_id: self.author_id.into_inner(),
            editorial_id: self.editorial_id.into_inner(),
            genre_id: self.genre_id.into_inner(),
            current_image_url: self
                .current_image_url
                .map(Text::into_inner)
                .filter(|url| !url.trim().is_empty()),
        };

        let image = match self.image {
            Some(file) => read_image(file),
            None => Ok(None),
        };

        (form, image)
    }
}

fn read_image(file: TempFile) -> Result<Option<ImageUpload>, FormError> {
    // Browsers post an empty part when no file was picked.
    if file.size == 0 {
        return Ok(None);
    }

    let content_type = file
        .content_type
        .as_ref()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_default();
    check_image(&content_type, file.size)?;

    let bytes = std::fs::read(file.file.path()).map_err(|e| {
        log::error!("Failed to read uploaded image: {e}");
        FormError::field("image", "No se pudo leer la imagen")
    })?;

    Ok(Some(ImageUpload {
        file_name: file.file_name.unwrap_or_else(|| "cover".to_string()),
        content_type,
        bytes,
    }))
}

/// Rejects files that are not jpeg/png/gif or exceed 5 MB.
pub fn check_image(content_type: &str, size: usize) -> Result<(), FormError> {
    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err(FormError::field(
            "image",
            "Formato de imagen no permitido (JPG, PNG o GIF)",
        ));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(FormError::field("image", "La imagen no puede superar 5MB"));
    }
    Ok(())
}

/// Text fields of the book form, kept as typed so they can be re-rendered.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
pub struct BookForm {
    #[validate(length(min = 3, message = "El título debe tener al menos 3 caracteres"))]
    pub title: String,
    #[validate(custom(function = "validate_price"))]
    pub price: String,
    #[validate(custom(function = "validate_stock"))]
    pub stock: String,
    #[validate(custom(function = "validate_published_at"))]
    pub published_at: String,
    pub availability: bool,
    #[validate(custom(function = "validate_author_id"))]
    pub author_id: String,
    #[validate(custom(function = "validate_editorial_id"))]
    pub editorial_id: String,
    #[validate(custom(function = "validate_genre_id"))]
    pub genre_id: String,
    pub current_image_url: Option<String>,
}

fn parse_price(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
}

fn validate_price(value: &str) -> Result<(), ValidationError> {
    match parse_price(value) {
        Some(price) if price >= MIN_PRICE => Ok(()),
        _ => Err(invalid("price", "El precio debe ser mayor a 0")),
    }
}

fn validate_stock(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<i64>() {
        Ok(stock) if stock >= 0 => Ok(()),
        _ => Err(invalid("stock", "El stock no puede ser negativo")),
    }
}

fn validate_published_at(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| invalid("published_at", "La fecha de publicación es obligatoria"))
}

fn validate_author_id(value: &str) -> Result<(), ValidationError> {
    AuthorId::parse(value)
        .map(|_| ())
        .map_err(|_| invalid("author_id", "Debe seleccionar un autor"))
}

fn validate_editorial_id(value: &str) -> Result<(), ValidationError> {
    EditorialId::parse(value)
        .map(|_| ())
        .map_err(|_| invalid("editorial_id", "Debe seleccionar una editorial"))
}

fn validate_genre_id(value: &str) -> Result<(), ValidationError> {
    GenreId::parse(value)
        .map(|_| ())
        .map_err(|_| invalid("genre_id", "Debe seleccionar un género"))
}

impl BookForm {
    /// Prefills the edit page from an existing book.
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            price: format!("{:.2}", book.price),
            stock: book.stock.to_string(),
            published_at: book
                .published_at
                .map(|date| date.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            availability: book.availability,
            author_id: book.author.id.map(|id| id.to_string()).unwrap_or_default(),
            editorial_id: book
                .editorial
                .id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            genre_id: book.genre.id.map(|id| id.to_string()).unwrap_or_default(),
            current_image_url: book.image_url.clone(),
        }
    }

    /// Validates the form and converts it into a domain value.
    ///
    /// `image_url` is the freshly uploaded URL, if any; otherwise the current
    /// one is kept.
    pub fn into_new_book(self, image_url: Option<String>) -> Result<NewBook, FormError> {
        self.validate()?;

        let title = BookTitle::new(self.title)
            .map_err(|_| FormError::field("title", "El título es obligatorio"))?;
        let price = parse_price(&self.price)
            .ok_or_else(|| FormError::field("price", "El precio debe ser mayor a 0"))?;
        let stock = self
            .stock
            .trim()
            .parse::<i64>()
            .map_err(|_| FormError::field("stock", "El stock no puede ser negativo"))?;
        let published_at = NaiveDate::parse_from_str(self.published_at.trim(), DATE_FORMAT)
            .map_err(|_| {
                FormError::field("published_at", "La fecha de publicación es obligatoria")
            })?;
        let author_id = AuthorId::parse(&self.author_id)
            .map_err(|_| FormError::field("author_id", "Debe seleccionar un autor"))?;
        let editorial_id = EditorialId::parse(&self.editorial_id)
            .map_err(|_| FormError::field("editorial_id", "Debe seleccionar una editorial"))?;
        let genre_id = GenreId::parse(&self.genre_id)
            .map_err(|_| FormError::field("genre_id", "Debe seleccionar un género"))?;

        Ok(NewBook {
            title,
            price,
            stock,
            published_at,
            availability: self.availability,
            image_url: image_url.or(self.current_image_url),
            author_id,
            editorial_id,
            genre_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHOR: &str = "0b6f7c1e-55a4-4d52-8f0e-3f1c2a9b7d10";
    const EDITORIAL: &str = "6a1e3b2c-9d4f-4a51-8e7b-2c3d4e5f6a7b";
    const GENRE: &str = "9f8e7d6c-5b4a-4392-8170-6f5e4d3c2b1a";

    fn valid_form() -> BookForm {
        BookForm {
            title: "Rayuela".to_string(),
            price: "18,50".to_string(),
            stock: "4".to_string(),
            published_at: "1963-06-28".to_string(),
            availability: true,
            author_id: AUTHOR.to_string(),
            editorial_id: EDITORIAL.to_string(),
            genre_id: GENRE.to_string(),
            current_image_url: Some("https://cdn.example.com/old.png".to_string()),
        }
    }

    #[test]
    fn valid_form_converts_and_keeps_current_image() {
        let book = valid_form().into_new_book(None).unwrap();
        assert_eq!(book.title.as_str(), "Rayuela");
        assert!((book.price - 18.5).abs() < f64::EPSILON);
        assert_eq!(book.image_url.as_deref(), Some("https://cdn.example.com/old.png"));

        let book = valid_form()
            .into_new_book(Some("https://cdn.example.com/new.png".to_string()))
            .unwrap();
        assert_eq!(book.image_url.as_deref(), Some("https://cdn.example.com/new.png"));
    }

    #[test]
    fn invalid_fields_are_reported_individually() {
        let form = BookForm {
            title: "Ra".to_string(),
            price: "0".to_string(),
            stock: "-1".to_string(),
            published_at: "28/06/1963".to_string(),
            author_id: String::new(),
            ..valid_form()
        };

        let errors = form.into_new_book(None).unwrap_err().field_errors();
        assert_eq!(
            errors.first("title"),
            Some("El título debe tener al menos 3 caracteres")
        );
        assert_eq!(errors.first("price"), Some("El precio debe ser mayor a 0"));
        assert_eq!(errors.first("stock"), Some("El stock no puede ser negativo"));
        assert!(errors.first("published_at").is_some());
        assert_eq!(errors.first("author_id"), Some("Debe seleccionar un autor"));
        assert!(errors.first("genre_id").is_none());
    }

    #[test]
    fn image_restrictions() {
        assert!(check_image("image/png", 1024).is_ok());
        assert!(check_image("image/webp", 1024).is_err());
        assert!(check_image("image/jpeg", MAX_IMAGE_BYTES).is_ok());
        assert!(check_image("image/jpeg", MAX_IMAGE_BYTES + 1).is_err());
    }

    fn temp_upload(bytes: &[u8], content_type: &str) -> TempFile {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        TempFile {
            file,
            content_type: content_type.parse().ok(),
            file_name: Some("portada.png".to_string()),
            size: bytes.len(),
        }
    }

    #[test]
    fn uploaded_image_is_read_from_disk() {
        let upload = read_image(temp_upload(b"\x89PNG", "image/png"))
            .unwrap()
            .unwrap();
        assert_eq!(upload.file_name, "portada.png");
        assert_eq!(upload.content_type, "image/png");
        assert_eq!(upload.bytes, b"\x89PNG");
    }

    #[test]
    fn empty_part_means_no_image() {
        assert!(read_image(temp_upload(b"", "application/octet-stream"))
            .unwrap()
            .is_none());
        assert!(read_image(temp_upload(b"text", "text/plain")).is_err());
    }

    #[test]
    fn oversized_upload_within_the_body_limit_is_a_field_error() {
        let bytes = vec![0u8; MAX_IMAGE_BYTES + 1];
        let errors = read_image(temp_upload(&bytes, "image/png"))
            .unwrap_err()
            .field_errors();
        assert_eq!(errors.first("image"), Some("La imagen no puede superar 5MB"));
    }
}
