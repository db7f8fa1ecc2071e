use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::EntryName;
use crate::forms::FormError;

/// Name form shared by authors, editorials and genres.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
pub struct EntryForm {
    #[validate(length(
        min = 2,
        max = 100,
        message = "El nombre debe tener entre 2 y 100 caracteres"
    ))]
    pub name: String,
}

impl EntryForm {
    pub fn into_name(self) -> Result<EntryName, FormError> {
        let form = Self {
            name: self.name.trim().to_string(),
        };
        form.validate()?;
        EntryName::new(form.name).map_err(|_| FormError::field("name", "El nombre es requerido"))
    }
}
