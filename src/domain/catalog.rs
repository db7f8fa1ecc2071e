use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::{EntryId, TypeConstraintError};

/// The three flat catalogs managed next to books.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Authors,
    Editorials,
    Genres,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [Self::Authors, Self::Editorials, Self::Genres];

    /// Path segment used both by the console routes and the backend resource.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authors => "authors",
            Self::Editorials => "editorials",
            Self::Genres => "genres",
        }
    }

    /// Plural heading shown on the list screen.
    pub fn title(self) -> &'static str {
        match self {
            Self::Authors => "Autores",
            Self::Editorials => "Editoriales",
            Self::Genres => "Géneros",
        }
    }

    /// Singular label used in form headings.
    pub fn singular(self) -> &'static str {
        match self {
            Self::Authors => "Autor",
            Self::Editorials => "Editorial",
            Self::Genres => "Género",
        }
    }
}

impl Display for CatalogKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogKind {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(s.to_string()))
    }
}

/// An author, editorial or genre as shown in lists and select boxes.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: EntryId,
    pub name: String,
}

/// Value/label pair feeding a filter or form select box.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl From<&CatalogEntry> for SelectOption {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            value: entry.id.to_string(),
            label: entry.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_round_trip_through_path_segments() {
        for kind in CatalogKind::ALL {
            assert_eq!(kind.as_str().parse::<CatalogKind>(), Ok(kind));
        }
        assert!("books".parse::<CatalogKind>().is_err());
    }
}
