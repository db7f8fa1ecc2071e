//! Wire models for `/authors`, `/editorials` and `/genres`.

use serde::{Deserialize, Serialize};

use crate::domain::types::EntryId;

/// Record shape shared by the three flat catalogs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub id: EntryId,
    pub name: String,
    pub created_at: Option<String>,
}

/// Body sent when creating or renaming a catalog entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NamePayload {
    pub name: String,
}
