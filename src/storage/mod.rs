//! Template persistence: the store contract plus JSON import and export.

mod file_store;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use file_store::FileTemplateStore;

use crate::error::{StorageError, StorageResult};
use crate::template::Template;

/// Listing entry for a stored template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub category: String,
    pub updated_at: u64,
}

impl From<&Template> for TemplateSummary {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            category: template.category.clone(),
            updated_at: template.updated_at,
        }
    }
}

/// The narrow contract between the editor and wherever templates are kept
pub trait TemplateStore {
    fn save_template(&self, template: &Template) -> StorageResult<()>;

    fn load_template(&self, id: &str) -> StorageResult<Template>;

    /// Summaries sorted by most recently updated first
    fn list_templates(&self) -> StorageResult<Vec<TemplateSummary>>;
}

/// Serialize a template as pretty-printed JSON
pub fn to_json(template: &Template) -> StorageResult<String> {
    Ok(serde_json::to_string_pretty(template)?)
}

/// Parse a template from JSON, dropping duplicate element ids
pub fn from_json(json: &str) -> StorageResult<Template> {
    let template: Template = serde_json::from_str(json)?;
    Ok(template.normalized())
}

/// Write a template to an arbitrary JSON file
pub fn export_json(template: &Template, path: &Path) -> StorageResult<()> {
    let json = to_json(template)?;
    fs::write(path, json).map_err(|e| StorageError::io(path, e))?;
    log::info!("💾 Exported template {} to {}", template.id, path.display());
    Ok(())
}

/// Read a template from an arbitrary JSON file
pub fn import_json(path: &Path) -> StorageResult<Template> {
    let json = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
    let template = from_json(&json)?;
    log::info!("📂 Imported template {} from {}", template.id, path.display());
    Ok(template)
}
