use std::fs;
use std::path::{Path, PathBuf};

use super::{from_json, to_json, TemplateStore, TemplateSummary};
use crate::error::{StorageError, StorageResult};
use crate::template::Template;
use crate::util::time;

/// Keeps one pretty-printed JSON file per template in a directory
#[derive(Debug, Clone)]
pub struct FileTemplateStore {
    /// Directory where template files are stored
    dir: PathBuf,
}

impl Default for FileTemplateStore {
    fn default() -> Self {
        Self::new("templates")
    }
}

impl FileTemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> StorageResult<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidId(id.to_owned()));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    /// Save with a fresh `updated_at`, returning the stored copy
    pub fn save_touched(&self, template: &Template) -> StorageResult<Template> {
        let mut stored = template.clone();
        stored.updated_at = time::timestamp_secs();
        self.save_template(&stored)?;
        Ok(stored)
    }
}

impl TemplateStore for FileTemplateStore {
    fn save_template(&self, template: &Template) -> StorageResult<()> {
        let path = self.path_for(&template.id)?;

        // Create the store directory if it doesn't exist
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        let json = to_json(template)?;
        fs::write(&path, json).map_err(|e| StorageError::io(&path, e))?;
        log::info!("💾 Saved template {} to {}", template.id, path.display());
        Ok(())
    }

    fn load_template(&self, id: &str) -> StorageResult<Template> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_owned()));
        }
        let json = fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))?;
        from_json(&json)
    }

    fn list_templates(&self) -> StorageResult<Vec<TemplateSummary>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        let mut summaries: Vec<TemplateSummary> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| {
                let json = fs::read_to_string(&path).ok()?;
                match from_json(&json) {
                    Ok(template) => Some(TemplateSummary::from(&template)),
                    Err(err) => {
                        log::warn!("Skipping unreadable template file {}: {}", path.display(), err);
                        None
                    }
                }
            })
            .collect();

        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.name.cmp(&b.name)));
        Ok(summaries)
    }
}
