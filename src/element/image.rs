use std::hash::{DefaultHasher, Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Image element source: a remote URL or an embedded `data:` URI
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSource {
    #[serde(default)]
    pub image_url: String,
}

impl ImageSource {
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.image_url.trim().is_empty()
    }

    pub fn is_embedded(&self) -> bool {
        self.image_url.starts_with("data:")
    }

    /// Hash of the source used as the texture cache version
    pub fn source_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.image_url.hash(&mut hasher);
        hasher.finish()
    }
}

/// Sparse update for an image element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ImagePatch {
    pub(crate) fn apply(&self, source: &mut ImageSource) {
        if let Some(url) = &self.image_url {
            source.image_url.clone_from(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_hash_tracks_url() {
        let a = ImageSource::new("data:image/png;base64,AAAA");
        let b = ImageSource::new("data:image/png;base64,AAAB");
        assert_eq!(a.source_hash(), a.clone().source_hash());
        assert_ne!(a.source_hash(), b.source_hash());
        assert!(a.is_embedded());
        assert!(ImageSource::default().is_empty());
    }
}
