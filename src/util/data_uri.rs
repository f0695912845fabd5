//! `data:` URIs used to embed uploaded images directly in the template JSON.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::ImageLoadError;

/// Guess an image MIME type from a file extension
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

pub fn is_image_path(path: &Path) -> bool {
    mime_for_path(path).starts_with("image/")
}

/// Encode raw bytes as a base64 `data:` URI
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Decode the payload of a base64 `data:` URI
pub fn decode(uri: &str) -> Result<Vec<u8>, ImageLoadError> {
    let rest = uri.strip_prefix("data:").ok_or(ImageLoadError::NotDataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(ImageLoadError::NotDataUri)?;
    if !header.ends_with(";base64") {
        return Err(ImageLoadError::NotDataUri);
    }
    Ok(STANDARD.decode(payload.trim())?)
}

/// Read a file from disk into a `data:` URI
pub fn read_file(path: &Path) -> Result<String, ImageLoadError> {
    let bytes = std::fs::read(path).map_err(|source| ImageLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(encode(mime_for_path(path), &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_and_decodes_payload() {
        let uri = encode("image/png", b"\x89PNG");
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(decode(&uri).unwrap(), b"\x89PNG");
    }

    #[test]
    fn rejects_non_data_uris() {
        assert!(matches!(decode("https://example.com/a.png"), Err(ImageLoadError::NotDataUri)));
        assert!(matches!(decode("data:text/plain,hello"), Err(ImageLoadError::NotDataUri)));
        assert!(matches!(decode("data:image/png;base64,@@@"), Err(ImageLoadError::Base64(_))));
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_for_path(Path::new("logo.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("photo.jpeg")), "image/jpeg");
        assert!(!is_image_path(Path::new("notes.txt")));
    }
}
