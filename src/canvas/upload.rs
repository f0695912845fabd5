//! Getting image files into image elements: the file picker and dropped files.
//!
//! Picking and reading happen on a worker thread; finished uploads are queued and
//! drained by the canvas on the UI thread, where they become ordinary `AddElement`
//! commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use egui::{Align2, Color32, Context, FontId, Id, LayerId, Order, Pos2};
use parking_lot::Mutex;

use crate::command::Command;
use crate::element::factory::create_image_element;
use crate::error::ImageLoadError;
use crate::id_generator::generate_id;
use crate::util::data_uri;

pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// A finished file read waiting to be placed on the template
#[derive(Debug)]
pub struct CompletedUpload {
    /// Template position of the top-left corner
    pub position: Pos2,
    pub source: String,
    pub result: Result<String, ImageLoadError>,
}

impl CompletedUpload {
    pub fn into_command(self) -> Result<Command, ImageLoadError> {
        let data_uri = self.result?;
        log::info!("🖼 Placing image from {}", self.source);
        Ok(Command::AddElement(create_image_element(
            generate_id("image"),
            self.position,
            Some(data_uri),
        )))
    }
}

/// Shared queue between picker threads and the UI thread
#[derive(Debug, Clone, Default)]
pub struct UploadQueue {
    completed: Arc<Mutex<Vec<CompletedUpload>>>,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, upload: CompletedUpload) {
        self.completed.lock().push(upload);
    }

    pub fn drain(&self) -> Vec<CompletedUpload> {
        std::mem::take(&mut *self.completed.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.completed.lock().is_empty()
    }

    /// Open the native file picker on a worker thread. A cancelled pick adds nothing.
    pub fn request_picker(&self, position: Pos2, ctx: &Context) {
        let queue = self.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let picked = futures::executor::block_on(async {
                let handle = rfd::AsyncFileDialog::new()
                    .add_filter("Images", &IMAGE_EXTENSIONS)
                    .set_title("Choose an image")
                    .pick_file()
                    .await?;
                let path = handle.path().to_path_buf();
                let bytes = handle.read().await;
                Some((path, bytes))
            });

            let Some((path, bytes)) = picked else {
                log::debug!("Image picker cancelled");
                return;
            };
            queue.push(CompletedUpload {
                position,
                source: path.display().to_string(),
                result: Ok(data_uri::encode(data_uri::mime_for_path(&path), &bytes)),
            });
            ctx.request_repaint();
        });
    }

    /// Queue image files dropped onto the window this frame, placed at `position`
    pub fn accept_dropped_files(&self, ctx: &Context, position: Pos2) -> usize {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let mut accepted = 0;
        for file in dropped {
            let source = match &file.path {
                Some(path) => path.display().to_string(),
                None if !file.name.is_empty() => file.name.clone(),
                None => "unknown".to_owned(),
            };
            if !is_image_file(&file) {
                log::warn!("Dropped file is not a supported type: {source}");
                continue;
            }
            let result = read_dropped_file(&file);
            self.push(CompletedUpload { position, source, result });
            accepted += 1;
        }
        accepted
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime.starts_with("image/")
    } else if let Some(path) = &file.path {
        has_image_extension(path)
    } else {
        has_image_extension(Path::new(&file.name))
    }
}

pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn read_dropped_file(file: &egui::DroppedFile) -> Result<String, ImageLoadError> {
    if let Some(bytes) = &file.bytes {
        let mime = if file.mime.is_empty() {
            data_uri::mime_for_path(Path::new(&file.name))
        } else {
            file.mime.as_str()
        };
        return Ok(data_uri::encode(mime, bytes));
    }
    let path = file.path.clone().unwrap_or_else(|| PathBuf::from(&file.name));
    data_uri::read_file(&path)
}

/// Preview files being dragged over the application
pub fn preview_files_being_dropped(ctx: &Context) {
    if ctx.input(|i| i.raw.hovered_files.is_empty()) {
        return;
    }
    let text = ctx.input(|i| {
        let mut text = "Drop images to add them:\n".to_owned();
        for file in &i.raw.hovered_files {
            match &file.path {
                Some(path) => text += &format!("\n{}", path.display()),
                None => text += "\n(Path not available)",
            }
        }
        text
    });

    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
    let screen_rect = ctx.screen_rect();
    painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
    painter.text(
        screen_rect.center(),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(20.0),
        Color32::WHITE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn completed_upload_becomes_add_command() {
        let upload = CompletedUpload {
            position: Pos2::new(30.0, 40.0),
            source: "logo.png".to_owned(),
            result: Ok("data:image/png;base64,AAAA".to_owned()),
        };
        let Ok(Command::AddElement(element)) = upload.into_command() else {
            panic!("expected an add command");
        };
        assert_eq!(element.position, Pos2::new(30.0, 40.0));
        let ElementKind::Image(source) = &element.kind else {
            panic!("expected an image element");
        };
        assert!(source.is_embedded());
    }

    #[test]
    fn queue_drains_once() {
        let queue = UploadQueue::new();
        queue.push(CompletedUpload {
            position: Pos2::ZERO,
            source: "x".to_owned(),
            result: Err(ImageLoadError::NotDataUri),
        });
        assert!(!queue.is_empty());
        assert_eq!(queue.drain().len(), 1);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn image_extensions() {
        assert!(has_image_extension(Path::new("a/b/photo.JPG")));
        assert!(!has_image_extension(Path::new("notes.md")));
    }
}
