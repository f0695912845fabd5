#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod command;
pub mod components;
pub mod config;
pub mod element;
pub mod error;
pub mod geometry;
pub mod id_generator;
pub mod input;
pub mod panels;
pub mod state;
pub mod storage;
pub mod template;
pub mod texture_manager;
pub mod util;
pub mod widgets;

pub use app::TemplateEditorApp;
pub use command::{reduce, Command, History};
pub use config::EditorConfig;
pub use element::{Element, ElementId, ElementKind, ElementPatch};
pub use error::{ImageLoadError, StorageError};
pub use state::{EditorState, Mode};
pub use storage::{FileTemplateStore, TemplateStore};
pub use template::{create_empty_template, Template};
