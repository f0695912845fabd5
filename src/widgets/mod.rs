pub mod resize_handle;

pub use resize_handle::{ResizeHandles, HANDLE_SIZE};
