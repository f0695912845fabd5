pub mod color;
pub mod data_uri;
pub mod time;
