//! Output sinks: console streams and size-rotated files

pub mod console;
pub mod rotating_file;
pub mod text;

pub use rotating_file::{ensure_parent_dir, open_file_sink, RotatingWriter};
pub use text::TextHandler;
