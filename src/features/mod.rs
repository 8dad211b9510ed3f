//! Feature modules
//!
//! Renderers for the constructs that point outside the current line:
//! - Chapter table, cross references, links and includes
//! - Images

pub mod images;
pub mod refs;

// Re-export commonly used types
pub use images::render_image;
pub use refs::{ChapterTable, DuplicateChapterPolicy, Registration};
