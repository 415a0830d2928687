//! Taglayout: a wrapping tag container.
//!
//! Tags flow left to right and wrap onto new lines when the width runs out.
//! The container owns the tag sequence, an optional trailing control tag,
//! default tag styling and optional random coloring.
//!
//! ```
//! use taglayout::widgets::{TagLayout, TagLayoutConfig, TagMode};
//! use taglayout::{Constraints, Rect, Widget};
//!
//! let mut tags = TagLayout::new(TagLayoutConfig {
//!     tag_mode: TagMode::Control,
//!     ..Default::default()
//! });
//! tags.set_tags(["rust", "wasm", "layout"]);
//!
//! let size = tags.measure(Constraints::width_only(200.0));
//! tags.layout(Rect::new(0.0, 0.0, size.width, size.height));
//! assert_eq!(tags.child_bounds().len(), 4);
//! assert_eq!(tags.texts().last(), Some(&"Change"));
//! ```

#![allow(clippy::doc_markdown)]

pub use taglayout_core::*;
pub use taglayout_layout as layout;
pub use taglayout_widgets as widgets;

/// Common imports for application code.
pub mod prelude {
    pub use taglayout_core::{Color, Constraints, Event, Rect, Size, Widget};
    pub use taglayout_widgets::{
        TagClicked, TagLayout, TagLayoutClicked, TagLayoutConfig, TagMode, TagShape,
    };
}
