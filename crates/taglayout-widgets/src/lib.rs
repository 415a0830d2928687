//! Tag widgets: the [`Tag`] chip and the [`TagLayout`] flow container.

pub mod colors;
pub mod config;
pub mod tag;
pub mod tag_layout;

pub use colors::{
    assign_colors, default_palette, ColorAssignment, ColorPair, ColorProvider, ColorTarget,
    FixedColors, RandomPalette,
};
pub use config::{ConfigError, TagDefaults, TagLayoutConfig};
pub use tag::{Tag, TagClickListener, TagClicked, TagMode, TagShape, TagStyle};
pub use tag_layout::{Invalidation, InvalidationHandler, TagLayout, TagLayoutClicked, TagSlot};
