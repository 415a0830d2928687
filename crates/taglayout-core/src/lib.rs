//! Core types and traits for the taglayout flow container.
//!
//! This crate provides foundational types used throughout taglayout:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Insets`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`], [`HeightMode`]
//! - Events: [`Event`]
//! - The [`Widget`] and [`Canvas`] traits plus a [`RecordingCanvas`]

mod canvas;
mod color;
mod constraints;
pub mod draw;
mod event;
mod geometry;
pub mod widget;

pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::{Constraints, HeightMode};
pub use draw::{BoxStyle, DrawCommand, StrokeStyle};
pub use event::{Event, Key, MouseButton};
pub use geometry::{CornerRadius, Insets, Point, Rect, Size};
pub use widget::{
    AccessibleRole, Canvas, FontStyle, FontWeight, LayoutResult, TextStyle, TypeId, Widget,
};
