#![allow(clippy::doc_markdown)]
//! Flow layout engine for taglayout.
//!
//! Two passes over an ordered sequence of child sizes:
//!
//! - **Measure** ([`measure_flow`]): partition children into lines and
//!   report the container size, including interval and padding accounting.
//! - **Arrange** ([`arrange_flow`]): assign every child a rectangle for the
//!   committed container width.
//!
//! Both passes wrap through the same [`partition_lines`] routine.

mod flow;

pub use flow::{
    arrange_flow, measure_flow, partition_lines, FlowLayout, FlowLine, FlowMeasure, FlowSpacing,
    WRAP_TOLERANCE,
};
