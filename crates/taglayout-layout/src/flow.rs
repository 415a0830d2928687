//! Wrapping flow layout.
//!
//! Children are placed left to right and wrap onto a new line when the
//! next child would overrun the available width. Measurement and
//! arrangement share [`partition_lines`], so the height reserved by a
//! measure pass always matches the rectangles produced by the arrange pass.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use taglayout_core::{Constraints, HeightMode, Insets, Rect, Size};

/// Spacing applied between children and around the content.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowSpacing {
    /// Gap between siblings on the same line
    pub horizontal: f32,
    /// Gap between consecutive lines
    pub vertical: f32,
    /// Outer padding of the container
    pub padding: Insets,
}

impl FlowSpacing {
    /// Create spacing with explicit padding.
    #[must_use]
    pub const fn new(horizontal: f32, vertical: f32, padding: Insets) -> Self {
        Self {
            horizontal,
            vertical,
            padding,
        }
    }

    /// Spacing whose outer padding equals the intervals: left/right padding
    /// is the horizontal interval, top/bottom the vertical one.
    #[must_use]
    pub const fn from_intervals(horizontal: f32, vertical: f32) -> Self {
        Self::new(
            horizontal,
            vertical,
            Insets::symmetric(horizontal, vertical),
        )
    }

    /// Width left for children once left/right padding is removed.
    #[must_use]
    pub fn available_width(&self, width: f32) -> f32 {
        (width - self.padding.horizontal()).max(0.0)
    }
}

/// A run of consecutive children sharing one line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowLine {
    /// Index of the first child on the line
    pub start: usize,
    /// One past the index of the last child on the line
    pub end: usize,
    /// Children widths plus the intervals between them
    pub width: f32,
    /// Tallest child on the line
    pub height: f32,
}

impl FlowLine {
    /// Child index range covered by this line.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of children on the line.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the line holds no children.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Output of a measure pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowMeasure {
    /// Size the container asks for
    pub size: Size,
    /// Width the children were flowed into
    pub available_width: f32,
    /// Widest line
    pub content_width: f32,
    /// Sum of line heights and the vertical intervals between them
    pub content_height: f32,
    /// Line partition of the children
    pub lines: Vec<FlowLine>,
}

impl FlowMeasure {
    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Overshoot of the available width still treated as a fit.
///
/// Children sized to divide a line exactly sum to the available width only
/// up to `f32` rounding.
pub const WRAP_TOLERANCE: f32 = 1e-3;

/// Decide whether a child starts a new line.
///
/// `line_used` is the width already consumed on the current line including
/// one trailing interval per child. The first child of a line never wraps.
#[inline]
fn breaks_line(line_len: usize, line_used: f32, child_width: f32, available_width: f32) -> bool {
    line_len > 0 && line_used + child_width > available_width + WRAP_TOLERANCE
}

/// Split children into lines for the given available width.
///
/// A child wider than `available_width` occupies a line on its own and may
/// overflow it.
#[must_use]
pub fn partition_lines(sizes: &[Size], spacing: &FlowSpacing, available_width: f32) -> Vec<FlowLine> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut used = 0.0f32;
    let mut width = 0.0f32;
    let mut height = 0.0f32;

    for (i, size) in sizes.iter().enumerate() {
        if breaks_line(i - start, used, size.width, available_width) {
            lines.push(FlowLine {
                start,
                end: i,
                width,
                height,
            });
            start = i;
            used = 0.0;
            height = 0.0;
        }
        width = used + size.width;
        used += size.width + spacing.horizontal;
        height = height.max(size.height);
    }

    if start < sizes.len() {
        lines.push(FlowLine {
            start,
            end: sizes.len(),
            width,
            height,
        });
    }

    lines
}

fn content_height(lines: &[FlowLine], vertical: f32) -> f32 {
    let heights: f32 = lines.iter().map(|l| l.height).sum();
    heights + vertical * lines.len().saturating_sub(1) as f32
}

/// Measurement Engine: compute line partition and the container size.
///
/// Empty input yields [`Size::ZERO`]. With an exact height the requested
/// height wins, otherwise the content height plus top/bottom padding is
/// reported even when it exceeds an upper bound. The width is the bounded
/// maximum width, or the widest line plus padding when unbounded.
#[must_use]
pub fn measure_flow(sizes: &[Size], spacing: &FlowSpacing, constraints: Constraints) -> FlowMeasure {
    let available_width = spacing.available_width(constraints.max_width);
    let lines = partition_lines(sizes, spacing, available_width);
    let content_width = lines.iter().map(|l| l.width).fold(0.0f32, f32::max);
    let content_height = content_height(&lines, spacing.vertical);

    let size = if sizes.is_empty() {
        Size::ZERO
    } else {
        let width = if constraints.has_bounded_width() {
            constraints.max_width
        } else {
            content_width + spacing.padding.horizontal()
        };
        let height = match constraints.height_mode() {
            HeightMode::Exact(height) => height,
            HeightMode::AtMost(_) | HeightMode::Unbounded => {
                content_height + spacing.padding.vertical()
            }
        };
        Size::new(width, height)
    };

    tracing::trace!(
        children = sizes.len(),
        lines = lines.len(),
        available_width,
        width = size.width,
        height = size.height,
        "flow measured"
    );

    FlowMeasure {
        size,
        available_width,
        content_width,
        content_height,
        lines,
    }
}

/// Arrangement Engine: place every child for the committed container width.
///
/// Rectangles are relative to the container's top-left corner and come back
/// in child order.
#[must_use]
pub fn arrange_flow(sizes: &[Size], spacing: &FlowSpacing, final_width: f32) -> Vec<Rect> {
    let available_width = spacing.available_width(final_width);
    let lines = partition_lines(sizes, spacing, available_width);
    let mut rects = Vec::with_capacity(sizes.len());
    let mut top = spacing.padding.top;

    for (n, line) in lines.iter().enumerate() {
        if n > 0 {
            top += spacing.vertical;
        }
        let mut left = spacing.padding.left;
        for size in &sizes[line.range()] {
            rects.push(Rect::new(left, top, size.width, size.height));
            left += size.width + spacing.horizontal;
        }
        top += line.height;
    }

    tracing::trace!(children = rects.len(), final_width, "flow arranged");
    rects
}

/// Flow layout bound to a fixed spacing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowLayout {
    /// Intervals and padding
    pub spacing: FlowSpacing,
}

impl FlowLayout {
    /// Create a flow layout.
    #[must_use]
    pub const fn new(spacing: FlowSpacing) -> Self {
        Self { spacing }
    }

    /// Run the measure pass.
    #[must_use]
    pub fn measure(&self, sizes: &[Size], constraints: Constraints) -> FlowMeasure {
        measure_flow(sizes, &self.spacing, constraints)
    }

    /// Run the arrange pass.
    #[must_use]
    pub fn arrange(&self, sizes: &[Size], final_width: f32) -> Vec<Rect> {
        arrange_flow(sizes, &self.spacing, final_width)
    }
}
