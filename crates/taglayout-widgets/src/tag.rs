//! Tag widget: a single bordered text chip.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use taglayout_core::{
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle},
    Canvas, Color, Constraints, CornerRadius, Event, Key, MouseButton, Point, Rect, Size, TypeId,
    Widget,
};

/// Role of a tag inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagMode {
    /// Ordinary content tag
    #[default]
    Normal,
    /// Persistent action tag (e.g. "change set") kept at the end of the sequence
    Control,
}

/// Outline shape of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagShape {
    /// Corners rounded by the configured radius
    #[default]
    RoundRect,
    /// Pill shape: radius is half the tag height
    Arc,
    /// Square corners
    Rect,
}

/// Visual properties pushed into a tag by its container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TagStyle {
    /// Fill color
    pub bg_color: Color,
    /// Outline color
    pub border_color: Color,
    /// Label color
    pub text_color: Color,
    /// Outline width
    pub border_width: f32,
    /// Label font size
    pub text_size: f32,
    /// Corner radius for [`TagShape::RoundRect`]
    pub radius: f32,
    /// Space left and right of the content
    pub horizontal_padding: f32,
    /// Space above and below the content
    pub vertical_padding: f32,
    /// Gap between the icon and the label
    pub icon_padding: f32,
}

impl Default for TagStyle {
    fn default() -> Self {
        Self {
            bg_color: Color::WHITE,
            border_color: Color::from_rgb8(0x33, 0x33, 0x33),
            text_color: Color::from_rgb8(0x66, 0x66, 0x66),
            border_width: 0.5,
            text_size: 13.0,
            radius: 5.0,
            horizontal_padding: 5.0,
            vertical_padding: 5.0,
            icon_padding: 3.0,
        }
    }
}

/// Message emitted when a tag is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagClicked {
    /// Label of the clicked tag
    pub text: String,
    /// Mode of the clicked tag
    pub mode: TagMode,
}

/// Shared click callback. Listeners get the click message only, never the
/// container, so they cannot mutate the tag collection mid-pass.
pub type TagClickListener = Arc<dyn Fn(&TagClicked) + Send + Sync>;

/// Tag widget with label, optional icon and click handling.
#[derive(Clone, Serialize, Deserialize)]
pub struct Tag {
    /// Label
    text: String,
    /// Colors, border and padding
    style: TagStyle,
    /// Normal or control
    mode: TagMode,
    /// Outline shape
    shape: TagShape,
    /// Invert colors while pressed
    press_feedback: bool,
    /// Side length of the leading icon (0 = no icon)
    icon_size: f32,
    /// Test ID
    test_id_value: Option<String>,
    /// Click callback
    #[serde(skip)]
    listener: Option<TagClickListener>,
    /// Current pressed state
    #[serde(skip)]
    pressed: bool,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("text", &self.text)
            .field("mode", &self.mode)
            .field("shape", &self.shape)
            .field("style", &self.style)
            .field("press_feedback", &self.press_feedback)
            .field("has_listener", &self.listener.is_some())
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl Tag {
    /// Create a new tag with label.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TagStyle::default(),
            mode: TagMode::Normal,
            shape: TagShape::RoundRect,
            press_feedback: false,
            icon_size: 0.0,
            test_id_value: None,
            listener: None,
            pressed: false,
            bounds: Rect::default(),
        }
    }

    /// Set the full style.
    #[must_use]
    pub fn style(mut self, style: TagStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the mode.
    #[must_use]
    pub const fn mode(mut self, mode: TagMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the shape.
    #[must_use]
    pub const fn shape(mut self, shape: TagShape) -> Self {
        self.shape = shape;
        self
    }

    /// Reserve a leading square icon of the given side length.
    #[must_use]
    pub const fn icon(mut self, size: f32) -> Self {
        self.icon_size = size;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// Label.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current style.
    #[must_use]
    pub const fn tag_style(&self) -> &TagStyle {
        &self.style
    }

    /// Mode.
    #[must_use]
    pub const fn tag_mode(&self) -> TagMode {
        self.mode
    }

    /// Shape.
    #[must_use]
    pub const fn tag_shape(&self) -> TagShape {
        self.shape
    }

    /// Whether press feedback is on.
    #[must_use]
    pub const fn is_press_feedback(&self) -> bool {
        self.press_feedback
    }

    /// Whether the tag is currently pressed.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Attached click listener, if any.
    #[must_use]
    pub const fn click_listener(&self) -> Option<&TagClickListener> {
        self.listener.as_ref()
    }

    // ---------------------------------------------------------------------
    // Mutators used by the container
    // ---------------------------------------------------------------------

    /// Replace the label.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replace the full style.
    pub fn set_style(&mut self, style: TagStyle) {
        self.style = style;
    }

    /// Set fill color.
    pub fn set_bg_color(&mut self, color: Color) {
        self.style.bg_color = color;
    }

    /// Set outline color.
    pub fn set_border_color(&mut self, color: Color) {
        self.style.border_color = color;
    }

    /// Set label color.
    pub fn set_text_color(&mut self, color: Color) {
        self.style.text_color = color;
    }

    /// Set outline width.
    pub fn set_border_width(&mut self, width: f32) {
        self.style.border_width = width;
    }

    /// Set label font size.
    pub fn set_text_size(&mut self, size: f32) {
        self.style.text_size = size;
    }

    /// Set corner radius.
    pub fn set_radius(&mut self, radius: f32) {
        self.style.radius = radius;
    }

    /// Set horizontal padding.
    pub fn set_horizontal_padding(&mut self, padding: f32) {
        self.style.horizontal_padding = padding;
    }

    /// Set vertical padding.
    pub fn set_vertical_padding(&mut self, padding: f32) {
        self.style.vertical_padding = padding;
    }

    /// Set gap between icon and label.
    pub fn set_icon_padding(&mut self, padding: f32) {
        self.style.icon_padding = padding;
    }

    /// Set shape.
    pub fn set_shape(&mut self, shape: TagShape) {
        self.shape = shape;
    }

    /// Toggle press feedback.
    pub fn set_press_feedback(&mut self, enabled: bool) {
        self.press_feedback = enabled;
        if !enabled {
            self.pressed = false;
        }
    }

    /// Attach or detach the click listener.
    pub fn set_click_listener(&mut self, listener: Option<TagClickListener>) {
        self.listener = listener;
    }

    // ---------------------------------------------------------------------
    // Rendering helpers
    // ---------------------------------------------------------------------

    /// Estimate text size.
    fn estimate_text_size(&self) -> Size {
        let char_width = self.style.text_size * 0.6;
        let width = self.text.chars().count() as f32 * char_width;
        let height = self.style.text_size * 1.2;
        Size::new(width, height)
    }

    /// Width taken by the icon and its gap.
    fn icon_extent(&self) -> f32 {
        if self.icon_size > 0.0 {
            self.icon_size + self.style.icon_padding
        } else {
            0.0
        }
    }

    /// Corner radius for the current shape and bounds.
    #[must_use]
    pub fn corner_radius(&self) -> CornerRadius {
        match self.shape {
            TagShape::RoundRect => CornerRadius::uniform(self.style.radius),
            TagShape::Arc => CornerRadius::uniform(self.bounds.height / 2.0),
            TagShape::Rect => CornerRadius::ZERO,
        }
    }

    /// Fill and label colors for the current press state.
    fn current_colors(&self) -> (Color, Color) {
        if self.press_feedback && self.pressed {
            (self.style.border_color, self.style.bg_color)
        } else {
            (self.style.bg_color, self.style.text_color)
        }
    }

    fn click(&self) -> TagClicked {
        let msg = TagClicked {
            text: self.text.clone(),
            mode: self.mode,
        };
        if let Some(listener) = &self.listener {
            listener(&msg);
        }
        msg
    }
}

impl Widget for Tag {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let text_size = self.estimate_text_size();
        let content_height = text_size.height.max(self.icon_size);
        let size = Size::new(
            text_size.width + self.icon_extent() + self.style.horizontal_padding * 2.0,
            content_height + self.style.vertical_padding * 2.0,
        );
        constraints.constrain(size)
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let (fill, text_color) = self.current_colors();
        let radius = self.corner_radius();
        // Keep the stroke inside the allocated rectangle.
        let outline = self.bounds.inset(self.style.border_width / 2.0);

        canvas.fill_rounded_rect(outline, radius, fill);
        if self.style.border_width > 0.0 {
            canvas.stroke_rounded_rect(
                outline,
                radius,
                self.style.border_color,
                self.style.border_width,
            );
        }

        let text_size = self.estimate_text_size();
        let content_width = text_size.width + self.icon_extent();
        let mut x = self.bounds.x + (self.bounds.width - content_width) / 2.0;

        if self.icon_size > 0.0 {
            let icon = Rect::new(
                x,
                self.bounds.y + (self.bounds.height - self.icon_size) / 2.0,
                self.icon_size,
                self.icon_size,
            );
            canvas.fill_rounded_rect(icon, CornerRadius::uniform(self.icon_size / 2.0), text_color);
            x += self.icon_extent();
        }

        let style = TextStyle {
            size: self.style.text_size,
            color: text_color,
            weight: FontWeight::Normal,
            ..Default::default()
        };
        let y = self.bounds.y + (self.bounds.height - text_size.height) / 2.0;
        canvas.draw_text(&self.text, Point::new(x, y), &style);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        match event {
            Event::MouseLeave => {
                self.pressed = false;
                None
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                if self.bounds.contains_point(position) {
                    self.pressed = true;
                }
                None
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => {
                let was_pressed = self.pressed;
                self.pressed = false;

                if was_pressed && self.bounds.contains_point(position) {
                    Some(Box::new(self.click()))
                } else {
                    None
                }
            }
            Event::KeyDown {
                key: Key::Enter | Key::Space,
            } => {
                self.pressed = true;
                None
            }
            Event::KeyUp {
                key: Key::Enter | Key::Space,
            } => {
                let was_pressed = self.pressed;
                self.pressed = false;
                was_pressed.then(|| Box::new(self.click()) as Box<dyn Any + Send>)
            }
            _ => None,
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn is_focusable(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.text)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Button
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
