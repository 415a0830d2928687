//! Flow container managing an ordered collection of tags.

use crate::colors::{assign_colors, ColorPair, ColorProvider, ColorTarget, RandomPalette};
use crate::config::{ConfigError, TagLayoutConfig};
use crate::tag::{Tag, TagClickListener, TagClicked, TagMode, TagShape};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use taglayout_core::{
    widget::{AccessibleRole, LayoutResult},
    Canvas, Color, Constraints, CornerRadius, Event, Rect, Size, TypeId, Widget,
};
use taglayout_layout::{arrange_flow, measure_flow};
use tracing::debug;

/// Element of the tag sequence.
#[derive(Debug, Clone)]
pub enum TagSlot {
    /// Content tag
    Normal(Tag),
    /// The persistent control tag, always last
    Control(Tag),
}

impl TagSlot {
    /// The wrapped tag.
    #[must_use]
    pub const fn tag(&self) -> &Tag {
        match self {
            Self::Normal(tag) | Self::Control(tag) => tag,
        }
    }

    /// The wrapped tag, mutably.
    pub fn tag_mut(&mut self) -> &mut Tag {
        match self {
            Self::Normal(tag) | Self::Control(tag) => tag,
        }
    }

    /// Whether this is the control slot.
    #[must_use]
    pub const fn is_control(&self) -> bool {
        matches!(self, Self::Control(_))
    }
}

/// What a mutation made stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Invalidation {
    /// Sizes or positions must be recomputed
    pub layout: bool,
    /// Pixels must be redrawn
    pub paint: bool,
}

impl Invalidation {
    /// Nothing stale.
    pub const NONE: Self = Self {
        layout: false,
        paint: false,
    };
    /// Re-measure and re-arrange.
    pub const LAYOUT: Self = Self {
        layout: true,
        paint: false,
    };
    /// Redraw only.
    pub const PAINT: Self = Self {
        layout: false,
        paint: true,
    };

    /// Union of two invalidations.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            layout: self.layout || other.layout,
            paint: self.paint || other.paint,
        }
    }

    /// True when nothing is stale.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        !self.layout && !self.paint
    }
}

/// Callback receiving each invalidation as it happens.
pub type InvalidationHandler = Box<dyn FnMut(Invalidation) + Send + Sync>;

/// Message emitted by [`TagLayout`] when one of its tags is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLayoutClicked {
    /// Position of the tag in the sequence
    pub index: usize,
    /// Label of the tag
    pub text: String,
    /// Mode of the tag
    pub mode: TagMode,
}

/// Flow container of tags with an optional trailing control tag.
///
/// Styling setters follow two rules. Container-level setters only change the
/// configuration. Default-tag setters change the defaults for future tags and
/// are also pushed onto the control tag, but never onto existing normal tags.
pub struct TagLayout {
    config: TagLayoutConfig,
    slots: Vec<TagSlot>,
    colors: Box<dyn ColorProvider>,
    click_listener: Option<TagClickListener>,
    invalidation_handler: Option<InvalidationHandler>,
    pending: Invalidation,
    focused: Option<usize>,
    test_id_value: Option<String>,
    bounds: Rect,
    border_rect: Rect,
    child_bounds: Vec<Rect>,
}

impl fmt::Debug for TagLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagLayout")
            .field("config", &self.config)
            .field("slots", &self.slots)
            .field("pending", &self.pending)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl Default for TagLayout {
    fn default() -> Self {
        Self::new(TagLayoutConfig::default())
    }
}

impl TagLayout {
    /// Create a container. In control mode the control tag is created
    /// immediately and becomes the only element.
    #[must_use]
    pub fn new(config: TagLayoutConfig) -> Self {
        let mut layout = Self {
            config,
            slots: Vec::new(),
            colors: Box::new(RandomPalette::new()),
            click_listener: None,
            invalidation_handler: None,
            pending: Invalidation::NONE,
            focused: None,
            test_id_value: None,
            bounds: Rect::default(),
            border_rect: Rect::default(),
            child_bounds: Vec::new(),
        };
        layout.init_control_tag();
        layout
    }

    /// Create a container from a validated YAML configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or fails validation.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(TagLayoutConfig::from_yaml(yaml)?))
    }

    /// Use a different color source for random coloring.
    ///
    /// The control tag is recolored from the new provider when random
    /// coloring is on.
    #[must_use]
    pub fn with_color_provider(mut self, provider: impl ColorProvider + 'static) -> Self {
        self.colors = Box::new(provider);
        if self.config.random_color {
            let press_feedback = self.config.press_feedback;
            if let Some(slot) = self.slots.iter_mut().find(|s| s.is_control()) {
                apply_pair(slot.tag_mut(), self.colors.provide(), press_feedback);
            }
        }
        self
    }

    /// Receive invalidations as they happen.
    #[must_use]
    pub fn with_invalidation_handler(
        mut self,
        handler: impl FnMut(Invalidation) + Send + Sync + 'static,
    ) -> Self {
        self.invalidation_handler = Some(Box::new(handler));
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    fn init_control_tag(&mut self) {
        if self.config.tag_mode != TagMode::Control {
            return;
        }
        let icon = self.config.tag.text_size;
        let tag = self
            .create_tag(self.config.control_text.clone(), TagMode::Control)
            .icon(icon);
        self.slots.push(TagSlot::Control(tag));
    }

    fn create_tag(&mut self, text: String, mode: TagMode) -> Tag {
        let mut tag = Tag::new(text)
            .style(self.config.tag_style())
            .mode(mode)
            .shape(self.config.tag_shape);
        tag.set_press_feedback(self.config.press_feedback);
        tag.set_click_listener(self.click_listener.clone());
        if self.config.random_color {
            apply_pair(&mut tag, self.colors.provide(), self.config.press_feedback);
        }
        tag
    }

    fn invalidate(&mut self, invalidation: Invalidation) {
        self.pending = self.pending.merge(invalidation);
        if let Some(handler) = self.invalidation_handler.as_mut() {
            handler(invalidation);
        }
    }

    /// Index where new normal tags go: before the control tag, if any.
    fn insert_index(&self) -> usize {
        match self.slots.last() {
            Some(slot) if slot.is_control() => self.slots.len() - 1,
            _ => self.slots.len(),
        }
    }

    // =========================================================================
    // Collection
    // =========================================================================

    /// Append a tag styled from the current defaults.
    pub fn add_tag(&mut self, text: impl Into<String>) {
        let tag = self.create_tag(text.into(), TagMode::Normal);
        let index = self.insert_index();
        debug!(index, text = tag.text(), "add tag");
        self.slots.insert(index, TagSlot::Normal(tag));
        self.focused = None;
        self.invalidate(Invalidation::LAYOUT);
    }

    /// Append tags in order.
    pub fn add_tags<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for text in texts {
            self.add_tag(text);
        }
    }

    /// Remove every normal tag. The control tag stays.
    pub fn clean_tags(&mut self) {
        let before = self.slots.len();
        self.slots.retain(TagSlot::is_control);
        self.child_bounds.clear();
        self.focused = None;
        debug!(removed = before - self.slots.len(), "clean tags");
        self.invalidate(Invalidation::LAYOUT.merge(Invalidation::PAINT));
    }

    /// Replace all normal tags.
    pub fn set_tags<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clean_tags();
        self.add_tags(texts);
    }

    /// Rewrite labels of existing normal tags by position.
    ///
    /// Extra texts are dropped and no tags are created. With random coloring
    /// on, every tag including the control tag gets a fresh color pair.
    /// Returns the number of relabeled tags.
    pub fn update_tags<I, S>(&mut self, texts: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut updated = 0;
        let normal = self.slots.iter_mut().filter(|s| !s.is_control());
        for (slot, text) in normal.zip(texts) {
            slot.tag_mut().set_text(text);
            updated += 1;
        }

        let mut invalidation = Invalidation::NONE;
        if updated > 0 {
            invalidation = invalidation.merge(Invalidation::LAYOUT);
        }
        if self.config.random_color {
            let press_feedback = self.config.press_feedback;
            for slot in &mut self.slots {
                apply_pair(slot.tag_mut(), self.colors.provide(), press_feedback);
            }
            invalidation = invalidation.merge(Invalidation::PAINT);
        }

        debug!(updated, recolored = self.config.random_color, "update tags");
        if !invalidation.is_none() {
            self.invalidate(invalidation);
        }
        updated
    }

    /// Set the click listener for every existing and future tag.
    pub fn set_on_tag_click(&mut self, listener: impl Fn(&TagClicked) + Send + Sync + 'static) {
        self.set_click_listener(Some(Arc::new(listener)));
    }

    /// Set or clear the shared click listener, applying it to every tag.
    pub fn set_click_listener(&mut self, listener: Option<TagClickListener>) {
        for slot in &mut self.slots {
            slot.tag_mut().set_click_listener(listener.clone());
        }
        debug!(
            tags = self.slots.len(),
            attached = listener.is_some(),
            "click listener"
        );
        self.click_listener = listener;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The full sequence, control tag included.
    #[must_use]
    pub fn slots(&self) -> &[TagSlot] {
        &self.slots
    }

    /// Iterator over all tags in sequence order.
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.slots.iter().map(TagSlot::tag)
    }

    /// Tag at a sequence position.
    #[must_use]
    pub fn tag(&self, index: usize) -> Option<&Tag> {
        self.slots.get(index).map(TagSlot::tag)
    }

    /// Labels of all tags in sequence order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.tags().map(Tag::text).collect()
    }

    /// Number of tags, control tag included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when there are no tags at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of normal tags.
    #[must_use]
    pub fn normal_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_control()).count()
    }

    /// The control tag, `None` in normal mode.
    #[must_use]
    pub fn control_tag(&self) -> Option<&Tag> {
        self.slots
            .iter()
            .rev()
            .find(|s| s.is_control())
            .map(TagSlot::tag)
    }

    /// The control tag, mutably. `None` in normal mode.
    pub fn control_tag_mut(&mut self) -> Option<&mut Tag> {
        self.slots
            .iter_mut()
            .rev()
            .find(|s| s.is_control())
            .map(TagSlot::tag_mut)
    }

    /// The shared click listener.
    #[must_use]
    pub const fn click_listener(&self) -> Option<&TagClickListener> {
        self.click_listener.as_ref()
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &TagLayoutConfig {
        &self.config
    }

    /// Container mode, fixed at construction.
    #[must_use]
    pub const fn tag_mode(&self) -> TagMode {
        self.config.tag_mode
    }

    /// Drain accumulated invalidations.
    pub fn take_invalidation(&mut self) -> Invalidation {
        std::mem::take(&mut self.pending)
    }

    /// Absolute tag rectangles from the last layout pass.
    #[must_use]
    pub fn child_bounds(&self) -> &[Rect] {
        &self.child_bounds
    }

    /// Rectangle the background and border are drawn into.
    #[must_use]
    pub const fn border_rect(&self) -> Rect {
        self.border_rect
    }

    // =========================================================================
    // Container styling (configuration only)
    // =========================================================================

    /// Set container fill color.
    pub fn set_bg_color(&mut self, color: Color) {
        self.config.bg_color = color;
        self.invalidate(Invalidation::PAINT);
    }

    /// Set container outline color.
    pub fn set_border_color(&mut self, color: Color) {
        self.config.border_color = color;
        self.invalidate(Invalidation::PAINT);
    }

    /// Set container outline width.
    pub fn set_border_width(&mut self, width: f32) {
        self.config.border_width = width.max(0.0);
        self.border_rect = self.bounds.inset(self.config.border_width);
        self.invalidate(Invalidation::PAINT);
    }

    /// Set container corner radius.
    pub fn set_radius(&mut self, radius: f32) {
        self.config.radius = radius.max(0.0);
        self.invalidate(Invalidation::PAINT);
    }

    /// Set gap between tags on a line.
    ///
    /// The left and right padding of the container follow this value.
    pub fn set_horizontal_interval(&mut self, interval: f32) {
        self.config.horizontal_interval = interval.max(0.0);
        self.invalidate(Invalidation::LAYOUT);
    }

    /// Set gap between lines.
    ///
    /// The top and bottom padding of the container follow this value.
    pub fn set_vertical_interval(&mut self, interval: f32) {
        self.config.vertical_interval = interval.max(0.0);
        self.invalidate(Invalidation::LAYOUT);
    }

    // =========================================================================
    // Future-tag settings (configuration only)
    // =========================================================================

    /// Shape of tags created from now on.
    pub fn set_tag_shape(&mut self, shape: TagShape) {
        self.config.tag_shape = shape;
    }

    /// Random coloring of tags created or updated from now on.
    pub fn set_enable_random_color(&mut self, enabled: bool) {
        self.config.random_color = enabled;
    }

    /// Tags per line in fit mode. `Some(0)` turns fit mode off.
    pub fn set_fit_count(&mut self, count: Option<usize>) {
        self.config.fit_count = count.filter(|&n| n > 0);
        self.invalidate(Invalidation::LAYOUT);
    }

    // =========================================================================
    // Default-tag styling (configuration + control tag)
    // =========================================================================

    fn push_to_control(&mut self, invalidation: Invalidation, apply: impl FnOnce(&mut Tag)) {
        if let Some(tag) = self.control_tag_mut() {
            apply(tag);
        }
        self.invalidate(invalidation);
    }

    /// Default tag fill color.
    pub fn set_tag_bg_color(&mut self, color: Color) {
        self.config.tag.bg_color = color;
        self.push_to_control(Invalidation::PAINT, |t| t.set_bg_color(color));
    }

    /// Default tag outline color.
    pub fn set_tag_border_color(&mut self, color: Color) {
        self.config.tag.border_color = color;
        self.push_to_control(Invalidation::PAINT, |t| t.set_border_color(color));
    }

    /// Default tag label color.
    pub fn set_tag_text_color(&mut self, color: Color) {
        self.config.tag.text_color = color;
        self.push_to_control(Invalidation::PAINT, |t| t.set_text_color(color));
    }

    /// Default tag outline width.
    pub fn set_tag_border_width(&mut self, width: f32) {
        let width = width.max(0.0);
        self.config.tag.border_width = width;
        self.push_to_control(Invalidation::PAINT, |t| t.set_border_width(width));
    }

    /// Default tag font size.
    pub fn set_tag_text_size(&mut self, size: f32) {
        let size = size.max(0.0);
        self.config.tag.text_size = size;
        self.push_to_control(Invalidation::LAYOUT, |t| t.set_text_size(size));
    }

    /// Default tag corner radius.
    pub fn set_tag_radius(&mut self, radius: f32) {
        let radius = radius.max(0.0);
        self.config.tag.radius = radius;
        self.push_to_control(Invalidation::PAINT, |t| t.set_radius(radius));
    }

    /// Default tag horizontal padding.
    pub fn set_tag_horizontal_padding(&mut self, padding: f32) {
        let padding = padding.max(0.0);
        self.config.tag.horizontal_padding = padding;
        self.push_to_control(Invalidation::LAYOUT, |t| t.set_horizontal_padding(padding));
    }

    /// Default tag vertical padding.
    pub fn set_tag_vertical_padding(&mut self, padding: f32) {
        let padding = padding.max(0.0);
        self.config.tag.vertical_padding = padding;
        self.push_to_control(Invalidation::LAYOUT, |t| t.set_vertical_padding(padding));
    }

    /// Press feedback for future tags and the control tag.
    pub fn set_press_feedback(&mut self, enabled: bool) {
        self.config.press_feedback = enabled;
        self.push_to_control(Invalidation::PAINT, |t| t.set_press_feedback(enabled));
    }

    /// Icon gap for future tags and the control tag.
    pub fn set_icon_padding(&mut self, padding: f32) {
        let padding = padding.max(0.0);
        self.config.icon_padding = padding;
        self.push_to_control(Invalidation::LAYOUT, |t| t.set_icon_padding(padding));
    }

    // =========================================================================
    // Layout helpers
    // =========================================================================

    /// Constraints each tag is measured with for a container width.
    fn child_constraints(&self, width: f32) -> Constraints {
        if let Some(fit) = self.config.fit_width(width) {
            return Constraints::new(fit, fit, 0.0, f32::INFINITY);
        }
        if width.is_finite() {
            let available = self.config.spacing().available_width(width);
            Constraints::new(0.0, available, 0.0, f32::INFINITY)
        } else {
            Constraints::unbounded()
        }
    }

    fn child_sizes(&self, width: f32) -> Vec<Size> {
        let constraints = self.child_constraints(width);
        self.slots
            .iter()
            .map(|slot| slot.tag().measure(constraints))
            .collect()
    }

    fn clicked(&self, index: usize, msg: Box<dyn Any + Send>) -> Box<dyn Any + Send> {
        match msg.downcast::<TagClicked>() {
            Ok(clicked) => {
                let clicked = *clicked;
                debug!(index, text = %clicked.text, "tag clicked");
                Box::new(TagLayoutClicked {
                    index,
                    text: clicked.text,
                    mode: clicked.mode,
                })
            }
            Err(other) => other,
        }
    }
}

fn apply_pair(tag: &mut Tag, pair: ColorPair, press_feedback: bool) {
    let assignment = assign_colors(pair, press_feedback);
    tag.set_border_color(assignment.border);
    match assignment.target {
        ColorTarget::Text(color) => tag.set_text_color(color),
        ColorTarget::Background(color) => tag.set_bg_color(color),
    }
}

impl Widget for TagLayout {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let sizes = self.child_sizes(constraints.max_width);
        measure_flow(&sizes, &self.config.spacing(), constraints).size
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        let sizes = self.child_sizes(bounds.width);
        let rects = arrange_flow(&sizes, &self.config.spacing(), bounds.width);

        self.child_bounds.clear();
        for (slot, rect) in self.slots.iter_mut().zip(rects) {
            let rect = rect.translate(bounds.x, bounds.y);
            slot.tag_mut().layout(rect);
            self.child_bounds.push(rect);
        }

        self.bounds = bounds;
        self.border_rect = bounds.inset(self.config.border_width);
        self.pending.layout = false;

        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let radius = CornerRadius::uniform(self.config.radius);
        canvas.fill_rounded_rect(self.border_rect, radius, self.config.bg_color);
        if self.config.border_width > 0.0 {
            canvas.stroke_rounded_rect(
                self.border_rect,
                radius,
                self.config.border_color,
                self.config.border_width,
            );
        }

        for slot in &self.slots {
            slot.tag().paint(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if matches!(event, Event::MouseLeave) {
            for slot in &mut self.slots {
                slot.tag_mut().event(event);
            }
            return None;
        }

        // Adjacent tags may share an edge; the press picks exactly one of them
        // and every later event goes to that tag alone.
        if let Event::MouseDown { position, .. } = event {
            let hit = self
                .slots
                .iter()
                .position(|s| s.tag().bounds().contains_point(position));
            if let Some(previous) = self.focused.filter(|&i| Some(i) != hit) {
                if let Some(slot) = self.slots.get_mut(previous) {
                    slot.tag_mut().event(&Event::MouseLeave);
                }
            }
            self.focused = hit;
        }

        let index = self.focused?;
        let msg = self.slots.get_mut(index)?.tag_mut().event(event)?;
        Some(self.clicked(index, msg))
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        // Tags are held as typed slots.
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::List
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::FixedColors;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use taglayout_core::{DrawCommand, MouseButton, Point, RecordingCanvas};

    fn red_pair() -> ColorPair {
        ColorPair::new(Color::from_rgb8(0xF4, 0x43, 0x36), Color::from_rgb8(0xFF, 0xEB, 0xEE))
    }

    fn control_config() -> TagLayoutConfig {
        TagLayoutConfig {
            tag_mode: TagMode::Control,
            ..Default::default()
        }
    }

    fn click(layout: &mut TagLayout, p: Point) -> Option<Box<dyn Any + Send>> {
        layout.event(&Event::MouseDown {
            position: p,
            button: MouseButton::Left,
        });
        layout.event(&Event::MouseUp {
            position: p,
            button: MouseButton::Left,
        })
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_new_normal_mode_is_empty() {
        let layout = TagLayout::default();
        assert!(layout.is_empty());
        assert!(layout.control_tag().is_none());
        assert_eq!(layout.tag_mode(), TagMode::Normal);
    }

    #[test]
    fn test_new_control_mode_has_control_tag() {
        let layout = TagLayout::new(control_config());
        assert_eq!(layout.len(), 1);
        let control = layout.control_tag().unwrap();
        assert_eq!(control.text(), "Change");
        assert_eq!(control.tag_mode(), TagMode::Control);
        assert_eq!(layout.normal_count(), 0);
    }

    #[test]
    fn test_from_yaml() {
        let layout = TagLayout::from_yaml("tag_mode: control\ncontrol_text: More").unwrap();
        assert_eq!(layout.texts(), vec!["More"]);
        assert!(TagLayout::from_yaml("fit_count: 0").is_err());
    }

    // =========================================================================
    // Collection
    // =========================================================================

    #[test]
    fn test_add_tags_preserves_order() {
        let mut layout = TagLayout::default();
        layout.add_tags(["a", "b", "c"]);
        assert_eq!(layout.texts(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_add_tag_goes_before_control() {
        let mut layout = TagLayout::new(control_config());
        layout.add_tag("a");
        layout.add_tags(["b", "c"]);
        assert_eq!(layout.texts(), vec!["a", "b", "c", "Change"]);
        assert!(layout.slots().last().unwrap().is_control());
    }

    #[test]
    fn test_clean_tags_keeps_control() {
        let mut layout = TagLayout::new(control_config());
        layout.add_tags(["a", "b"]);
        layout.clean_tags();
        assert_eq!(layout.texts(), vec!["Change"]);

        let mut normal = TagLayout::default();
        normal.add_tags(["a", "b"]);
        normal.clean_tags();
        assert!(normal.is_empty());
    }

    #[test]
    fn test_clean_then_add_equals_set() {
        let mut a = TagLayout::new(control_config());
        a.add_tags(["x", "y"]);
        a.clean_tags();
        a.add_tags(["a", "b", "c"]);

        let mut b = TagLayout::new(control_config());
        b.add_tags(["x", "y"]);
        b.set_tags(["a", "b", "c"]);

        assert_eq!(a.texts(), b.texts());
        assert_eq!(b.texts(), vec!["a", "b", "c", "Change"]);
    }

    #[test]
    fn test_update_tags_fewer_texts() {
        let mut layout = TagLayout::default();
        layout.add_tags(["t0", "t1", "t2", "t3", "t4"]);
        let updated = layout.update_tags(["x", "y"]);
        assert_eq!(updated, 2);
        assert_eq!(layout.texts(), vec!["x", "y", "t2", "t3", "t4"]);
    }

    #[test]
    fn test_update_tags_more_texts_are_dropped() {
        let mut layout = TagLayout::default();
        layout.add_tags(["t0", "t1"]);
        let updated = layout.update_tags(["a", "b", "c", "d"]);
        assert_eq!(updated, 2);
        assert_eq!(layout.texts(), vec!["a", "b"]);
    }

    #[test]
    fn test_update_tags_skips_control() {
        let mut layout = TagLayout::new(control_config());
        layout.add_tag("old");
        layout.update_tags(["new", "ignored"]);
        assert_eq!(layout.texts(), vec!["new", "Change"]);
    }

    #[test]
    fn test_update_tags_recolors_every_tag() {
        let config = TagLayoutConfig {
            random_color: true,
            ..control_config()
        };
        let mut layout = TagLayout::new(config).with_color_provider(FixedColors(red_pair()));
        layout.add_tag("a");
        layout.set_enable_random_color(false);
        layout.add_tag("b");
        assert_eq!(layout.tag(1).unwrap().tag_style().bg_color, Color::WHITE);

        layout.set_enable_random_color(true);
        layout.take_invalidation();
        layout.update_tags(Vec::<String>::new());
        for tag in layout.tags() {
            assert_eq!(tag.tag_style().border_color, red_pair().primary);
            assert_eq!(tag.tag_style().bg_color, red_pair().secondary);
        }
        assert_eq!(layout.take_invalidation(), Invalidation::PAINT);
    }

    // =========================================================================
    // Random colors
    // =========================================================================

    #[test]
    fn test_random_color_background_target() {
        let config = TagLayoutConfig {
            random_color: true,
            ..Default::default()
        };
        let mut layout = TagLayout::new(config).with_color_provider(FixedColors(red_pair()));
        layout.add_tag("a");
        let style = layout.tag(0).unwrap().tag_style();
        assert_eq!(style.border_color, red_pair().primary);
        assert_eq!(style.bg_color, red_pair().secondary);
        assert_eq!(style.text_color, TagLayoutConfig::default().tag.text_color);
    }

    #[test]
    fn test_random_color_text_target_with_press_feedback() {
        let config = TagLayoutConfig {
            random_color: true,
            press_feedback: true,
            ..Default::default()
        };
        let mut layout = TagLayout::new(config).with_color_provider(FixedColors(red_pair()));
        layout.add_tag("a");
        let style = layout.tag(0).unwrap().tag_style();
        assert_eq!(style.border_color, red_pair().primary);
        assert_eq!(style.text_color, red_pair().primary);
        assert_eq!(style.bg_color, Color::WHITE);
    }

    // =========================================================================
    // Styling asymmetry
    // =========================================================================

    #[test]
    fn test_default_tag_setter_pushes_to_control_only() {
        let mut layout = TagLayout::new(control_config());
        layout.add_tag("before");
        let blue = Color::from_rgb8(0, 0, 255);
        layout.set_tag_text_color(blue);
        layout.add_tag("after");

        assert_ne!(layout.tag(0).unwrap().tag_style().text_color, blue);
        assert_eq!(layout.tag(1).unwrap().tag_style().text_color, blue);
        assert_eq!(layout.control_tag().unwrap().tag_style().text_color, blue);
    }

    #[test]
    fn test_default_tag_setters_all_reach_control() {
        let mut layout = TagLayout::new(control_config());
        layout.set_tag_bg_color(Color::BLACK);
        layout.set_tag_border_color(Color::BLACK);
        layout.set_tag_border_width(2.0);
        layout.set_tag_text_size(20.0);
        layout.set_tag_radius(9.0);
        layout.set_tag_horizontal_padding(7.0);
        layout.set_tag_vertical_padding(8.0);
        layout.set_icon_padding(4.0);
        layout.set_press_feedback(true);

        let control = layout.control_tag().unwrap();
        let style = control.tag_style();
        assert_eq!(style.bg_color, Color::BLACK);
        assert_eq!(style.border_color, Color::BLACK);
        assert_eq!(style.border_width, 2.0);
        assert_eq!(style.text_size, 20.0);
        assert_eq!(style.radius, 9.0);
        assert_eq!(style.horizontal_padding, 7.0);
        assert_eq!(style.vertical_padding, 8.0);
        assert_eq!(style.icon_padding, 4.0);
        assert!(control.is_press_feedback());
    }

    #[test]
    fn test_shape_setter_is_future_only() {
        let mut layout = TagLayout::new(control_config());
        layout.add_tag("old");
        layout.set_tag_shape(TagShape::Arc);
        layout.add_tag("new");
        assert_eq!(layout.tag(0).unwrap().tag_shape(), TagShape::RoundRect);
        assert_eq!(layout.tag(1).unwrap().tag_shape(), TagShape::Arc);
        assert_eq!(layout.control_tag().unwrap().tag_shape(), TagShape::RoundRect);
    }

    #[test]
    fn test_control_accessors_noop_in_normal_mode() {
        let mut layout = TagLayout::default();
        layout.add_tag("a");
        layout.set_tag_text_color(Color::BLACK);
        assert!(layout.control_tag_mut().is_none());
        assert_ne!(layout.tag(0).unwrap().tag_style().text_color, Color::BLACK);
    }

    #[test]
    fn test_container_setters_clamp_negative() {
        let mut layout = TagLayout::default();
        layout.set_horizontal_interval(-3.0);
        layout.set_vertical_interval(-1.0);
        assert_eq!(layout.config().horizontal_interval, 0.0);
        assert_eq!(layout.config().vertical_interval, 0.0);
    }

    #[test]
    fn test_interval_setters_move_padding() {
        let mut layout = TagLayout::default();
        layout.add_tags(["a", "b"]);
        layout.set_horizontal_interval(12.0);
        layout.set_vertical_interval(9.0);
        let size = layout.measure(Constraints::width_only(300.0));
        layout.layout(Rect::new(20.0, 30.0, size.width, size.height));

        let rects = layout.child_bounds();
        assert_eq!(rects[0].x, 32.0);
        assert_eq!(rects[0].y, 39.0);
        assert!((rects[1].x - (rects[0].right() + 12.0)).abs() < 0.001);
        assert!((size.height - (rects[0].height + 18.0)).abs() < 0.001);
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    #[test]
    fn test_click_listener_is_retroactive() {
        let mut layout = TagLayout::default();
        layout.add_tags(["a", "b", "c"]);
        layout.set_on_tag_click(|_| {});

        let shared = layout.click_listener().unwrap();
        for tag in layout.tags() {
            assert!(Arc::ptr_eq(tag.click_listener().unwrap(), shared));
        }

        layout.add_tag("d");
        assert!(Arc::ptr_eq(
            layout.tag(3).unwrap().click_listener().unwrap(),
            layout.click_listener().unwrap()
        ));
    }

    #[test]
    fn test_click_listener_cleared() {
        let mut layout = TagLayout::new(control_config());
        layout.set_on_tag_click(|_| {});
        layout.set_click_listener(None);
        assert!(layout.control_tag().unwrap().click_listener().is_none());
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    #[test]
    fn test_invalidation_flags() {
        let mut layout = TagLayout::new(control_config());
        assert!(layout.take_invalidation().is_none());

        layout.add_tag("a");
        assert_eq!(layout.take_invalidation(), Invalidation::LAYOUT);

        layout.clean_tags();
        let inv = layout.take_invalidation();
        assert!(inv.layout && inv.paint);

        layout.set_bg_color(Color::BLACK);
        assert_eq!(layout.take_invalidation(), Invalidation::PAINT);
        assert!(layout.take_invalidation().is_none());
    }

    #[test]
    fn test_invalidation_handler_receives_each_signal() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut layout = TagLayout::default()
            .with_invalidation_handler(move |inv| sink.lock().unwrap().push(inv));
        layout.add_tag("a");
        layout.clean_tags();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], Invalidation::LAYOUT);
        assert!(seen[1].paint);
    }

    // =========================================================================
    // Widget
    // =========================================================================

    #[test]
    fn test_layout_positions_tags_in_bounds() {
        let mut layout = TagLayout::new(control_config());
        layout.add_tags(["alpha", "beta", "gamma", "delta"]);
        let size = layout.measure(Constraints::width_only(120.0));
        layout.layout(Rect::new(10.0, 20.0, size.width, size.height));

        assert_eq!(layout.child_bounds().len(), 5);
        for rect in layout.child_bounds() {
            assert!(rect.x >= 15.0 - 0.001);
            assert!(rect.y >= 25.0 - 0.001);
            assert!(rect.right() <= 10.0 + 120.0 + 0.001);
            assert!(rect.bottom() <= 20.0 + size.height + 0.001);
        }
        assert_eq!(layout.border_rect(), Rect::new(10.0, 20.0, size.width, size.height).inset(0.5));
    }

    #[test]
    fn test_measure_empty_is_zero() {
        let layout = TagLayout::default();
        assert_eq!(layout.measure(Constraints::unbounded()), Size::ZERO);
    }

    #[test]
    fn test_fit_mode_forces_widths() {
        let config = TagLayoutConfig {
            fit_count: Some(2),
            ..Default::default()
        };
        let mut layout = TagLayout::new(config);
        layout.add_tags(["a", "a much longer label", "c"]);
        let size = layout.measure(Constraints::width_only(110.0));
        layout.layout(Rect::new(0.0, 0.0, size.width, size.height));

        // (110 - 10 - 5) / 2
        let rects = layout.child_bounds();
        assert!((rects[0].width - 47.5).abs() < 0.001);
        assert!((rects[1].width - 47.5).abs() < 0.001);
        assert_eq!(rects[0].y, rects[1].y);
        assert!(rects[2].y > rects[0].y);
    }

    #[test]
    fn test_fit_mode_keeps_count_per_line_for_uneven_widths() {
        for n in 2..=7usize {
            for step in 0..340 {
                let width = 60.5 + step as f32;
                let mut layout = TagLayout::new(TagLayoutConfig {
                    fit_count: Some(n),
                    ..Default::default()
                });
                layout.add_tags((0..n).map(|i| format!("t{i}")));
                let size = layout.measure(Constraints::width_only(width));
                layout.layout(Rect::new(0.0, 0.0, size.width, size.height));

                let rects = layout.child_bounds();
                assert_eq!(rects.len(), n);
                assert!(
                    rects.iter().all(|r| r.y == rects[0].y),
                    "n={n} width={width} wrapped"
                );
            }
        }
    }

    #[test]
    fn test_paint_background_border_then_tags() {
        let mut layout = TagLayout::default();
        layout.add_tags(["a", "b"]);
        let size = layout.measure(Constraints::width_only(200.0));
        layout.layout(Rect::new(0.0, 0.0, size.width, size.height));

        let mut canvas = RecordingCanvas::new();
        layout.paint(&mut canvas);

        match &canvas.commands()[0] {
            DrawCommand::Rect { radius, style, .. } => {
                assert_eq!(*radius, CornerRadius::uniform(5.0));
                assert_eq!(style.fill, Some(Color::WHITE));
            }
            other => panic!("expected Rect, got {other:?}"),
        }
        assert!(canvas.commands()[1].rect_bounds().is_some());
        assert_eq!(canvas.texts(), vec!["a", "b"]);
    }

    #[test]
    fn test_event_reports_index() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut layout = TagLayout::new(control_config());
        layout.add_tags(["a", "b"]);
        layout.set_on_tag_click(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let size = layout.measure(Constraints::width_only(300.0));
        layout.layout(Rect::new(0.0, 0.0, size.width, size.height));

        let center = layout.child_bounds()[2].center();
        let msg = click(&mut layout, center).unwrap();
        let clicked = msg.downcast::<TagLayoutClicked>().unwrap();
        assert_eq!(clicked.index, 2);
        assert_eq!(clicked.text, "Change");
        assert_eq!(clicked.mode, TagMode::Control);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_click_on_shared_edge_hits_one_tag() {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&hits);
        let mut layout = TagLayout::default();
        layout.set_horizontal_interval(0.0);
        layout.add_tags(["a", "b"]);
        layout.set_on_tag_click(move |msg| sink.lock().unwrap().push(msg.text.clone()));
        let size = layout.measure(Constraints::width_only(300.0));
        layout.layout(Rect::new(0.0, 0.0, size.width, size.height));

        let first = layout.child_bounds()[0];
        assert_eq!(first.right(), layout.child_bounds()[1].x);
        let edge = Point::new(first.right(), first.center().y);
        let msg = click(&mut layout, edge).unwrap();
        assert_eq!(msg.downcast_ref::<TagLayoutClicked>().unwrap().index, 0);
        assert_eq!(*hits.lock().unwrap(), vec!["a".to_string()]);
        assert!(layout.tags().all(|t| !t.is_pressed()));
    }

    #[test]
    fn test_press_elsewhere_releases_focused_tag() {
        let mut layout = TagLayout::default();
        layout.add_tags(["a", "b"]);
        let size = layout.measure(Constraints::width_only(300.0));
        layout.layout(Rect::new(0.0, 0.0, size.width, size.height));

        let first = layout.child_bounds()[0].center();
        layout.event(&Event::MouseDown {
            position: first,
            button: MouseButton::Left,
        });
        assert!(layout.tag(0).unwrap().is_pressed());

        layout.event(&Event::MouseDown {
            position: Point::new(299.0, 1.0),
            button: MouseButton::Left,
        });
        assert!(!layout.tag(0).unwrap().is_pressed());
        assert!(layout
            .event(&Event::MouseUp {
                position: first,
                button: MouseButton::Left,
            })
            .is_none());
    }

    #[test]
    fn test_click_outside_tags_is_none() {
        let mut layout = TagLayout::default();
        layout.add_tag("a");
        let size = layout.measure(Constraints::width_only(300.0));
        layout.layout(Rect::new(0.0, 0.0, size.width, size.height));
        assert!(click(&mut layout, Point::new(299.0, 1.0)).is_none());
    }

    #[test]
    fn test_keyboard_goes_to_focused_tag() {
        let mut layout = TagLayout::default();
        layout.add_tags(["a", "b"]);
        let size = layout.measure(Constraints::width_only(300.0));
        layout.layout(Rect::new(0.0, 0.0, size.width, size.height));

        assert!(layout.event(&Event::KeyUp { key: taglayout_core::Key::Enter }).is_none());

        let center = layout.child_bounds()[1].center();
        click(&mut layout, center);
        layout.event(&Event::KeyDown {
            key: taglayout_core::Key::Enter,
        });
        let msg = layout
            .event(&Event::KeyUp {
                key: taglayout_core::Key::Enter,
            })
            .unwrap();
        assert_eq!(msg.downcast_ref::<TagLayoutClicked>().unwrap().index, 1);
    }

    #[test]
    fn test_role_and_children() {
        let layout = TagLayout::default().with_test_id("tags");
        assert_eq!(Widget::accessible_role(&layout), AccessibleRole::List);
        assert_eq!(Widget::test_id(&layout), Some("tags"));
        assert!(layout.children().is_empty());
    }
}
