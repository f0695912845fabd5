use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

mod common;
pub(crate) mod image;
pub(crate) mod shape;
pub(crate) mod text;

pub use common::{
    DEFAULT_OPACITY, DEFAULT_Z_INDEX, DIMMED_OPACITY, DUPLICATE_OFFSET, IMAGE_SIZE, LINE_HIT_SLOP,
    MIN_ELEMENT_SIZE, SHAPE_SIZE, TEXT_SIZE,
};
pub(crate) use common::distance_to_line_segment;
pub use image::{ImagePatch, ImageSource};
pub use shape::{ShapeKind, ShapePatch, ShapeStyle};
pub use text::{FontStyle, FontWeight, TextAlign, TextPatch, TextStyle};

use crate::geometry::rotation::normalize_degrees;

/// Unique, immutable identifier of an element within a template
pub type ElementId = String;

/// Width and height in unscaled template units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl From<Vec2> for Size {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Variant-specific data of an element. Each case carries only its own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text(TextStyle),
    Image(ImageSource),
    Shape(ShapeStyle),
}

/// A single placed graphical object on a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    id: ElementId,
    /// Top-left corner of the unrotated bounding box
    pub position: Pos2,
    pub size: Size,
    /// Degrees clockwise around the centre, always in `[0, 360)`
    #[serde(default)]
    rotation: f32,
    /// Stacking order; ties are broken by insertion order
    #[serde(default = "default_z_index")]
    pub z_index: u32,
    #[serde(default = "default_opacity")]
    opacity: f32,
    #[serde(flatten)]
    pub kind: ElementKind,
}

fn default_z_index() -> u32 {
    DEFAULT_Z_INDEX
}

fn default_opacity() -> f32 {
    DEFAULT_OPACITY
}

impl Element {
    pub fn new(id: impl Into<ElementId>, position: Pos2, size: Size, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            position,
            size,
            rotation: 0.0,
            z_index: DEFAULT_Z_INDEX,
            opacity: DEFAULT_OPACITY,
            kind,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the element type as a string
    pub fn element_type(&self) -> &'static str {
        match self.kind {
            ElementKind::Text(_) => "text",
            ElementKind::Image(_) => "image",
            ElementKind::Shape(_) => "shape",
        }
    }

    /// Unrotated bounding rectangle in template units
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size.to_vec2())
    }

    pub fn center(&self) -> Pos2 {
        self.rect().center()
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = normalize_degrees(degrees);
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = common::clamp_opacity(opacity);
    }

    /// Opacity after a visibility toggle: fully opaque elements are dimmed, anything else is restored
    pub fn toggled_opacity(&self) -> f32 {
        if self.opacity < DEFAULT_OPACITY {
            DEFAULT_OPACITY
        } else {
            DIMMED_OPACITY
        }
    }

    pub fn as_text(&self) -> Option<&TextStyle> {
        match &self.kind {
            ElementKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageSource> {
        match &self.kind {
            ElementKind::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeStyle> {
        match &self.kind {
            ElementKind::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    /// Merge a sparse patch into this element.
    ///
    /// A style patch for a different variant than the element's own is ignored.
    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(size) = patch.size {
            self.size = size;
        }
        if let Some(rotation) = patch.rotation {
            self.set_rotation(rotation);
        }
        if let Some(z_index) = patch.z_index {
            self.z_index = z_index;
        }
        if let Some(opacity) = patch.opacity {
            self.set_opacity(opacity);
        }
        match (&patch.style, &mut self.kind) {
            (None, _) => {}
            (Some(StylePatch::Text(p)), ElementKind::Text(style)) => p.apply(style),
            (Some(StylePatch::Image(p)), ElementKind::Image(source)) => p.apply(source),
            (Some(StylePatch::Shape(p)), ElementKind::Shape(style)) => p.apply(style),
            (Some(_), _) => {
                log::debug!("Ignoring style patch that does not match {} element {}", self.element_type(), self.id);
            }
        }
    }

    /// Clone this element under a new id, offset so it does not cover the original
    pub fn duplicate(&self, new_id: impl Into<ElementId>) -> Self {
        Self {
            id: new_id.into(),
            position: self.position + Vec2::splat(DUPLICATE_OFFSET),
            ..self.clone()
        }
    }

    /// Re-establish value invariants after deserialization
    pub(crate) fn normalized(mut self) -> Self {
        self.set_rotation(self.rotation);
        self.set_opacity(self.opacity);
        self
    }
}

/// Variant-specific part of an [`ElementPatch`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StylePatch {
    Text(TextPatch),
    Image(ImagePatch),
    Shape(ShapePatch),
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Pos2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StylePatch>,
}

impl ElementPatch {
    pub fn position(position: Pos2) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn geometry(position: Pos2, size: Size) -> Self {
        Self {
            position: Some(position),
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn size(size: Size) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn rotation(degrees: f32) -> Self {
        Self {
            rotation: Some(degrees),
            ..Self::default()
        }
    }

    pub fn opacity(opacity: f32) -> Self {
        Self {
            opacity: Some(opacity),
            ..Self::default()
        }
    }

    pub fn z_index(z_index: u32) -> Self {
        Self {
            z_index: Some(z_index),
            ..Self::default()
        }
    }

    pub fn text(patch: TextPatch) -> Self {
        Self {
            style: Some(StylePatch::Text(patch)),
            ..Self::default()
        }
    }

    pub fn image(patch: ImagePatch) -> Self {
        Self {
            style: Some(StylePatch::Image(patch)),
            ..Self::default()
        }
    }

    pub fn shape(patch: ShapePatch) -> Self {
        Self {
            style: Some(StylePatch::Shape(patch)),
            ..Self::default()
        }
    }
}

/// Factory functions for creating elements
pub mod factory {
    use super::*;

    /// Seed data for inserting an element of a given variant, e.g. from the element library
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "type", rename_all = "lowercase")]
    pub enum ElementSeed {
        Text {
            #[serde(default)]
            content: Option<String>,
        },
        #[serde(rename_all = "camelCase")]
        Image {
            #[serde(default)]
            image_url: Option<String>,
        },
        Shape {
            #[serde(default)]
            shape: Option<ShapeKind>,
        },
    }

    /// Create a new text element (200×50)
    pub fn create_text_element(id: impl Into<ElementId>, position: Pos2, content: Option<String>) -> Element {
        let style = content.map(TextStyle::with_content).unwrap_or_default();
        Element::new(id, position, TEXT_SIZE, ElementKind::Text(style))
    }

    /// Create a new image element (150×150)
    pub fn create_image_element(id: impl Into<ElementId>, position: Pos2, image_url: Option<String>) -> Element {
        let source = image_url.map(ImageSource::new).unwrap_or_default();
        Element::new(id, position, IMAGE_SIZE, ElementKind::Image(source))
    }

    /// Create a new shape element (100×100)
    pub fn create_shape_element(id: impl Into<ElementId>, position: Pos2, shape: Option<ShapeKind>) -> Element {
        let style = ShapeStyle::of_kind(shape.unwrap_or_default());
        Element::new(id, position, SHAPE_SIZE, ElementKind::Shape(style))
    }

    /// Create an element from library seed data
    pub fn create_from_seed(id: impl Into<ElementId>, position: Pos2, seed: &ElementSeed) -> Element {
        match seed {
            ElementSeed::Text { content } => create_text_element(id, position, content.clone()),
            ElementSeed::Image { image_url } => create_image_element(id, position, image_url.clone()),
            ElementSeed::Shape { shape } => create_shape_element(id, position, *shape),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::factory::*;
    use super::*;

    #[test]
    fn rotation_is_normalized_on_write() {
        let mut element = create_shape_element("s", Pos2::ZERO, None);
        element.set_rotation(-15.0);
        assert!((element.rotation() - 345.0).abs() < 1e-4);
        element.apply_patch(&ElementPatch::rotation(725.0));
        assert!((element.rotation() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn mismatched_style_patch_is_ignored() {
        let mut element = create_image_element("img", Pos2::ZERO, Some("a.png".to_owned()));
        let before = element.clone();
        element.apply_patch(&ElementPatch::text(TextPatch::content("nope")));
        assert_eq!(element, before);
    }

    #[test]
    fn toggled_opacity_alternates() {
        let mut element = create_text_element("t", Pos2::ZERO, None);
        assert_eq!(element.toggled_opacity(), DIMMED_OPACITY);
        element.set_opacity(DIMMED_OPACITY);
        assert_eq!(element.toggled_opacity(), DEFAULT_OPACITY);
        element.set_opacity(0.2);
        assert_eq!(element.toggled_opacity(), DEFAULT_OPACITY);
    }

    #[test]
    fn element_json_is_flat_and_tagged() {
        let element = create_text_element("text-1", Pos2::new(5.0, 6.0), Some("Hi".to_owned()));
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["content"], "Hi");
        assert_eq!(json["zIndex"], 1);
        assert_eq!(json["position"]["x"], 5.0);

        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, element);
    }
}
