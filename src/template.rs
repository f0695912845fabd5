//! The template document: metadata, canvas layout and the placed elements.

use std::collections::HashSet;

use egui::Vec2;
use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId};
use crate::util::time;

pub const DEFAULT_TEMPLATE_WIDTH: f32 = 800.0;
pub const DEFAULT_TEMPLATE_HEIGHT: f32 = 600.0;
pub const MIN_TEMPLATE_DIMENSION: f32 = 1.0;

/// A colour stop of a gradient; `offset` is in `0..=1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: String,
}

impl ColorStop {
    pub fn new(offset: f32, color: impl Into<String>) -> Self {
        Self {
            offset,
            color: color.into(),
        }
    }
}

/// Canvas background fill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Background {
    Solid {
        color: String,
    },
    /// `angle` in CSS degrees: 0 runs bottom to top, 90 runs left to right
    LinearGradient {
        angle: f32,
        stops: Vec<ColorStop>,
    },
    /// Radiates from the canvas centre out to the farthest corner
    RadialGradient {
        stops: Vec<ColorStop>,
    },
    Image {
        url: String,
    },
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid {
            color: "#ffffff".to_owned(),
        }
    }
}

impl Background {
    pub fn label(&self) -> &'static str {
        match self {
            Background::Solid { .. } => "Solid",
            Background::LinearGradient { .. } => "Linear gradient",
            Background::RadialGradient { .. } => "Radial gradient",
            Background::Image { .. } => "Image",
        }
    }

    pub fn default_linear() -> Self {
        Background::LinearGradient {
            angle: 135.0,
            stops: vec![ColorStop::new(0.0, "#6366f1"), ColorStop::new(1.0, "#ec4899")],
        }
    }

    pub fn default_radial() -> Self {
        Background::RadialGradient {
            stops: vec![ColorStop::new(0.0, "#fef3c7"), ColorStop::new(1.0, "#f59e0b")],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub background: Background,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: DEFAULT_TEMPLATE_WIDTH,
            height: DEFAULT_TEMPLATE_HEIGHT,
            background: Background::default(),
        }
    }
}

impl Layout {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// The document being edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: u64,
    #[serde(default)]
    pub updated_at: u64,
    #[serde(default)]
    pub layout: Layout,
    /// Insertion order. Paint order comes from [`Template::paint_order`].
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// A typed single-key patch onto the template root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "property", content = "value", rename_all = "camelCase")]
pub enum TemplateProperty {
    Name(String),
    Category(String),
    Tags(Vec<String>),
    Width(f32),
    Height(f32),
    Background(Background),
    Layout(Layout),
}

/// Create a blank 800×600 template with a white background
pub fn create_empty_template(id: impl Into<String>, name: impl Into<String>) -> Template {
    let now = time::timestamp_secs();
    Template {
        id: id.into(),
        name: name.into(),
        category: String::new(),
        tags: Vec::new(),
        created_at: now,
        updated_at: now,
        layout: Layout::default(),
        elements: Vec::new(),
    }
}

impl Template {
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|element| element.id() == id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|element| element.id() == id)
    }

    pub fn contains_element(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    /// Remove an element by id, returning it if it was present
    pub fn remove_element(&mut self, id: &str) -> Option<Element> {
        let index = self.elements.iter().position(|element| element.id() == id)?;
        Some(self.elements.remove(index))
    }

    /// Elements sorted by ascending `z_index`; equal z-indices keep insertion order
    pub fn paint_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|element| element.z_index);
        ordered
    }

    pub fn apply_property(&mut self, property: TemplateProperty) {
        match property {
            TemplateProperty::Name(name) => self.name = name,
            TemplateProperty::Category(category) => self.category = category,
            TemplateProperty::Tags(tags) => self.tags = tags,
            TemplateProperty::Width(width) => self.layout.width = width.max(MIN_TEMPLATE_DIMENSION),
            TemplateProperty::Height(height) => self.layout.height = height.max(MIN_TEMPLATE_DIMENSION),
            TemplateProperty::Background(background) => self.layout.background = background,
            TemplateProperty::Layout(layout) => {
                self.layout = Layout {
                    width: layout.width.max(MIN_TEMPLATE_DIMENSION),
                    height: layout.height.max(MIN_TEMPLATE_DIMENSION),
                    background: layout.background,
                };
            }
        }
    }

    /// Ids that appear more than once, in order of their second appearance
    pub fn duplicate_ids(&self) -> Vec<ElementId> {
        let mut seen = HashSet::new();
        self.elements
            .iter()
            .filter(|element| !seen.insert(element.id()))
            .map(|element| element.id().to_owned())
            .collect()
    }

    /// Drop repeated element ids (keeping the first) and re-normalize element values
    pub(crate) fn normalized(mut self) -> Self {
        let mut seen = HashSet::new();
        let elements = std::mem::take(&mut self.elements);
        self.elements = elements
            .into_iter()
            .filter(|element| {
                let fresh = seen.insert(element.id().to_owned());
                if !fresh {
                    log::warn!("Dropping duplicate element id {} in template {}", element.id(), self.id);
                }
                fresh
            })
            .map(Element::normalized)
            .collect();
        self
    }
}
