use serde::{Deserialize, Serialize};

/// Geometric primitive drawn by a shape element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Triangle,
    Star,
    Heart,
    Hexagon,
    Line,
    Polygon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::Rectangle,
        ShapeKind::Ellipse,
        ShapeKind::Triangle,
        ShapeKind::Star,
        ShapeKind::Heart,
        ShapeKind::Hexagon,
        ShapeKind::Line,
        ShapeKind::Polygon,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Star => "Star",
            ShapeKind::Heart => "Heart",
            ShapeKind::Hexagon => "Hexagon",
            ShapeKind::Line => "Line",
            ShapeKind::Polygon => "Polygon",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "▭",
            ShapeKind::Ellipse => "◯",
            ShapeKind::Triangle => "△",
            ShapeKind::Star => "☆",
            ShapeKind::Heart => "♡",
            ShapeKind::Hexagon => "⬡",
            ShapeKind::Line => "―",
            ShapeKind::Polygon => "⬠",
        }
    }
}

/// Fill and border of a shape element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    pub shape: ShapeKind,
    pub background_color: String,
    #[serde(default)]
    pub border_radius: f32,
    #[serde(default)]
    pub border_width: f32,
    #[serde(default = "default_border_color")]
    pub border_color: String,
}

fn default_border_color() -> String {
    "#1e3a8a".to_owned()
}

impl ShapeStyle {
    pub fn of_kind(shape: ShapeKind) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Rectangle,
            background_color: "#3b82f6".to_owned(),
            border_radius: 0.0,
            border_width: 0.0,
            border_color: default_border_color(),
        }
    }
}

/// Sparse update for a shape element's style
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

impl ShapePatch {
    pub(crate) fn apply(&self, style: &mut ShapeStyle) {
        if let Some(shape) = self.shape {
            style.shape = shape;
        }
        if let Some(color) = &self.background_color {
            style.background_color.clone_from(color);
        }
        if let Some(radius) = self.border_radius {
            style.border_radius = radius.max(0.0);
        }
        if let Some(width) = self.border_width {
            style.border_width = width.max(0.0);
        }
        if let Some(color) = &self.border_color {
            style.border_color.clone_from(color);
        }
    }
}
