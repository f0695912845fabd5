//! Painting of the template: background, grid, elements and the selection overlay.

use std::f32::consts::{PI, TAU};

use egui::epaint::{Mesh, TextShape, Vertex};
use egui::text::{LayoutJob, TextFormat};
use egui::{Align2, Color32, Context, FontFamily, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use crate::element::{Element, ElementKind, ImageSource, ShapeKind, ShapeStyle, TextAlign, TextStyle};
use crate::geometry::hit_testing::to_world;
use crate::geometry::viewport::Viewport;
use crate::template::{Background, ColorStop, Template};
use crate::texture_manager::TextureManager;
use crate::util::color;

/// Cells per side of the vertex-coloured mesh used for gradients
const GRADIENT_RESOLUTION: usize = 24;
const ELLIPSE_SEGMENTS: usize = 48;
const CORNER_SEGMENTS: usize = 8;
const BACKGROUND_TEXTURE_ID: &str = "__background";

pub const SELECTION_COLOR: Color32 = Color32::from_rgb(59, 130, 246);
const HOVER_COLOR: Color32 = Color32::from_rgba_premultiplied(59, 130, 246, 120);
const GRID_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 24);
const PLACEHOLDER_FILL: Color32 = Color32::from_gray(226);
const PLACEHOLDER_TEXT: Color32 = Color32::from_gray(120);

/// Gradient stops parsed into colours and sorted by offset, ready for sampling
#[derive(Debug, Clone, PartialEq)]
pub struct GradientStops(Vec<(f32, Color32)>);

impl GradientStops {
    /// Stops need not be sorted; unparsable colours fall back to white
    pub fn new(stops: &[ColorStop]) -> Self {
        let mut sorted: Vec<(f32, Color32)> = stops
            .iter()
            .map(|stop| (stop.offset.clamp(0.0, 1.0), color::parse_or(&stop.color, Color32::WHITE)))
            .collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self(sorted)
    }

    pub fn offsets(&self) -> impl Iterator<Item = f32> + '_ {
        self.0.iter().map(|(offset, _)| *offset)
    }

    /// Colour at `t` in `0..=1`
    pub fn color_at(&self, t: f32) -> Color32 {
        let (Some(first), Some(last)) = (self.0.first(), self.0.last()) else {
            return Color32::WHITE;
        };
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        self.0
            .windows(2)
            .find(|pair| t >= pair[0].0 && t <= pair[1].0)
            .map(|pair| {
                let span = pair[1].0 - pair[0].0;
                let local = if span > 0.0 { (t - pair[0].0) / span } else { 0.0 };
                color::lerp(pair[0].1, pair[1].1, local)
            })
            .unwrap_or(last.1)
    }
}

/// Gradient parameter at `p` inside `rect` for a CSS-style linear gradient of `angle` degrees
pub fn linear_gradient_t(rect: Rect, angle: f32, p: Pos2) -> f32 {
    let radians = angle.to_radians();
    let direction = Vec2::new(radians.sin(), -radians.cos());
    let half_length = (rect.width() * radians.sin().abs() + rect.height() * radians.cos().abs()) / 2.0;
    if half_length <= 0.0 {
        return 0.0;
    }
    (0.5 + (p - rect.center()).dot(direction) / (2.0 * half_length)).clamp(0.0, 1.0)
}

/// Gradient parameter for a radial gradient from the centre to the farthest corner
pub fn radial_gradient_t(rect: Rect, p: Pos2) -> f32 {
    let radius = (rect.max - rect.center()).length();
    if radius <= 0.0 {
        return 0.0;
    }
    ((p - rect.center()).length() / radius).clamp(0.0, 1.0)
}

/// A grid of vertex-coloured quads over `rect`, coloured by `color_at`
fn gradient_mesh(rect: Rect, color_at: impl Fn(Pos2) -> Color32) -> Mesh {
    let n = GRADIENT_RESOLUTION;
    let mut mesh = Mesh::default();
    for row in 0..=n {
        for col in 0..=n {
            let p = Pos2::new(
                rect.min.x + rect.width() * col as f32 / n as f32,
                rect.min.y + rect.height() * row as f32 / n as f32,
            );
            mesh.colored_vertex(p, color_at(p));
        }
    }
    let stride = (n + 1) as u32;
    for row in 0..n as u32 {
        for col in 0..n as u32 {
            let a = row * stride + col;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            mesh.add_triangle(a, b, d);
            mesh.add_triangle(a, d, c);
        }
    }
    mesh
}

/// Paint the template background into its screen rectangle
pub fn paint_background(
    painter: &Painter,
    rect: Rect,
    background: &Background,
    textures: &mut TextureManager,
    ctx: &Context,
) {
    match background {
        Background::Solid { color } => {
            painter.rect_filled(rect, 0.0, color::parse_or(color, Color32::WHITE));
        }
        Background::LinearGradient { angle, stops } => {
            let stops = GradientStops::new(stops);
            let mesh = gradient_mesh(rect, |p| stops.color_at(linear_gradient_t(rect, *angle, p)));
            painter.add(Shape::mesh(mesh));
        }
        Background::RadialGradient { stops } => {
            let stops = GradientStops::new(stops);
            let mesh = gradient_mesh(rect, |p| stops.color_at(radial_gradient_t(rect, p)));
            painter.add(Shape::mesh(mesh));
        }
        Background::Image { url } => {
            painter.rect_filled(rect, 0.0, Color32::WHITE);
            let source = ImageSource::new(url.clone());
            match textures.image_texture(BACKGROUND_TEXTURE_ID, &source, ctx) {
                Some(texture) => {
                    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                    painter.image(texture, rect, uv, Color32::WHITE);
                }
                None => {
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        "Background image unavailable",
                        FontId::proportional(14.0),
                        PLACEHOLDER_TEXT,
                    );
                }
            }
        }
    }
}

/// Paint grid lines every `grid_size` template units across `rect` (screen space)
pub fn paint_grid(painter: &Painter, rect: Rect, grid_size: f32, zoom: f32) {
    let step = grid_size * zoom;
    // too dense to be useful
    if step < 4.0 {
        return;
    }
    let stroke = Stroke::new(1.0, GRID_COLOR);
    let mut x = rect.min.x + step;
    while x < rect.max.x {
        painter.line_segment([Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)], stroke);
        x += step;
    }
    let mut y = rect.min.y + step;
    while y < rect.max.y {
        painter.line_segment([Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)], stroke);
        y += step;
    }
}

/// Outline of a shape inside `rect`, as a closed polygon (two points for a line)
pub fn shape_outline(kind: ShapeKind, rect: Rect, border_radius: f32) -> Vec<Pos2> {
    let center = rect.center();
    let radii = rect.size() / 2.0;
    let on_ellipse = |angle: f32, scale: f32| center + Vec2::new(angle.cos() * radii.x, angle.sin() * radii.y) * scale;
    let regular = |sides: usize| -> Vec<Pos2> {
        (0..sides)
            .map(|i| on_ellipse(-PI / 2.0 + TAU * i as f32 / sides as f32, 1.0))
            .collect()
    };

    match kind {
        ShapeKind::Rectangle => rounded_rect_outline(rect, border_radius),
        ShapeKind::Ellipse => (0..ELLIPSE_SEGMENTS)
            .map(|i| on_ellipse(TAU * i as f32 / ELLIPSE_SEGMENTS as f32, 1.0))
            .collect(),
        ShapeKind::Triangle => vec![rect.center_top(), rect.right_bottom(), rect.left_bottom()],
        ShapeKind::Star => (0..10)
            .map(|i| {
                let scale = if i % 2 == 0 { 1.0 } else { 0.45 };
                on_ellipse(-PI / 2.0 + TAU * i as f32 / 10.0, scale)
            })
            .collect(),
        ShapeKind::Heart => heart_outline(rect),
        ShapeKind::Hexagon => (0..6)
            .map(|i| on_ellipse(TAU * i as f32 / 6.0, 1.0))
            .collect(),
        ShapeKind::Polygon => regular(5),
        ShapeKind::Line => vec![rect.left_center(), rect.right_center()],
    }
}

fn rounded_rect_outline(rect: Rect, radius: f32) -> Vec<Pos2> {
    let radius = radius.clamp(0.0, rect.width().min(rect.height()) / 2.0);
    if radius <= 0.0 {
        return vec![rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()];
    }
    let corners = [
        (Pos2::new(rect.max.x - radius, rect.min.y + radius), -PI / 2.0),
        (Pos2::new(rect.max.x - radius, rect.max.y - radius), 0.0),
        (Pos2::new(rect.min.x + radius, rect.max.y - radius), PI / 2.0),
        (Pos2::new(rect.min.x + radius, rect.min.y + radius), PI),
    ];
    corners
        .iter()
        .flat_map(|&(center, start)| {
            (0..=CORNER_SEGMENTS).map(move |i| {
                let angle = start + (PI / 2.0) * i as f32 / CORNER_SEGMENTS as f32;
                center + Vec2::new(angle.cos(), angle.sin()) * radius
            })
        })
        .collect()
}

/// Classic parametric heart, scaled to fill `rect`
fn heart_outline(rect: Rect) -> Vec<Pos2> {
    let raw: Vec<Vec2> = (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let t = TAU * i as f32 / ELLIPSE_SEGMENTS as f32;
            let x = 16.0 * t.sin().powi(3);
            let y = -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
            Vec2::new(x, y)
        })
        .collect();
    let (min, max) = raw.iter().fold(
        (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
        |(min, max), v| (min.min(*v), max.max(*v)),
    );
    let extent = max - min;
    raw.into_iter()
        .map(|v| {
            let unit = (v - min) / extent;
            rect.min + unit * rect.size()
        })
        .collect()
}

/// Triangle fan from the centroid; correct for any polygon that is star-shaped around it
fn fan_mesh(points: &[Pos2], color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    if points.len() < 3 {
        return mesh;
    }
    let centroid = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2()) / points.len() as f32;
    mesh.colored_vertex(centroid.to_pos2(), color);
    for p in points {
        mesh.colored_vertex(*p, color);
    }
    let n = points.len() as u32;
    for i in 0..n {
        mesh.add_triangle(0, 1 + i, 1 + (i + 1) % n);
    }
    mesh
}

/// Paints elements in paint order, applying rotation, zoom and opacity
pub struct ElementPainter<'a> {
    pub painter: &'a Painter,
    pub viewport: &'a Viewport,
    pub ctx: &'a Context,
}

impl ElementPainter<'_> {
    /// Map an element-local template point to the screen
    fn project(&self, element: &Element, local: Pos2) -> Pos2 {
        self.viewport.to_screen(to_world(element, local))
    }

    pub fn paint_template(&self, template: &Template, textures: &mut TextureManager) {
        for element in template.paint_order() {
            self.paint_element(element, textures);
        }
    }

    pub fn paint_element(&self, element: &Element, textures: &mut TextureManager) {
        match &element.kind {
            ElementKind::Text(text) => self.paint_text(element, text),
            ElementKind::Image(source) => self.paint_image(element, source, textures),
            ElementKind::Shape(style) => self.paint_shape(element, style),
        }
    }

    fn paint_shape(&self, element: &Element, style: &ShapeStyle) {
        let opacity = element.opacity();
        let fill = color::with_opacity(color::parse_or(&style.background_color, Color32::GRAY), opacity);
        let border = color::with_opacity(color::parse_or(&style.border_color, Color32::BLACK), opacity);
        let zoom = self.viewport.zoom;

        let outline: Vec<Pos2> = shape_outline(style.shape, element.rect(), style.border_radius)
            .into_iter()
            .map(|p| self.project(element, p))
            .collect();

        if style.shape == ShapeKind::Line {
            let width = style.border_width.max(2.0) * zoom;
            if let [start, end] = outline[..] {
                self.painter.line_segment([start, end], Stroke::new(width, fill));
            }
            return;
        }

        self.painter.add(Shape::mesh(fan_mesh(&outline, fill)));
        if style.border_width > 0.0 {
            self.painter
                .add(Shape::closed_line(outline, Stroke::new(style.border_width * zoom, border)));
        }
    }

    fn paint_text(&self, element: &Element, text: &TextStyle) {
        let zoom = self.viewport.zoom;
        let color = color::with_opacity(color::parse_or(&text.color, Color32::BLACK), element.opacity());
        let family = match text.font_family.to_lowercase().as_str() {
            "monospace" | "courier" | "courier new" | "jetbrains mono" => FontFamily::Monospace,
            _ => FontFamily::Proportional,
        };

        let mut job = LayoutJob::single_section(
            text.content.clone(),
            TextFormat {
                font_id: FontId::new((text.font_size * zoom).max(1.0), family),
                color,
                italics: text.is_italic(),
                ..TextFormat::default()
            },
        );
        job.wrap.max_width = element.size.width * zoom;
        let galley = self.ctx.fonts(|fonts| fonts.layout_job(job));

        let rect = element.rect();
        let galley_width = galley.size().x / zoom;
        let x = match text.text_align {
            TextAlign::Left => rect.min.x,
            TextAlign::Center => rect.center().x - galley_width / 2.0,
            TextAlign::Right => rect.max.x - galley_width,
        };
        let anchor = self.project(element, Pos2::new(x, rect.min.y));
        let angle = element.rotation().to_radians();

        if text.is_bold() {
            // no bold face in the default fonts: draw twice, slightly offset
            let offset = crate::geometry::rotation::rot2(element.rotation()) * Vec2::new(0.6 * zoom.max(1.0), 0.0);
            self.painter
                .add(TextShape::new(anchor + offset, galley.clone(), color).with_angle(angle));
        }
        self.painter.add(TextShape::new(anchor, galley, color).with_angle(angle));
    }

    fn paint_image(&self, element: &Element, source: &ImageSource, textures: &mut TextureManager) {
        let rect = element.rect();
        let corners = [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()]
            .map(|p| self.project(element, p));
        let tint = color::with_opacity(Color32::WHITE, element.opacity());

        match textures.image_texture(element.id(), source, self.ctx) {
            Some(texture) => {
                let uvs = [Pos2::new(0.0, 0.0), Pos2::new(1.0, 0.0), Pos2::new(1.0, 1.0), Pos2::new(0.0, 1.0)];
                let mut mesh = Mesh::with_texture(texture);
                for (pos, uv) in corners.iter().zip(uvs) {
                    mesh.vertices.push(Vertex { pos: *pos, uv, color: tint });
                }
                mesh.add_triangle(0, 1, 2);
                mesh.add_triangle(0, 2, 3);
                self.painter.add(Shape::mesh(mesh));
            }
            None => {
                let fill = color::with_opacity(PLACEHOLDER_FILL, element.opacity());
                self.painter.add(Shape::mesh(fan_mesh(&corners, fill)));
                let label = if source.is_empty() { "🖼" } else { "🖼 unavailable" };
                self.painter.text(
                    self.viewport.to_screen(element.center()),
                    Align2::CENTER_CENTER,
                    label,
                    FontId::proportional((14.0 * self.viewport.zoom).max(8.0)),
                    PLACEHOLDER_TEXT,
                );
            }
        }
    }

    /// Rotated bounding box of the element on screen
    pub fn outline(&self, element: &Element) -> Vec<Pos2> {
        let rect = element.rect();
        [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()]
            .into_iter()
            .map(|p| self.project(element, p))
            .collect()
    }

    pub fn paint_selection_outline(&self, element: &Element) {
        self.painter
            .add(Shape::closed_line(self.outline(element), Stroke::new(1.5, SELECTION_COLOR)));
    }

    pub fn paint_hover_outline(&self, element: &Element) {
        self.painter
            .add(Shape::closed_line(self.outline(element), Stroke::new(1.0, HOVER_COLOR)));
    }
}
