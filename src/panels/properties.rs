//! Properties panel: edits the selected element, or the template when nothing is selected.

use egui::{Color32, DragValue, Response, Slider, Ui};

use crate::command::Command;
use crate::element::{
    Element, ElementKind, ElementPatch, FontStyle, FontWeight, ImagePatch, ShapeKind, ShapePatch, Size,
    TextAlign, TextPatch, MIN_ELEMENT_SIZE,
};
use crate::geometry::rotation::to_signed_degrees;
use crate::template::{Background, ColorStop, Template, TemplateProperty};
use crate::util::color;

/// Patch moving an element `delta` steps in z-order, never below zero
pub fn z_order_patch(element: &Element, delta: i64) -> ElementPatch {
    let z_index = (i64::from(element.z_index) + delta).clamp(0, i64::from(u32::MAX)) as u32;
    ElementPatch::z_index(z_index)
}

/// Commands for a widget edit; drags on the widget are coalesced into one undo step
pub fn patch_commands(response: &Response, id: &str, patch: Option<ElementPatch>) -> Vec<Command> {
    let mut commands = Vec::new();
    if response.drag_started() {
        commands.push(Command::BeginGesture);
    }
    if let Some(patch) = patch {
        commands.push(Command::GestureUpdate {
            id: id.to_owned(),
            patch,
        });
    }
    if response.drag_stopped() {
        commands.push(Command::EndGesture);
    }
    commands
}

/// Same as [`patch_commands`] for template-level properties
fn property_commands(response: &Response, property: Option<TemplateProperty>) -> Vec<Command> {
    let mut commands = Vec::new();
    if response.drag_started() {
        commands.push(Command::BeginGesture);
    }
    if let Some(property) = property {
        commands.push(Command::UpdateTemplateProperty(property));
    }
    if response.drag_stopped() {
        commands.push(Command::EndGesture);
    }
    commands
}

/// An `#rrggbb` string edited through the colour picker
fn color_field(ui: &mut Ui, label: &str, value: &str) -> Option<String> {
    let mut picked = color::parse_or(value, Color32::BLACK);
    let changed = ui
        .horizontal(|ui| {
            ui.label(label);
            let changed = ui.color_edit_button_srgba(&mut picked).changed();
            ui.weak(value);
            changed
        })
        .inner;
    changed.then(|| color::to_hex(picked))
}

pub fn properties_panel(ui: &mut Ui, selected: Option<&Element>, template: Option<&Template>) -> Vec<Command> {
    ui.heading("Properties");
    ui.separator();

    match (selected, template) {
        (Some(element), _) => element_properties(ui, element),
        (None, Some(template)) => template_properties(ui, template),
        (None, None) => {
            ui.weak("No template loaded");
            Vec::new()
        }
    }
}

fn element_properties(ui: &mut Ui, element: &Element) -> Vec<Command> {
    let id = element.id();
    let mut commands = Vec::new();

    ui.label(format!("{} · {}", element.element_type(), id));
    ui.add_space(4.0);

    egui::Grid::new("element_geometry").num_columns(2).spacing([8.0, 4.0]).show(ui, |ui| {
        let mut x = element.position.x;
        ui.label("X");
        let r = ui.add(DragValue::new(&mut x).speed(1.0));
        let patch = r.changed().then(|| ElementPatch::position(egui::pos2(x, element.position.y)));
        commands.extend(patch_commands(&r, id, patch));
        ui.end_row();

        let mut y = element.position.y;
        ui.label("Y");
        let r = ui.add(DragValue::new(&mut y).speed(1.0));
        let patch = r.changed().then(|| ElementPatch::position(egui::pos2(element.position.x, y)));
        commands.extend(patch_commands(&r, id, patch));
        ui.end_row();

        let mut width = element.size.width;
        ui.label("Width");
        let r = ui.add(DragValue::new(&mut width).speed(1.0).range(MIN_ELEMENT_SIZE..=f32::MAX));
        let patch = r
            .changed()
            .then(|| ElementPatch::size(Size::new(width.max(MIN_ELEMENT_SIZE), element.size.height)));
        commands.extend(patch_commands(&r, id, patch));
        ui.end_row();

        let mut height = element.size.height;
        ui.label("Height");
        let r = ui.add(DragValue::new(&mut height).speed(1.0).range(MIN_ELEMENT_SIZE..=f32::MAX));
        let patch = r
            .changed()
            .then(|| ElementPatch::size(Size::new(element.size.width, height.max(MIN_ELEMENT_SIZE))));
        commands.extend(patch_commands(&r, id, patch));
        ui.end_row();

        let mut rotation = to_signed_degrees(element.rotation());
        ui.label("Rotation");
        let r = ui.add(Slider::new(&mut rotation, -180.0..=180.0).suffix("°"));
        let patch = r.changed().then(|| ElementPatch::rotation(rotation));
        commands.extend(patch_commands(&r, id, patch));
        ui.end_row();

        let mut opacity = element.opacity();
        ui.label("Opacity");
        let r = ui.add(Slider::new(&mut opacity, 0.0..=1.0));
        let patch = r.changed().then(|| ElementPatch::opacity(opacity));
        commands.extend(patch_commands(&r, id, patch));
        ui.end_row();

        ui.label("Layer");
        ui.horizontal(|ui| {
            if ui.button("⬇").on_hover_text("Send backward").clicked() {
                commands.push(Command::UpdateElement {
                    id: id.to_owned(),
                    patch: z_order_patch(element, -1),
                });
            }
            ui.label(element.z_index.to_string());
            if ui.button("⬆").on_hover_text("Bring forward").clicked() {
                commands.push(Command::UpdateElement {
                    id: id.to_owned(),
                    patch: z_order_patch(element, 1),
                });
            }
        });
        ui.end_row();
    });

    ui.separator();
    let style_patch = match &element.kind {
        ElementKind::Text(text) => text_fields(ui, text).map(ElementPatch::text),
        ElementKind::Image(source) => image_fields(ui, &source.image_url).map(ElementPatch::image),
        ElementKind::Shape(style) => shape_fields(ui, style).map(ElementPatch::shape),
    };
    if let Some(patch) = style_patch {
        commands.push(Command::UpdateElement {
            id: id.to_owned(),
            patch,
        });
    }

    ui.separator();
    ui.horizontal(|ui| {
        if ui.button("⧉ Duplicate").clicked() {
            commands.push(Command::DuplicateElement(id.to_owned()));
        }
        if ui.button("🗑 Delete").clicked() {
            commands.push(Command::RemoveElement(id.to_owned()));
        }
    });

    commands
}

fn text_fields(ui: &mut Ui, text: &crate::element::TextStyle) -> Option<TextPatch> {
    let mut patch = TextPatch::default();
    let mut changed = false;

    ui.label("Content");
    let mut content = text.content.clone();
    if ui.text_edit_multiline(&mut content).changed() {
        patch.content = Some(content);
        changed = true;
    }

    ui.horizontal(|ui| {
        ui.label("Font");
        let mut family = text.font_family.clone();
        if ui.text_edit_singleline(&mut family).changed() {
            patch.font_family = Some(family);
            changed = true;
        }
    });

    ui.horizontal(|ui| {
        ui.label("Size");
        let mut size = text.font_size;
        if ui.add(DragValue::new(&mut size).range(1.0..=400.0)).changed() {
            patch.font_size = Some(size);
            changed = true;
        }
    });

    ui.horizontal(|ui| {
        let mut bold = text.is_bold();
        if ui.toggle_value(&mut bold, "B").changed() {
            patch.font_weight = Some(if bold { FontWeight::Bold } else { FontWeight::Normal });
            changed = true;
        }
        let mut italic = text.is_italic();
        if ui.toggle_value(&mut italic, "I").changed() {
            patch.font_style = Some(if italic { FontStyle::Italic } else { FontStyle::Normal });
            changed = true;
        }
        ui.separator();
        for align in TextAlign::ALL {
            if ui.selectable_label(text.text_align == align, align.label()).clicked() && text.text_align != align {
                patch.text_align = Some(align);
                changed = true;
            }
        }
    });

    if let Some(color) = color_field(ui, "Color", &text.color) {
        patch.color = Some(color);
        changed = true;
    }

    changed.then_some(patch)
}

fn image_fields(ui: &mut Ui, image_url: &str) -> Option<ImagePatch> {
    ui.label("Image URL");
    let mut url = if image_url.starts_with("data:") {
        String::new()
    } else {
        image_url.to_owned()
    };
    if image_url.starts_with("data:") {
        ui.weak("Embedded image");
    }
    let response = ui.add(egui::TextEdit::singleline(&mut url).hint_text("https://…"));
    (response.lost_focus() && !url.is_empty() && url != image_url).then(|| ImagePatch { image_url: Some(url) })
}

fn shape_fields(ui: &mut Ui, style: &crate::element::ShapeStyle) -> Option<ShapePatch> {
    let mut patch = ShapePatch::default();
    let mut changed = false;

    egui::ComboBox::from_label("Shape")
        .selected_text(style.shape.label())
        .show_ui(ui, |ui| {
            for kind in ShapeKind::ALL {
                if ui.selectable_label(style.shape == kind, format!("{} {}", kind.icon(), kind.label())).clicked()
                    && style.shape != kind
                {
                    patch.shape = Some(kind);
                    changed = true;
                }
            }
        });

    if let Some(color) = color_field(ui, "Fill", &style.background_color) {
        patch.background_color = Some(color);
        changed = true;
    }
    if let Some(color) = color_field(ui, "Border", &style.border_color) {
        patch.border_color = Some(color);
        changed = true;
    }

    ui.horizontal(|ui| {
        ui.label("Border width");
        let mut width = style.border_width;
        if ui.add(DragValue::new(&mut width).range(0.0..=50.0)).changed() {
            patch.border_width = Some(width);
            changed = true;
        }
    });
    if style.shape == ShapeKind::Rectangle {
        ui.horizontal(|ui| {
            ui.label("Corner radius");
            let mut radius = style.border_radius;
            if ui.add(DragValue::new(&mut radius).range(0.0..=500.0)).changed() {
                patch.border_radius = Some(radius);
                changed = true;
            }
        });
    }

    changed.then_some(patch)
}

fn template_properties(ui: &mut Ui, template: &Template) -> Vec<Command> {
    let mut commands = Vec::new();
    ui.label("Template");
    ui.add_space(4.0);

    egui::Grid::new("template_fields").num_columns(2).spacing([8.0, 4.0]).show(ui, |ui| {
        ui.label("Name");
        let mut name = template.name.clone();
        if ui.text_edit_singleline(&mut name).changed() {
            commands.push(Command::UpdateTemplateProperty(TemplateProperty::Name(name)));
        }
        ui.end_row();

        ui.label("Category");
        let mut category = template.category.clone();
        if ui.text_edit_singleline(&mut category).changed() {
            commands.push(Command::UpdateTemplateProperty(TemplateProperty::Category(category)));
        }
        ui.end_row();

        ui.label("Tags");
        let mut tags = template.tags.join(", ");
        let r = ui.text_edit_singleline(&mut tags);
        if r.lost_focus() && tags != template.tags.join(", ") {
            let parsed = tags
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_owned)
                .collect();
            commands.push(Command::UpdateTemplateProperty(TemplateProperty::Tags(parsed)));
        }
        ui.end_row();

        ui.label("Width");
        let mut width = template.layout.width;
        let r = ui.add(DragValue::new(&mut width).range(1.0..=10_000.0));
        commands.extend(property_commands(&r, r.changed().then_some(TemplateProperty::Width(width))));
        ui.end_row();

        ui.label("Height");
        let mut height = template.layout.height;
        let r = ui.add(DragValue::new(&mut height).range(1.0..=10_000.0));
        commands.extend(property_commands(&r, r.changed().then_some(TemplateProperty::Height(height))));
        ui.end_row();
    });

    ui.separator();
    if let Some(background) = background_fields(ui, &template.layout.background) {
        commands.push(Command::UpdateTemplateProperty(TemplateProperty::Background(background)));
    }
    commands
}

fn background_fields(ui: &mut Ui, background: &Background) -> Option<Background> {
    let mut replacement = None;

    egui::ComboBox::from_label("Background")
        .selected_text(background.label())
        .show_ui(ui, |ui| {
            let options = [
                Background::default(),
                Background::default_linear(),
                Background::default_radial(),
                Background::Image { url: String::new() },
            ];
            for option in options {
                let current = std::mem::discriminant(background) == std::mem::discriminant(&option);
                if ui.selectable_label(current, option.label()).clicked() && !current {
                    replacement = Some(option);
                }
            }
        });

    match background {
        Background::Solid { color } => {
            if let Some(color) = color_field(ui, "Color", color) {
                replacement = Some(Background::Solid { color });
            }
        }
        Background::LinearGradient { angle, stops } => {
            let mut new_angle = *angle;
            let angle_changed = ui
                .add(Slider::new(&mut new_angle, 0.0..=360.0).text("Angle").suffix("°"))
                .changed();
            let new_stops = stop_fields(ui, stops);
            if angle_changed || new_stops.is_some() {
                replacement = Some(Background::LinearGradient {
                    angle: new_angle,
                    stops: new_stops.unwrap_or_else(|| stops.clone()),
                });
            }
        }
        Background::RadialGradient { stops } => {
            if let Some(stops) = stop_fields(ui, stops) {
                replacement = Some(Background::RadialGradient { stops });
            }
        }
        Background::Image { url } => {
            let mut edited = url.clone();
            let r = ui.add(egui::TextEdit::singleline(&mut edited).hint_text("Image URL or data URI"));
            if r.lost_focus() && &edited != url {
                replacement = Some(Background::Image { url: edited });
            }
        }
    }
    replacement
}

fn stop_fields(ui: &mut Ui, stops: &[ColorStop]) -> Option<Vec<ColorStop>> {
    let mut edited = stops.to_vec();
    let mut changed = false;
    for (i, stop) in edited.iter_mut().enumerate() {
        ui.horizontal(|ui| {
            if let Some(color) = color_field(ui, &format!("Stop {}", i + 1), &stop.color) {
                stop.color = color;
                changed = true;
            }
            changed |= ui.add(Slider::new(&mut stop.offset, 0.0..=1.0)).changed();
        });
    }
    changed.then_some(edited)
}
