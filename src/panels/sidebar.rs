//! Element library: ready-made elements inserted at the centre of the visible canvas.

use egui::{Pos2, Ui, Vec2};

use crate::command::Command;
use crate::element::factory::{create_from_seed, ElementSeed};
use crate::element::{Element, ElementPatch, FontWeight, ShapeKind, ShapePatch, Size, TextAlign, TextPatch};
use crate::id_generator::generate_id;

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryPreset {
    pub label: &'static str,
    pub icon: &'static str,
    pub seed: ElementSeed,
    /// Overrides applied on top of the factory defaults
    pub overrides: Option<ElementPatch>,
}

impl LibraryPreset {
    fn new(label: &'static str, icon: &'static str, seed: ElementSeed) -> Self {
        Self {
            label,
            icon,
            seed,
            overrides: None,
        }
    }

    fn with_overrides(mut self, patch: ElementPatch) -> Self {
        self.overrides = Some(patch);
        self
    }

    /// Build the element so that its centre lands on `center`
    pub fn instantiate(&self, center: Pos2) -> Element {
        let prefix = match &self.seed {
            ElementSeed::Text { .. } => "text",
            ElementSeed::Image { .. } => "image",
            ElementSeed::Shape { .. } => "shape",
        };
        let mut element = create_from_seed(generate_id(prefix), Pos2::ZERO, &self.seed);
        if let Some(patch) = &self.overrides {
            element.apply_patch(patch);
        }
        element.position = center - element.size.to_vec2() / 2.0;
        element
    }
}

fn text(content: &str) -> ElementSeed {
    ElementSeed::Text {
        content: Some(content.to_owned()),
    }
}

fn shape(kind: ShapeKind) -> ElementSeed {
    ElementSeed::Shape { shape: Some(kind) }
}

pub fn library_presets() -> Vec<LibraryPreset> {
    let heading = ElementPatch {
        size: Some(Size::new(400.0, 70.0)),
        ..ElementPatch::text(TextPatch {
            font_size: Some(44.0),
            font_weight: Some(FontWeight::Bold),
            text_align: Some(TextAlign::Center),
            ..TextPatch::default()
        })
    };
    let subheading = ElementPatch {
        size: Some(Size::new(320.0, 50.0)),
        ..ElementPatch::text(TextPatch {
            font_size: Some(28.0),
            text_align: Some(TextAlign::Center),
            ..TextPatch::default()
        })
    };
    let body = ElementPatch {
        size: Some(Size::new(300.0, 80.0)),
        ..ElementPatch::text(TextPatch {
            font_size: Some(16.0),
            ..TextPatch::default()
        })
    };
    let divider = ElementPatch {
        size: Some(Size::new(300.0, 20.0)),
        ..ElementPatch::shape(ShapePatch {
            border_width: Some(2.0),
            ..ShapePatch::default()
        })
    };
    let rounded = ElementPatch {
        size: Some(Size::new(160.0, 100.0)),
        ..ElementPatch::shape(ShapePatch {
            border_radius: Some(16.0),
            ..ShapePatch::default()
        })
    };

    vec![
        LibraryPreset::new("Heading", "H", text("Your event title")).with_overrides(heading),
        LibraryPreset::new("Subheading", "h", text("Date and venue")).with_overrides(subheading),
        LibraryPreset::new("Body text", "¶", text("Add details for your guests here.")).with_overrides(body),
        LibraryPreset::new("Image", "🖼", ElementSeed::Image { image_url: None }),
        LibraryPreset::new("Rectangle", "⬛", shape(ShapeKind::Rectangle)),
        LibraryPreset::new("Rounded box", "▢", shape(ShapeKind::Rectangle)).with_overrides(rounded),
        LibraryPreset::new("Circle", "⚫", shape(ShapeKind::Ellipse)),
        LibraryPreset::new("Triangle", "▲", shape(ShapeKind::Triangle)),
        LibraryPreset::new("Star", "★", shape(ShapeKind::Star)),
        LibraryPreset::new("Heart", "♥", shape(ShapeKind::Heart)),
        LibraryPreset::new("Hexagon", "⬢", shape(ShapeKind::Hexagon)),
        LibraryPreset::new("Divider line", "➖", shape(ShapeKind::Line)).with_overrides(divider),
    ]
}

pub fn sidebar(ui: &mut Ui, center: Pos2, enabled: bool) -> Vec<Command> {
    let mut commands = Vec::new();
    ui.heading("Elements");
    ui.separator();

    ui.add_enabled_ui(enabled, |ui| {
        egui::ScrollArea::vertical().id_salt("library_scroll").show(ui, |ui| {
            for preset in library_presets() {
                let button = egui::Button::new(format!("{}  {}", preset.icon, preset.label))
                    .min_size(Vec2::new(ui.available_width(), 28.0));
                if ui.add(button).clicked() {
                    let element = preset.instantiate(center);
                    log::info!("Inserting library preset {} as {}", preset.label, element.id());
                    commands.push(Command::AddElement(element));
                }
            }
        });
    });
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn preset_is_centred_on_the_requested_point() {
        let presets = library_presets();
        let heading = presets.iter().find(|p| p.label == "Heading").expect("heading preset");
        let element = heading.instantiate(Pos2::new(400.0, 300.0));
        assert_eq!(element.size, Size::new(400.0, 70.0));
        assert_eq!(element.position, Pos2::new(200.0, 265.0));
        assert_eq!(element.center(), Pos2::new(400.0, 300.0));
        let ElementKind::Text(style) = &element.kind else {
            panic!("heading should be a text element");
        };
        assert!(style.is_bold());
    }

    #[test]
    fn presets_get_fresh_ids() {
        let preset = &library_presets()[0];
        let a = preset.instantiate(Pos2::ZERO);
        let b = preset.instantiate(Pos2::ZERO);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn library_covers_every_variant() {
        let presets = library_presets();
        assert!(presets.iter().any(|p| matches!(p.seed, ElementSeed::Text { .. })));
        assert!(presets.iter().any(|p| matches!(p.seed, ElementSeed::Image { .. })));
        assert!(presets.iter().any(|p| matches!(p.seed, ElementSeed::Shape { shape: Some(ShapeKind::Heart) })));
    }
}
