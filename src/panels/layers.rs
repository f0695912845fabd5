//! Layers panel: every element of the template, topmost first.

use egui::{Color32, RichText, Ui};

use crate::command::Command;
use crate::element::{Element, ElementId, ElementKind, ElementPatch, DEFAULT_OPACITY};
use crate::template::Template;

const CONTENT_PREVIEW_CHARS: usize = 24;

/// One row of the layers list
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRow {
    pub id: ElementId,
    pub label: String,
    pub z_index: u32,
    pub opacity: f32,
}

impl LayerRow {
    fn from_element(element: &Element) -> Self {
        Self {
            id: element.id().to_owned(),
            label: layer_label(element),
            z_index: element.z_index,
            opacity: element.opacity(),
        }
    }

    pub fn is_dimmed(&self) -> bool {
        self.opacity < DEFAULT_OPACITY
    }
}

fn layer_label(element: &Element) -> String {
    match &element.kind {
        ElementKind::Text(text) => {
            let mut preview: String = text.content.chars().take(CONTENT_PREVIEW_CHARS).collect();
            if text.content.chars().count() > CONTENT_PREVIEW_CHARS {
                preview.push('…');
            }
            format!("T  {preview}")
        }
        ElementKind::Image(source) if source.is_empty() => "🖼  Image (empty)".to_owned(),
        ElementKind::Image(_) => "🖼  Image".to_owned(),
        ElementKind::Shape(style) => format!("{}  {}", style.shape.icon(), style.shape.label()),
    }
}

/// Rows sorted by descending z-index; among equal z the later insertion comes first
pub fn layer_rows(template: &Template) -> Vec<LayerRow> {
    template
        .paint_order()
        .into_iter()
        .rev()
        .map(LayerRow::from_element)
        .collect()
}

pub fn layers_panel(ui: &mut Ui, template: &Template, selected: Option<&str>) -> Vec<Command> {
    let mut commands = Vec::new();
    ui.heading("Layers");
    ui.separator();

    let rows = layer_rows(template);
    if rows.is_empty() {
        ui.weak("No elements yet");
        return commands;
    }

    egui::ScrollArea::vertical().id_salt("layers_scroll").show(ui, |ui| {
        for row in rows {
            ui.horizontal(|ui| {
                let is_selected = selected == Some(row.id.as_str());
                let mut text = RichText::new(&row.label);
                if row.is_dimmed() {
                    text = text.color(Color32::GRAY);
                }
                if ui.selectable_label(is_selected, text).clicked() {
                    commands.push(Command::SelectElement(Some(row.id.clone())));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("🗑").on_hover_text("Delete").clicked() {
                        commands.push(Command::RemoveElement(row.id.clone()));
                    }
                    let eye = if row.is_dimmed() { "◌" } else { "👁" };
                    if ui.small_button(eye).on_hover_text("Toggle visibility").clicked() {
                        if let Some(element) = template.element(&row.id) {
                            commands.push(Command::UpdateElement {
                                id: row.id.clone(),
                                patch: ElementPatch::opacity(element.toggled_opacity()),
                            });
                        }
                    }
                    ui.weak(format!("z{}", row.z_index));
                });
            });
        }
    });
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory::{create_shape_element, create_text_element};
    use crate::element::ShapeKind;
    use crate::template::create_empty_template;
    use egui::Pos2;

    #[test]
    fn rows_are_topmost_first() {
        let mut template = create_empty_template("t", "Badge");
        let mut low = create_shape_element("low", Pos2::ZERO, Some(ShapeKind::Star));
        low.z_index = 0;
        let mut high = create_text_element("high", Pos2::ZERO, Some("Welcome".to_owned()));
        high.z_index = 5;
        let first_tie = create_shape_element("tie-a", Pos2::ZERO, None);
        let second_tie = create_shape_element("tie-b", Pos2::ZERO, None);
        template.elements = vec![low, high, first_tie, second_tie];

        let ids: Vec<_> = layer_rows(&template).into_iter().map(|row| row.id).collect();
        assert_eq!(ids, ["high", "tie-b", "tie-a", "low"]);
    }

    #[test]
    fn long_text_is_truncated_in_label() {
        let element = create_text_element("t", Pos2::ZERO, Some("x".repeat(40)));
        let label = layer_label(&element);
        assert!(label.ends_with('…'));
        assert_eq!(label.chars().filter(|c| *c == 'x').count(), CONTENT_PREVIEW_CHARS);
    }
}
