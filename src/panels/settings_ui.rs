//! Settings editor: renders the declared [`SettingsTree`] and turns clicks
//! into [`SettingsAction`]s.
//!
//! The editor knows nothing about subscriptions; edit paths are built from
//! the node and field keys of the tree it is given.

use eframe::egui;
use egui::Ui;
use egui_phosphor::regular as icons;

use super::panel_trait::{Panel, PanelData, PanelState};
use crate::data::settings_tree::{
    ExpansionState, FieldInput, SettingsAction, SettingsTree, SettingsTreeNode,
};

pub struct SettingsPanel {
    pub state: PanelState,
    /// Case-insensitive label filter.
    pub filter: String,
    /// Hide children whose visibility toggle is off.
    pub only_visible: bool,
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Settings", icons::GEAR),
            filter: String::new(),
            only_visible: false,
        }
    }
}

impl SettingsPanel {
    /// Whether `node` passes the name filter and, if enabled on the parent,
    /// the visibility filter.
    pub fn shows(&self, node: &SettingsTreeNode, key: &str, visibility_filter: bool) -> bool {
        if visibility_filter && self.only_visible && node.visible == Some(false) {
            return false;
        }
        if self.filter.is_empty() {
            return true;
        }
        let label = node.label.as_deref().unwrap_or(key);
        label.to_lowercase().contains(&self.filter.to_lowercase())
    }

    fn render_tree(&mut self, ui: &mut Ui, tree: &SettingsTree, actions: &mut Vec<SettingsAction>) {
        if tree.enable_filter {
            ui.horizontal(|ui| {
                ui.label(icons::MAGNIFYING_GLASS);
                ui.add(egui::TextEdit::singleline(&mut self.filter).hint_text("Filter topics"));
            });
            ui.separator();
        }

        for (key, node) in &tree.nodes {
            egui::CollapsingHeader::new(node.label.as_deref().unwrap_or(key))
                .id_salt(("settings_node", key))
                .default_open(node.default_expansion_state == ExpansionState::Expanded)
                .show(ui, |ui| {
                    if !node.actions.is_empty() {
                        ui.horizontal_wrapped(|ui| {
                            for action in &node.actions {
                                if ui.button(&action.label).clicked() {
                                    actions.push(SettingsAction::action(&action.id));
                                }
                            }
                        });
                    }
                    if node.enable_visibility_filter {
                        ui.checkbox(&mut self.only_visible, "Show only visible");
                    }
                    ui.separator();

                    let mut shown = 0usize;
                    for (child_key, child) in &node.children {
                        if !self.shows(child, child_key, node.enable_visibility_filter) {
                            continue;
                        }
                        shown += 1;
                        render_child(ui, &[key.as_str(), child_key.as_str()], child, actions);
                    }
                    if shown == 0 {
                        ui.weak("No topics");
                    }
                });
        }
    }
}

fn render_child(ui: &mut Ui, path: &[&str], node: &SettingsTreeNode, actions: &mut Vec<SettingsAction>) {
    let key = path.last().copied().unwrap_or_default();
    ui.horizontal(|ui| {
        if let Some(visible) = node.visible {
            let mut v = visible;
            let icon = if v { icons::EYE } else { icons::EYE_SLASH };
            if ui
                .toggle_value(&mut v, icon)
                .on_hover_text("Subscribe to this topic")
                .changed()
            {
                actions.push(field_update(path, "visible", v));
            }
        }
        egui::CollapsingHeader::new(node.label.as_deref().unwrap_or(key))
            .id_salt(("settings_child", path.join("/")))
            .default_open(node.default_expansion_state == ExpansionState::Expanded)
            .show(ui, |ui| {
                for (field_key, field) in &node.fields {
                    match field.input {
                        FieldInput::Boolean => {
                            let mut v = field.value.unwrap_or(false);
                            if ui.checkbox(&mut v, &field.label).changed() {
                                actions.push(field_update(path, field_key, v));
                            }
                        }
                    }
                }
            });
    });
}

fn field_update(node_path: &[&str], field: &str, value: bool) -> SettingsAction {
    let mut path = node_path.to_vec();
    path.push(field);
    SettingsAction::update(&path, value)
}

impl Panel for SettingsPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, data: &mut PanelData<'_>) {
        let Some(tree) = data.settings_tree else {
            ui.weak("Waiting for the panel to declare its settings");
            return;
        };
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.render_tree(ui, tree, &mut data.actions);
            });
    }
}
