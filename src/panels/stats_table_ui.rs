use eframe::egui;
use egui::{Color32, Ui};
use egui_phosphor::regular as icons;
use egui_table::{HeaderRow as EgHeaderRow, Table, TableDelegate};

use super::panel_trait::{Panel, PanelData, PanelState};
use crate::panel::TopicRow;

const HEADERS: [&str; 4] = ["Topic", "Datatype", "Received msgs", "Preloaded"];
const COL_W: [f32; 4] = [260.0, 220.0, 120.0, 100.0];
const ROW_H: f32 = 22.0;
const HEADER_H: f32 = 24.0;

pub struct StatsTablePanel {
    pub state: PanelState,
}

impl Default for StatsTablePanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Statistics", icons::TABLE),
        }
    }
}

struct StatsDelegate<'a> {
    rows: &'a [TopicRow],
    muted: Color32,
}

impl<'a> TableDelegate for StatsDelegate<'a> {
    fn header_cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::HeaderCellInfo) {
        let col = cell.col_range.start;
        let text = HEADERS.get(col).copied().unwrap_or_default();
        // Counts are right-aligned like their header.
        if col == 2 {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(4.0);
                ui.strong(text);
            });
        } else {
            ui.add_space(4.0);
            ui.strong(text);
        }
    }

    fn cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::CellInfo) {
        let Some(row) = self.rows.get(cell.row_nr as usize) else {
            return;
        };
        match cell.col_nr {
            0 => {
                ui.add_space(4.0);
                ui.label(&row.topic);
            }
            1 => {
                ui.add_space(4.0);
                if row.schema_name.is_some() {
                    ui.label(row.schema_label());
                } else {
                    ui.colored_label(self.muted, row.schema_label());
                }
            }
            2 => {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(4.0);
                    ui.monospace(row.received.to_string());
                });
            }
            3 => {
                ui.add_space(4.0);
                ui.monospace(row.preloaded.to_string());
            }
            _ => {}
        }
    }
}

impl Panel for StatsTablePanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, data: &mut PanelData<'_>) {
        let caption_h = 32.0;
        let table_h = (ui.available_height() - caption_h).max(HEADER_H + ROW_H);

        egui::ScrollArea::horizontal()
            .auto_shrink([false, true])
            .max_height(table_h)
            .show(ui, |ui| {
                let mut delegate = StatsDelegate {
                    rows: data.rows,
                    muted: data.color_scheme.muted_text(),
                };
                let cols = COL_W.iter().map(|w| egui_table::Column::new(*w)).collect::<Vec<_>>();
                let avail_w = ui.available_width().max(COL_W.iter().sum::<f32>());
                let (rect, _resp) =
                    ui.allocate_exact_size(egui::vec2(avail_w, table_h), egui::Sense::hover());
                let mut table_ui = ui.new_child(
                    egui::UiBuilder::new()
                        .max_rect(rect)
                        .layout(egui::Layout::left_to_right(egui::Align::Min)),
                );
                Table::new()
                    .id_salt("subscription_stats_table")
                    .num_rows(delegate.rows.len() as u64)
                    .columns(cols)
                    .headers(vec![EgHeaderRow::new(HEADER_H)])
                    .show(&mut table_ui, &mut delegate);
            });

        ui.separator();
        ui.horizontal(|ui| {
            ui.label(format!("Total msgs received: {}", data.total.message_count));
            if ui
                .small_button(format!("{} Reset stats", icons::ARROW_COUNTER_CLOCKWISE))
                .clicked()
            {
                data.request_reset_stats = true;
            }
            ui.weak(format!(
                "counting since {}",
                data.live_since.format("%H:%M:%S")
            ));
        });
    }
}
