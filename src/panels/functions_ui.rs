use egui::{RichText, Ui};
use egui_phosphor::regular as icons;
use egui_table::{HeaderRow as EgHeaderRow, Table, TableDelegate};

use super::panel_trait::{Panel, PanelData, PanelState};
use crate::data::functions::{FitFunction, FunctionField};
use crate::data::model::FittingMethod;
use crate::data::state::AppState;

const NO_FUNCTION_LABEL: &str = "-- Select function --";

/// Fit function table, the feature/target assignment matrix and the save action.
#[derive(Debug, Clone)]
pub struct FunctionsPanel {
    state: PanelState,
}

impl Default for FunctionsPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Model", icons::GEAR),
        }
    }
}

impl Panel for FunctionsPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, data: &mut PanelData<'_>) {
        ui.horizontal(|ui| {
            ui.label("Model name:");
            ui.text_edit_singleline(&mut data.state.model_name);
        });
        render_fitting_method(ui, data.state);
        ui.separator();

        ui.horizontal(|ui| {
            ui.strong("Functions");
            if ui
                .small_button(icons::PLUS)
                .on_hover_text("Add a function row")
                .clicked()
            {
                data.state.add_function();
            }
            if ui
                .add_enabled(
                    !data.state.functions().is_empty(),
                    egui::Button::new(icons::MINUS).small(),
                )
                .on_hover_text("Delete the last function row")
                .clicked()
            {
                data.state.remove_last_function();
            }
        });
        render_function_table(ui, data.state);

        ui.separator();
        ui.strong("Fitting");
        render_fitting_table(ui, data.state);

        ui.separator();
        ui.horizontal(|ui| {
            let save = ui
                .add_enabled(
                    data.state.save_enabled(),
                    egui::Button::new(format!("{} Save settings", icons::FLOPPY_DISK)),
                )
                .on_disabled_hover_text("Load an asset folder first");
            if save.clicked() {
                let requests = data.state.save_model();
                data.issue(requests);
            }
            if ui
                .button(format!("{} Reset", icons::ARROWS_CLOCKWISE))
                .on_hover_text("Restore the example functions and clear the loaded model")
                .clicked()
            {
                let requests = data.state.reset_model();
                data.issue(requests);
            }
        });
    }
}

fn render_fitting_method(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label("Fitting method:");
        let mut method = state.fitting_method();
        for m in [FittingMethod::LinearCombination, FittingMethod::Product] {
            ui.selectable_value(&mut method, m, m.display_name())
                .on_hover_text(m.wire_label());
        }
        if method != state.fitting_method() {
            state.set_fitting_method(method);
        }
    });
}

// ── Function table ───────────────────────────────────────────────────────────

struct FunctionsDelegate<'a> {
    rows: &'a [FitFunction],
    edits: Vec<(usize, FunctionField, String)>,
}

impl FunctionsDelegate<'_> {
    const FIELDS: [FunctionField; 3] = [
        FunctionField::Name,
        FunctionField::Equation,
        FunctionField::Parameters,
    ];
}

impl TableDelegate for FunctionsDelegate<'_> {
    fn header_cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::HeaderCellInfo) {
        let text = match cell.col_range.start {
            0 => "#",
            1 => "Name",
            2 => "Equation",
            3 => "Parameters",
            _ => "",
        };
        ui.add_space(4.0);
        ui.strong(text);
    }

    fn cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::CellInfo) {
        let row = cell.row_nr as usize;
        let Some(func) = self.rows.get(row) else {
            return;
        };
        ui.add_space(4.0);
        if cell.col_nr == 0 {
            ui.label((row + 1).to_string());
            return;
        }
        let Some(field) = Self::FIELDS.get(cell.col_nr - 1).copied() else {
            return;
        };
        let hint = match field {
            FunctionField::Name => "letters, digits, _ (no leading digit)",
            FunctionField::Equation => "A * exp(-x/tau) + C",
            FunctionField::Parameters => "A=1.0, tau=100.0, C=0.5",
        };
        let mut text = func.field(field).to_string();
        let resp = ui.add(
            egui::TextEdit::singleline(&mut text)
                .hint_text(hint)
                .desired_width(f32::INFINITY),
        );
        if resp.changed() {
            self.edits.push((row, field, text));
        }
    }
}

fn render_function_table(ui: &mut Ui, state: &mut AppState) {
    let rows = state.functions().functions().to_vec();
    let mut delegate = FunctionsDelegate {
        rows: &rows,
        edits: Vec::new(),
    };
    let height = 28.0 + 24.0 * rows.len().max(1) as f32;
    ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| {
        Table::new()
            .id_salt("function_table")
            .num_rows(rows.len() as u64)
            .columns(vec![
                egui_table::Column::new(32.0),
                egui_table::Column::new(130.0),
                egui_table::Column::new(240.0),
                egui_table::Column::new(220.0),
            ])
            .headers(vec![EgHeaderRow::new(24.0)])
            .show(ui, &mut delegate);
    });
    for (index, field, value) in delegate.edits {
        state.edit_function(index, field, value);
    }
}

// ── Fitting matrix ───────────────────────────────────────────────────────────

struct FittingDelegate<'a> {
    features: &'a [String],
    targets: &'a [String],
    choices: &'a [String],
    state: &'a AppState,
    changes: Vec<(String, String, String)>,
}

impl TableDelegate for FittingDelegate<'_> {
    fn header_cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::HeaderCellInfo) {
        ui.add_space(4.0);
        match cell.col_range.start {
            0 => {
                ui.strong("Feature / Target");
            }
            col => {
                if let Some(t) = self.targets.get(col - 1) {
                    ui.strong(t.as_str());
                }
            }
        }
    }

    fn cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::CellInfo) {
        let Some(feature) = self.features.get(cell.row_nr as usize) else {
            return;
        };
        ui.add_space(4.0);
        if cell.col_nr == 0 {
            ui.label(feature.as_str());
            return;
        }
        let Some(target) = self.targets.get(cell.col_nr - 1) else {
            return;
        };
        let current = self
            .state
            .fitting()
            .get(feature, target)
            .unwrap_or_default()
            .to_string();
        let mut selected = current.clone();
        egui::ComboBox::from_id_salt(("fitting_cell", feature, target))
            .selected_text(if selected.is_empty() {
                NO_FUNCTION_LABEL
            } else {
                selected.as_str()
            })
            .width(ui.available_width() - 8.0)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut selected, String::new(), NO_FUNCTION_LABEL);
                for name in self.choices {
                    ui.selectable_value(&mut selected, name.clone(), name.as_str());
                }
            });
        if selected != current {
            self.changes.push((feature.clone(), target.clone(), selected));
        }
    }
}

fn render_fitting_table(ui: &mut Ui, state: &mut AppState) {
    if !state.axis().has_headers() {
        ui.label(RichText::new("No CSV files loaded. Upload the Feature and Target files.").weak());
        return;
    }
    let features = state.axis().fitting_features();
    let targets = state.axis().fitting_targets();
    let choices = state.functions().names();

    let changes = {
        let mut delegate = FittingDelegate {
            features: &features,
            targets: &targets,
            choices: &choices,
            state,
            changes: Vec::new(),
        };
        let mut columns = vec![egui_table::Column::new(140.0)];
        columns.extend(targets.iter().map(|_| egui_table::Column::new(150.0)));
        let height = 28.0 + 28.0 * features.len().max(1) as f32;
        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| {
            Table::new()
                .id_salt("fitting_table")
                .num_rows(features.len() as u64)
                .columns(columns)
                .headers(vec![EgHeaderRow::new(24.0)])
                .show(ui, &mut delegate);
        });
        delegate.changes
    };
    for (feature, target, function) in changes {
        state.assign_function(&feature, &target, function);
    }
}
