use egui::{RichText, Ui};
use egui_phosphor::regular as icons;

use super::panel_trait::{Panel, PanelData, PanelState};
use crate::data::assets::{find_asset_files, CsvKind};
use crate::data::axis::FeatureRole;

const NO_TARGET_LABEL: &str = "-- Select target --";

/// Asset folder selection plus role and target choice per column.
#[derive(Debug, Clone)]
pub struct ColumnsPanel {
    state: PanelState,
}

impl Default for ColumnsPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Data", icons::DATABASE),
        }
    }
}

impl Panel for ColumnsPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, data: &mut PanelData<'_>) {
        self.render_asset_row(ui, data);
        ui.separator();

        if !data.state.axis().has_headers() {
            ui.label(
                RichText::new(
                    "No CSV files loaded. Choose an asset folder containing Feature.csv and Target.csv.",
                )
                .weak(),
            );
            return;
        }

        ui.strong("Feature parameters");
        self.render_features(ui, data);
        ui.add_space(6.0);
        ui.strong("Target parameter");
        self.render_target(ui, data);
    }
}

impl ColumnsPanel {
    fn render_asset_row(&mut self, ui: &mut Ui, data: &mut PanelData<'_>) {
        ui.horizontal(|ui| {
            if ui
                .button(format!("{} Asset folder", icons::FOLDER_OPEN))
                .on_hover_text("Choose a folder containing Feature.csv and Target.csv")
                .clicked()
            {
                if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                    let requests = match find_asset_files(&folder) {
                        Ok(files) => data.state.select_asset_folder(files),
                        Err(err) => data.state.asset_folder_failed(&err),
                    };
                    data.issue(requests);
                }
            }
            match data.state.asset_folder() {
                Some(name) => {
                    ui.label(RichText::new(name).monospace());
                }
                None => {
                    ui.label(RichText::new("none").weak());
                }
            }
            if data.state.asset_folder().is_some()
                && ui
                    .small_button(icons::X)
                    .on_hover_text("Forget the asset folder")
                    .clicked()
            {
                let requests = data.state.clear_assets();
                data.issue(requests);
            }
        });

        ui.horizontal(|ui| {
            for kind in [CsvKind::Feature, CsvKind::Target] {
                let label = match kind {
                    CsvKind::Feature => "Feature CSV",
                    CsvKind::Target => "Target CSV",
                };
                if ui
                    .small_button(format!("{} {label}", icons::FILE_CSV))
                    .on_hover_text("Upload a single CSV file for this side")
                    .clicked()
                {
                    let picked = rfd::FileDialog::new()
                        .add_filter("CSV", &["csv"])
                        .pick_file();
                    if let Some(path) = picked {
                        let requests = data.state.upload_csv(kind, path);
                        data.issue(requests);
                    }
                }
            }
            if ui
                .small_button(format!("{} Resync", icons::ARROWS_CLOCKWISE))
                .on_hover_text("Reload the column lists from the backend")
                .clicked()
            {
                let requests = data.state.resync_headers();
                data.issue(requests);
            }
        });
    }

    fn render_features(&mut self, ui: &mut Ui, data: &mut PanelData<'_>) {
        let features = data.state.axis().features().to_vec();
        let mut requests = Vec::new();
        egui::Grid::new("feature_params_grid")
            .num_columns(3)
            .striped(true)
            .show(ui, |ui| {
                for (index, feature) in features.iter().enumerate() {
                    ui.label(format!("{} \"{}\"", index + 1, feature.name));

                    let mut role = feature.role;
                    egui::ComboBox::from_id_salt(("feature_role", &feature.name))
                        .selected_text(role.label())
                        .show_ui(ui, |ui| {
                            for r in FeatureRole::ALL {
                                ui.selectable_value(&mut role, r, r.label());
                            }
                        });
                    if role != feature.role {
                        requests.extend(data.state.set_role(&feature.name, role));
                    }

                    let mut constant = feature.constant.clone();
                    let mut edit = egui::TextEdit::singleline(&mut constant)
                        .desired_width(80.0)
                        .hint_text("Value (if Constant)");
                    if !feature.constant_is_numeric() {
                        edit = edit.text_color(ui.visuals().error_fg_color);
                    }
                    let resp = ui
                        .add_enabled(feature.role == FeatureRole::Constant, edit)
                        .on_disabled_hover_text("Used only while the column is Constant");
                    if resp.changed() {
                        requests.extend(data.state.set_constant(&feature.name, constant));
                    }
                    ui.end_row();
                }
            });
        data.issue(requests);
    }

    fn render_target(&mut self, ui: &mut Ui, data: &mut PanelData<'_>) {
        let choices: Vec<String> = data.state.axis().target_choices().cloned().collect();
        let current = data.state.axis().target().map(str::to_string);
        let mut selected = current.clone();
        egui::ComboBox::from_id_salt("target_param")
            .selected_text(selected.as_deref().unwrap_or(NO_TARGET_LABEL))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut selected, None, NO_TARGET_LABEL);
                for c in &choices {
                    ui.selectable_value(&mut selected, Some(c.clone()), c.as_str());
                }
            });
        if selected != current {
            let requests = data.state.set_target(selected);
            data.issue(requests);
        }
    }
}
