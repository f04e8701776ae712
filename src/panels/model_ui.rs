use egui::{RichText, Ui};
use egui_phosphor::regular as icons;

use super::panel_trait::{Panel, PanelData, PanelState};

/// Loading and deleting saved model files.
#[derive(Debug, Clone)]
pub struct ModelFilePanel {
    state: PanelState,
}

impl Default for ModelFilePanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Model file", icons::FOLDER),
        }
    }
}

impl Panel for ModelFilePanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, data: &mut PanelData<'_>) {
        let enabled = data.state.model_actions_enabled();
        ui.add_enabled_ui(enabled, |ui| {
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut data.state.model_file_input)
                        .hint_text("model file name")
                        .desired_width(180.0),
                );
                if ui
                    .button(icons::FOLDER_OPEN)
                    .on_hover_text("Pick a saved model file")
                    .clicked()
                {
                    let picked = rfd::FileDialog::new()
                        .add_filter("Model", &["json"])
                        .pick_file();
                    if let Some(name) = picked
                        .as_deref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().into_owned())
                    {
                        let requests = data.state.load_model(&name);
                        data.issue(requests);
                    }
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Load").clicked() {
                    let name = data.state.model_file_input.clone();
                    let requests = data.state.load_model(&name);
                    data.issue(requests);
                }
                let can_delete = !data.state.model_file_input.trim().is_empty();
                if ui
                    .add_enabled(can_delete, egui::Button::new(format!("{} Delete", icons::TRASH)))
                    .clicked()
                {
                    let name = data.state.model_file_input.clone();
                    data.state.request_delete(&name);
                }
            });
        })
        .response
        .on_disabled_hover_text("Load an asset folder first");

        ui.add_space(4.0);
        let session = data.state.session();
        let status = match (session.is_loaded(), session.base_file()) {
            (true, Some(file)) => format!("{} Loaded: {file}", icons::CHECK_CIRCLE),
            (true, None) => format!("{} Settings applied", icons::CHECK_CIRCLE),
            (false, _) => format!("{} No model loaded", icons::CIRCLE_DASHED),
        };
        ui.label(RichText::new(status).weak());

        ui.separator();
        if ui
            .button(format!("{} Run calculation demo", icons::LIGHTNING))
            .on_hover_text("Ask the backend to run its demo calculation")
            .clicked()
        {
            let requests = data.state.run_calculation_demo();
            data.issue(requests);
        }
    }
}
