use egui::{Color32, Ui};
use egui_phosphor::regular as icons;

use super::panel_trait::{Panel, PanelData, PanelState};

/// Overlay toggle, finetune, threshold and the finetune progress bar.
#[derive(Debug, Clone)]
pub struct ActionsPanel {
    state: PanelState,
}

impl Default for ActionsPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("View", icons::EYE),
        }
    }
}

impl Panel for ActionsPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, data: &mut PanelData<'_>) {
        let actions = data.state.actions();

        ui.horizontal(|ui| {
            let mut checked = data.state.overlay_checked();
            let resp = ui
                .add_enabled(
                    actions.overlay_enabled,
                    egui::Checkbox::new(&mut checked, "Show overlap"),
                )
                .on_hover_text(data.state.overlay_source().label())
                .on_disabled_hover_text("Load a model and select X, Y and a target first");
            if resp.changed() {
                let requests = data.state.toggle_overlay(checked);
                data.issue(requests);
            }

            let finetune = ui
                .add_enabled(
                    actions.finetune_enabled,
                    egui::Button::new(format!("{} Finetune", icons::MAGIC_WAND)),
                )
                .on_hover_text("Finetune the loaded model on the current data");
            if finetune.clicked() {
                let requests = data.state.finetune();
                data.issue(requests);
            }
        });

        ui.horizontal(|ui| {
            let active = data.state.threshold().active;
            let button = ui
                .add_enabled(
                    actions.threshold_enabled,
                    egui::Button::new(format!("{} Threshold", icons::FUNNEL)).selected(active),
                )
                .on_hover_text("Hide overlap cells below the value");
            if button.clicked() {
                data.state.toggle_threshold();
            }
            let mut value = data.state.threshold().value.clone();
            let edit = ui.add_enabled(
                actions.threshold_enabled,
                egui::TextEdit::singleline(&mut value)
                    .hint_text("value")
                    .desired_width(80.0),
            );
            if edit.changed() {
                data.state.set_threshold_value(value);
            }
        });

        if let Some(progress) = data.state.progress() {
            let mut bar = egui::ProgressBar::new(progress.fraction)
                .text(progress.text.as_str())
                .animate(!progress.is_finished());
            if progress.failed {
                bar = bar.fill(Color32::from_rgb(200, 60, 60));
            }
            ui.add_space(4.0);
            ui.add(bar);
        }
    }
}
