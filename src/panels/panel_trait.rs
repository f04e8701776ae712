use egui::Ui;

use crate::api::ApiRequest;
use crate::color_scheme::ColorScheme;
use crate::data::state::AppState;

#[derive(Debug, Clone, Copy)]
pub struct PanelState {
    pub title: &'static str,
    pub icon: &'static str,
    pub visible: bool,
    /// Shown in its own window instead of the side bar.
    pub detached: bool,
}

impl PanelState {
    pub fn new(title: &'static str, icon: &'static str) -> Self {
        Self {
            title,
            icon,
            visible: true,
            detached: false,
        }
    }
}

/// What a panel may read and change during one frame.
pub struct PanelData<'a> {
    pub state: &'a mut AppState,
    /// Backend calls collected this frame; the app submits them afterwards.
    pub requests: &'a mut Vec<ApiRequest>,
    pub scheme: ColorScheme,
}

impl PanelData<'_> {
    pub fn issue(&mut self, requests: Vec<ApiRequest>) {
        self.requests.extend(requests);
    }
}

pub trait Panel {
    fn state(&self) -> &PanelState;
    fn state_mut(&mut self) -> &mut PanelState;

    fn title(&self) -> &'static str {
        self.state().title
    }

    fn title_and_icon(&self) -> String {
        format!("{} {}", self.state().icon, self.state().title)
    }

    /// Menu entry toggling the panel.
    fn render_menu(&mut self, ui: &mut Ui) {
        let label = self.title_and_icon();
        let st = self.state_mut();
        ui.checkbox(&mut st.visible, label);
    }

    fn render_panel(&mut self, ui: &mut Ui, data: &mut PanelData<'_>);
}
