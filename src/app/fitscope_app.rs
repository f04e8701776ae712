//! The eframe application: owns the client state, the request worker and the panels.

use std::time::{Duration, Instant};

use eframe::egui;

use crate::api::worker::RequestWorker;
use crate::api::ApiRequest;
use crate::color_scheme::ColorScheme;
use crate::config::FitScopeConfig;
use crate::data::state::AppState;
use crate::panels::notices_ui::{show_delete_confirm, show_notice};
use crate::panels::{
    ActionsPanel, ChartPanel, ColumnsPanel, FunctionsPanel, ModelFilePanel, Panel, PanelData,
};

/// Repaint interval while a progress bar is on screen.
const PROGRESS_REPAINT: Duration = Duration::from_millis(100);

// ─────────────────────────────────────────────────────────────────────────────
// FitScopeApp
// ─────────────────────────────────────────────────────────────────────────────

pub struct FitScopeApp {
    pub state: AppState,
    worker: RequestWorker,

    // ── Panels ───────────────────────────────────────────────────────────────
    /// Data and model settings.
    pub left_side_panels: Vec<Box<dyn Panel>>,
    /// View actions and model files.
    pub right_side_panels: Vec<Box<dyn Panel>>,
    pub chart_panel: ChartPanel,

    pub color_scheme: ColorScheme,
    color_scheme_applied: bool,
    backend_url: String,
}

impl FitScopeApp {
    pub fn new(worker: RequestWorker, cfg: &FitScopeConfig) -> Self {
        let mut state = AppState::new(cfg.overlay_source);
        let initial = state.update_plot();
        worker.submit_all(initial);
        Self {
            state,
            worker,
            left_side_panels: vec![
                Box::new(ColumnsPanel::default()),
                Box::new(FunctionsPanel::default()),
            ],
            right_side_panels: vec![
                Box::new(ActionsPanel::default()),
                Box::new(ModelFilePanel::default()),
            ],
            chart_panel: ChartPanel::default(),
            color_scheme: cfg.color_scheme,
            color_scheme_applied: false,
            backend_url: cfg.backend_url.clone(),
        }
    }

    /// Apply every finished backend call and queue its follow-ups.
    fn process_responses(&mut self) {
        for response in self.worker.drain() {
            let follow_up = self.state.apply_response(response);
            self.worker.submit_all(follow_up);
        }
    }

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("View", |ui| {
                for p in self
                    .left_side_panels
                    .iter_mut()
                    .chain(self.right_side_panels.iter_mut())
                {
                    ui.horizontal(|ui| {
                        p.render_menu(ui);
                        ui.checkbox(&mut p.state_mut().detached, "Window");
                    });
                }
                ui.separator();
                for scheme in ColorScheme::all() {
                    if ui
                        .radio(self.color_scheme == *scheme, scheme.label())
                        .clicked()
                    {
                        self.color_scheme = *scheme;
                        self.color_scheme_applied = false;
                    }
                }
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(&self.backend_url).weak().monospace());
            });
        });
    }
}

/// Docked panels, one collapsible section each.
fn render_docked(ui: &mut egui::Ui, panels: &mut [Box<dyn Panel>], data: &mut PanelData<'_>) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        for p in panels.iter_mut() {
            if !p.state().visible || p.state().detached {
                continue;
            }
            egui::CollapsingHeader::new(p.title_and_icon())
                .id_salt(p.title())
                .default_open(true)
                .show(ui, |ui| p.render_panel(ui, data));
        }
    });
}

/// Panels shown in their own window. Closing the window hides the panel.
fn render_detached(ctx: &egui::Context, panels: &mut [Box<dyn Panel>], data: &mut PanelData<'_>) {
    for p in panels.iter_mut() {
        if !p.state().visible || !p.state().detached {
            continue;
        }
        let mut open = true;
        egui::Window::new(p.title_and_icon())
            .id(egui::Id::new(("detached_panel", p.title())))
            .open(&mut open)
            .show(ctx, |ui| p.render_panel(ui, data));
        if !open {
            p.state_mut().visible = false;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eframe integration
// ─────────────────────────────────────────────────────────────────────────────

impl eframe::App for FitScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.color_scheme_applied {
            self.color_scheme.apply(ctx);
            self.color_scheme_applied = true;
        }

        self.process_responses();
        self.state.tick(Instant::now());

        egui::TopBottomPanel::top("fitscope_menu").show(ctx, |ui| {
            self.render_menu_bar(ui);
        });

        let mut requests: Vec<ApiRequest> = Vec::new();
        let mut left = std::mem::take(&mut self.left_side_panels);
        let mut right = std::mem::take(&mut self.right_side_panels);
        {
            let mut data = PanelData {
                state: &mut self.state,
                requests: &mut requests,
                scheme: self.color_scheme,
            };

            if left.iter().any(|p| p.state().visible && !p.state().detached) {
                egui::SidePanel::left("fitscope_left")
                    .resizable(true)
                    .default_width(460.0)
                    .min_width(260.0)
                    .show(ctx, |ui| render_docked(ui, &mut left, &mut data));
            }
            if right.iter().any(|p| p.state().visible && !p.state().detached) {
                egui::SidePanel::right("fitscope_right")
                    .resizable(true)
                    .default_width(280.0)
                    .min_width(200.0)
                    .show(ctx, |ui| render_docked(ui, &mut right, &mut data));
            }
            render_detached(ctx, &mut left, &mut data);
            render_detached(ctx, &mut right, &mut data);

            let chart = &mut self.chart_panel;
            egui::CentralPanel::default().show(ctx, |ui| chart.render_panel(ui, &mut data));
        }
        self.left_side_panels = left;
        self.right_side_panels = right;

        show_notice(ctx, &mut self.state);
        requests.extend(show_delete_confirm(ctx, &mut self.state));

        if !requests.is_empty() {
            tracing::debug!(count = requests.len(), "submitting requests");
            self.worker.submit_all(requests);
        }

        if self.state.progress().is_some() {
            ctx.request_repaint_after(PROGRESS_REPAINT);
        }
    }
}
