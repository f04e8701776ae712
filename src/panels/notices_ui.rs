//! Modal dialogs: acknowledgement of notices and delete confirmation.

use egui::{Align2, Color32, Context, RichText};
use egui_phosphor::regular as icons;

use crate::api::ApiRequest;
use crate::data::state::{AppState, NoticeKind};

/// Show the oldest pending notice, if any.
pub fn show_notice(ctx: &Context, state: &mut AppState) {
    let Some(notice) = state.current_notice().cloned() else {
        return;
    };
    let (icon, color, title) = match notice.kind {
        NoticeKind::Info => (icons::INFO, None, "Information"),
        NoticeKind::Error => (icons::WARNING, Some(Color32::from_rgb(220, 80, 80)), "Error"),
    };
    let mut dismissed = false;
    egui::Window::new(title)
        .id(egui::Id::new("fitscope_notice"))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut icon = RichText::new(icon).size(22.0);
                if let Some(c) = color {
                    icon = icon.color(c);
                }
                ui.label(icon);
                ui.label(notice.text.as_str());
            });
            ui.label(
                RichText::new(notice.at.format("%H:%M:%S").to_string())
                    .small()
                    .weak(),
            );
            ui.add_space(6.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    if dismissed {
        state.dismiss_notice();
    }
}

/// Ask before deleting a model file. Returns the delete request once confirmed.
pub fn show_delete_confirm(ctx: &Context, state: &mut AppState) -> Vec<ApiRequest> {
    let Some(filename) = state.pending_delete().map(str::to_string) else {
        return Vec::new();
    };
    let mut confirmed = false;
    let mut cancelled = false;
    egui::Window::new("Delete model")
        .id(egui::Id::new("fitscope_delete_confirm"))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("Delete \"{filename}\"? This cannot be undone."));
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button(format!("{} Delete", icons::TRASH)).clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });
    if confirmed {
        state.confirm_delete()
    } else {
        if cancelled {
            state.cancel_delete();
        }
        Vec::new()
    }
}
