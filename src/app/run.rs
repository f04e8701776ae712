//! Top-level entry point for running FitScope as a native window.

use eframe::egui;

use crate::api::client::HttpBackend;
use crate::api::worker::RequestWorker;
use crate::config::FitScopeConfig;
use crate::error::RunError;

use super::FitScopeApp;

/// Open the main window and block until it is closed.
///
/// The backend client is created up front so a malformed URL fails before
/// any window appears.
pub fn run_fitscope(cfg: FitScopeConfig) -> Result<(), RunError> {
    let backend = HttpBackend::new(cfg.backend_url.clone(), cfg.request_timeout())?;
    tracing::info!(backend = %backend.base_url(), "starting FitScope");

    let mut viewport = egui::ViewportBuilder::default()
        .with_title(cfg.title.clone())
        .with_inner_size(egui::vec2(cfg.window_size[0], cfg.window_size[1]));
    if let Some(icon) = load_app_icon_svg() {
        viewport = viewport.with_icon(icon);
    }
    let opts = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let title = cfg.title.clone();
    eframe::run_native(
        &title,
        opts,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            let ctx = cc.egui_ctx.clone();
            let worker = RequestWorker::spawn(backend, move || ctx.request_repaint());
            Ok(Box::new(FitScopeApp::new(worker, &cfg)))
        }),
    )?;
    Ok(())
}

/// Render `icon.svg` from the crate root, if present.
fn load_app_icon_svg() -> Option<egui::IconData> {
    let svg_path = concat!(env!("CARGO_MANIFEST_DIR"), "/icon.svg");
    let data = std::fs::read(svg_path).ok()?;

    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(&data, &opt).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    let mut canvas = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::default(), &mut canvas);
    Some(egui::IconData {
        rgba: pixmap.take(),
        width: size.width(),
        height: size.height(),
    })
}
