pub mod actions_ui;
pub mod chart_ui;
pub mod columns_ui;
pub mod functions_ui;
pub mod model_ui;
pub mod notices_ui;
pub mod panel_trait;

pub use actions_ui::ActionsPanel;
pub use chart_ui::ChartPanel;
pub use columns_ui::ColumnsPanel;
pub use functions_ui::FunctionsPanel;
pub use model_ui::ModelFilePanel;
pub use panel_trait::{Panel, PanelData, PanelState};
