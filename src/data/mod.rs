//! Pure client state: column selections, fit functions, model settings and
//! chart contents. Nothing in here performs I/O except asset discovery.

pub mod actions;
pub mod assets;
pub mod axis;
pub mod chart;
pub mod fitting;
pub mod functions;
pub mod model;
pub mod state;
