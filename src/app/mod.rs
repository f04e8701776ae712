//! Application shell.
//!
//! | Sub-module       | Responsibility |
//! | ---------------- | -------------- |
//! | [`fitscope_app`] | [`FitScopeApp`]: per-frame response handling, docking and dialogs |
//! | [`run`]          | [`run_fitscope()`] entry point and icon loading |

mod fitscope_app;
mod run;

pub use fitscope_app::FitScopeApp;
pub use run::run_fitscope;
