//! Enablement of the view actions: overlay toggle, finetune and threshold controls.

/// Facts the enablement policy depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionInputs {
    pub model_loaded: bool,
    pub axis_selected: bool,
    pub overlay_checked: bool,
    pub threshold_active: bool,
    pub finetune_running: bool,
}

/// Derived state of the action controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionState {
    pub overlay_enabled: bool,
    pub overlay_checked: bool,
    pub finetune_enabled: bool,
    pub threshold_enabled: bool,
    pub threshold_active: bool,
    /// The overlay was checked but its preconditions no longer hold.
    pub overlay_forced_off: bool,
}

impl ActionState {
    /// Apply the policy.
    ///
    /// The overlay can be used only with a loaded model and a complete axis
    /// selection; it is force-unchecked otherwise. Finetune and threshold
    /// controls follow the (possibly forced) overlay state, and a disabled
    /// threshold control loses its active highlight.
    pub fn derive(inputs: ActionInputs) -> Self {
        let overlay_enabled = inputs.model_loaded && inputs.axis_selected;
        let overlay_forced_off = inputs.overlay_checked && !overlay_enabled;
        let overlay_checked = inputs.overlay_checked && overlay_enabled;
        Self {
            overlay_enabled,
            overlay_checked,
            finetune_enabled: overlay_checked && !inputs.finetune_running,
            threshold_enabled: overlay_checked,
            threshold_active: overlay_checked && inputs.threshold_active,
            overlay_forced_off,
        }
    }
}
