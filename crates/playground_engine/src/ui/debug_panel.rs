//! Debug panel
//!
//! A small egui window in the top-right corner with one button per spawn
//! action. Button presses become [`DebugAction`]s; the panel never touches
//! the playground itself.

use three_d::egui;

/// Something the user asked for from the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugAction {
    /// Drop a sphere of random size at a random spot
    CreateSphere,
    /// Drop a box of random size at a random spot
    CreateBox,
}

/// A panel button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugButton {
    /// Stable identifier, used for scripted clicks
    pub id: String,
    /// Text on the button
    pub label: String,
    /// Action fired when pressed
    pub action: DebugAction,
}

impl DebugButton {
    /// Button whose label equals its identifier
    pub fn new(id: &str, action: DebugAction) -> Self {
        Self {
            id: id.to_string(),
            label: id.to_string(),
            action,
        }
    }
}

/// Object counts shown under the buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnCounters {
    /// Spheres in the scene
    pub spheres: usize,
    /// Boxes in the scene
    pub boxes: usize,
}

/// The debug window
#[derive(Debug, Clone)]
pub struct DebugPanel {
    title: String,
    buttons: Vec<DebugButton>,
    counters: SpawnCounters,
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self::new("Debug")
            .with_button(DebugButton::new("createSphere", DebugAction::CreateSphere))
            .with_button(DebugButton::new("createBox", DebugAction::CreateBox))
    }
}

impl DebugPanel {
    /// Empty panel
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            buttons: Vec::new(),
            counters: SpawnCounters::default(),
        }
    }

    /// Append a button
    pub fn with_button(mut self, button: DebugButton) -> Self {
        self.buttons.push(button);
        self
    }

    /// Window title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Buttons in display order
    pub fn buttons(&self) -> &[DebugButton] {
        &self.buttons
    }

    /// Action behind the button with identifier `id`
    pub fn click(&self, id: &str) -> Option<DebugAction> {
        self.buttons.iter().find(|button| button.id == id).map(|button| button.action)
    }

    /// Refresh the counters shown in the panel
    pub fn set_counters(&mut self, counters: SpawnCounters) {
        self.counters = counters;
    }

    /// Current counters
    pub fn counters(&self) -> SpawnCounters {
        self.counters
    }

    /// Draw the panel and collect the actions pressed this frame.
    ///
    /// The window has no close button, only a collapse toggle, so the spawn
    /// buttons stay reachable for the whole session.
    pub fn show(&self, ctx: &egui::Context) -> Vec<DebugAction> {
        let mut actions = Vec::new();
        let counters = self.counters;
        let buttons = &self.buttons;

        egui::Window::new(self.title.as_str())
            .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
            .resizable(false)
            .collapsible(true)
            .show(ctx, |ui| {
                for button in buttons {
                    if ui.button(button.label.as_str()).clicked() {
                        log::debug!("Debug panel: {} pressed", button.id);
                        actions.push(button.action);
                    }
                }
                ui.separator();
                ui.label(format!("spheres: {}", counters.spheres));
                ui.label(format!("boxes: {}", counters.boxes));
            });

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_buttons_in_order() {
        let panel = DebugPanel::default();
        let ids: Vec<&str> = panel.buttons().iter().map(|button| button.id.as_str()).collect();
        assert_eq!(ids, vec!["createSphere", "createBox"]);
        assert_eq!(panel.title(), "Debug");
    }

    #[test]
    fn test_click_maps_ids_to_actions() {
        let panel = DebugPanel::default();
        assert_eq!(panel.click("createSphere"), Some(DebugAction::CreateSphere));
        assert_eq!(panel.click("createBox"), Some(DebugAction::CreateBox));
        assert_eq!(panel.click("reset"), None);
    }

    #[test]
    fn test_counters() {
        let mut panel = DebugPanel::default();
        panel.set_counters(SpawnCounters { spheres: 3, boxes: 1 });
        assert_eq!(panel.counters(), SpawnCounters { spheres: 3, boxes: 1 });
    }

    #[test]
    fn test_show_without_input_fires_nothing() {
        let panel = DebugPanel::default();
        let ctx = egui::Context::default();
        let mut actions = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            actions = panel.show(ctx);
        });
        assert!(actions.is_empty());
    }

    #[test]
    fn test_panel_is_drawn_every_frame() {
        let panel = DebugPanel::default();
        let ctx = egui::Context::default();
        for frame in 0..5 {
            let output = ctx.run(egui::RawInput::default(), |ctx| {
                panel.show(ctx);
            });
            assert!(!output.shapes.is_empty(), "panel missing on frame {frame}");
        }
    }
}
