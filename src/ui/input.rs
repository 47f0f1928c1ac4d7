use eframe::egui;

use crate::engine_thread::EngineHandle;
use super::toolbar::toggle_running;

/// Handle keyboard shortcuts
pub fn handle_keyboard_input(ctx: &egui::Context, engine: &EngineHandle, running: &mut bool, finished: bool) {
    let (space, escape) = ctx.input(|i| (i.key_pressed(egui::Key::Space), i.key_pressed(egui::Key::Escape)));

    // space: toggle run/pause
    if space && !finished {
        toggle_running(engine, running);
    }

    // escape: close the window (engine is stopped on drop)
    if escape {
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}
