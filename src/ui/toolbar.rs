use eframe::egui;

use crate::app_types::EngineCommand;
use crate::engine_thread::EngineHandle;
use crate::settings::AppSettings;

/// Render the top toolbar panel
pub fn render_toolbar(
    ctx: &egui::Context,
    engine: &EngineHandle,
    running: &mut bool,
    finished: bool,
    settings: &AppSettings,
    seed: u64,
) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.add_enabled_ui(!finished, |ui| {
                let run_label = if *running { "⏸ Pause" } else { "▶ Run" };
                if ui.button(run_label).on_hover_text("Start/pause evolution (Space)").clicked() {
                    toggle_running(engine, running);
                }
            });

            ui.separator();

            if ui.button("💾 Save settings").on_hover_text("Write the active settings to settings.json").clicked() {
                if let Err(e) = settings.save() {
                    log::error!("failed to save settings: {}", e);
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format!(
                    "{} × {} disks | tournament {} | seed {}",
                    settings.population_size, settings.gene_count, settings.tournament_size, seed,
                ));
            });
        });
    });
}

/// flip run/pause and tell the engine
pub fn toggle_running(engine: &EngineHandle, running: &mut bool) {
    *running = !*running;
    engine.send(if *running { EngineCommand::Start } else { EngineCommand::Pause });
}
