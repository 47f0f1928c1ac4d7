use eframe::egui;

use crate::engine::Phase;
use crate::fitness::FitnessStats;

/// Render the bottom status bar panel
pub fn render_status_bar(
    ctx: &egui::Context,
    generation: u64,
    stats: Option<&FitnessStats>,
    phase: Phase,
    running: bool,
    target_dims: [usize; 2],
) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            // left: generation info
            if let Some(stats) = stats {
                ui.label(format!("Gen: {} | Best: {:.5} | Worst: {:.5}", generation, stats.best, stats.worst))
                    .on_hover_text("normalized RGB error, lower is better");
                ui.separator();
                ui.weak(format!("match {:.2}%", stats.best_match_percent()));
            } else {
                ui.label("Waiting for first generation…");
            }

            ui.separator();

            match phase {
                Phase::Converged => {
                    ui.colored_label(egui::Color32::from_rgb(100, 200, 120), "✔ Converged");
                }
                Phase::Stopped => {
                    ui.colored_label(egui::Color32::from_rgb(220, 170, 80), "■ Stopped");
                }
                Phase::Initialized | Phase::Ready if running => {
                    ui.label("Evolving");
                }
                Phase::Initialized | Phase::Ready => {
                    ui.label("Paused");
                }
            }

            // right-aligned: image dimensions
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if target_dims[0] > 0 && target_dims[1] > 0 {
                    ui.label(format!("{}×{} px", target_dims[0], target_dims[1]));
                }
            });
        });
    });
}
