use eframe::egui::{self, Image, TextureHandle};

/// Draw a texture scaled to fit within the available space preserving aspect ratio
pub fn aspect_fit(ui: &mut egui::Ui, tex: &TextureHandle, avail: egui::Vec2) {
    let tex_size = tex.size_vec2();
    let scale = (avail.x / tex_size.x).min(avail.y / tex_size.y).max(0.0);
    let draw_size = tex_size * scale;
    ui.add(Image::new(tex).fit_to_exact_size(draw_size));
}

/// Render the central panel: target on the left, best phenotype on the right
pub fn render_central_panel(
    ctx: &egui::Context,
    target_tex: &TextureHandle,
    best_tex: &Option<TextureHandle>,
) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let avail = ui.available_size();
        let half = egui::vec2((avail.x - ui.spacing().item_spacing.x) / 2.0, avail.y);

        ui.horizontal(|ui| {
            aspect_fit(ui, target_tex, half);
            match best_tex {
                Some(tex) => aspect_fit(ui, tex, half),
                None => {
                    ui.allocate_ui(half, |ui| {
                        ui.centered_and_justified(|ui| ui.weak("evaluating…"));
                    });
                }
            }
        });
    });
}
