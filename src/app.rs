use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};

use crate::engine::{Engine, Phase};
use crate::engine_thread::{spawn_engine, EngineHandle};
use crate::fitness::FitnessStats;
use crate::render::Raster;
use crate::settings::AppSettings;

pub struct EvolveApp {
    // Textures shown in the UI
    target_tex: TextureHandle,
    best_tex: Option<TextureHandle>,

    // Target image size in pixels
    target_dims: [usize; 2],

    // Communication with engine thread
    engine: EngineHandle,
    seed: u64,

    // Latest state from engine
    running: bool,
    generation: u64,
    stats: Option<FitnessStats>,
    phase: Phase,

    settings: AppSettings,
}

impl EvolveApp {
    /// Upload the target and hand the engine to its own thread.
    pub fn new(cc: &eframe::CreationContext<'_>, engine: Engine, settings: AppSettings) -> std::io::Result<Self> {
        let target = engine.target();
        let target_dims = [target.width() as usize, target.height() as usize];
        let target_tex = cc.egui_ctx.load_texture("target", to_color_image(target), TextureOptions::LINEAR);
        let seed = engine.seed();
        let generation = engine.generation();
        let phase = engine.phase();

        let engine = spawn_engine(engine, cc.egui_ctx.clone(), settings.autostart)?;

        Ok(Self {
            target_tex,
            best_tex: None,
            target_dims,
            engine,
            seed,
            running: settings.autostart,
            generation,
            stats: None,
            phase,
            settings,
        })
    }

    /// Drain the update channel, keeping only the newest snapshot
    fn poll_engine_updates(&mut self, ctx: &egui::Context) {
        profiling::scope!("poll_engine_updates");
        let Some(update) = self.engine.latest_update() else {
            return;
        };

        let size = [update.width as usize, update.height as usize];
        let img = ColorImage::from_rgba_premultiplied(size, update.best_rgba.as_ref());
        if let Some(tex) = self.best_tex.as_mut() {
            tex.set(img, TextureOptions::LINEAR);
        } else {
            self.best_tex = Some(ctx.load_texture("best", img, TextureOptions::LINEAR));
        }

        self.generation = update.generation;
        self.stats = Some(update.stats);
        self.phase = update.phase;
        if self.phase.is_finished() {
            self.running = false;
        }
    }
}

fn to_color_image(raster: &Raster) -> ColorImage {
    ColorImage::from_rgba_premultiplied([raster.width() as usize, raster.height() as usize], raster.data())
}

impl eframe::App for EvolveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        profiling::scope!("update");

        // Poll for updates from background thread
        self.poll_engine_updates(ctx);

        let finished = self.phase.is_finished();
        crate::ui::handle_keyboard_input(ctx, &self.engine, &mut self.running, finished);

        crate::ui::render_toolbar(ctx, &self.engine, &mut self.running, finished, &self.settings, self.seed);
        crate::ui::render_status_bar(
            ctx,
            self.generation,
            self.stats.as_ref(),
            self.phase,
            self.running,
            self.target_dims,
        );
        crate::ui::render_central_panel(ctx, &self.target_tex, &self.best_tex);

        profiling::finish_frame!();
    }
}
