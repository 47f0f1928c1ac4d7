mod app;
mod app_types;
mod dna;
mod engine;
mod engine_thread;
mod error;
mod evolve_config;
mod fitness;
mod render;
mod settings;
mod target;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::engine::{Engine, Phase};
use crate::error::AppError;
use crate::settings::AppSettings;

// room below the images for toolbar and status bar
const CHROME_HEIGHT: f32 = 60.0;

struct Args {
    target: Option<PathBuf>,
    headless: bool,
}

fn parse_args() -> Args {
    let mut args = Args { target: None, headless: false };
    for arg in std::env::args_os().skip(1) {
        if arg == "--headless" {
            args.headless = true;
        } else if args.target.is_none() {
            args.target = Some(PathBuf::from(arg));
        } else {
            log::warn!("ignoring extra argument {:?}", arg);
        }
    }
    args
}

fn run() -> Result<(), AppError> {
    let args = parse_args();
    let settings = AppSettings::load();

    let path = match args.target {
        Some(path) => path,
        None if args.headless => return Err(AppError::NoTargetSelected),
        None => target::pick_target_path().ok_or(AppError::NoTargetSelected)?,
    };
    let target = Arc::new(target::load_target(&path)?);
    let mut engine = Engine::new(target.clone(), settings.to_evolve_config())?;

    if args.headless {
        let phase = engine.run(|_| true);
        let generation = engine.last_report().map_or(0, |r| r.generation);
        match phase {
            Phase::Converged => log::info!("done: converged at generation {}", generation),
            _ => log::info!("done: stopped at generation {}", generation),
        }
        return Ok(());
    }

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("disk-evolve")
            .with_inner_size([2.0 * target.width() as f32, target.height() as f32 + CHROME_HEIGHT]),
        ..Default::default()
    };
    eframe::run_native(
        "disk-evolve",
        native_options,
        Box::new(move |cc| {
            Ok::<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>>(
                Box::new(crate::app::EvolveApp::new(cc, engine, settings)?)
            )
        }),
    )?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // configure Rayon's global thread pool once at startup so worker threads get nice names like "rayon-0".
    let _ = rayon::ThreadPoolBuilder::new()
        .thread_name(|i| format!("rayon-{i}"))
        .build_global();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
