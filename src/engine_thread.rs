use eframe::egui;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::app_types::{EngineCommand, EngineUpdate};
use crate::engine::{Engine, GenerationReport};

/// UI side of the engine thread: command sender, update receiver, join handle.
/// dropping it stops the engine and waits for the thread.
pub struct EngineHandle {
    command_tx: Sender<EngineCommand>,
    update_rx: Receiver<EngineUpdate>,
    thread: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    pub fn send(&self, cmd: EngineCommand) {
        // a closed channel just means the engine already exited
        let _ = self.command_tx.send(cmd);
    }

    /// newest pending update, older ones are skipped
    pub fn latest_update(&self) -> Option<EngineUpdate> {
        self.update_rx.try_iter().last()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        let _ = self.command_tx.send(EngineCommand::Stop);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// build the UI snapshot for a finished generation
pub fn snapshot(engine: &Engine, report: &GenerationReport) -> EngineUpdate {
    profiling::scope!("snapshot");
    let phenotype = engine.render(&report.best);
    EngineUpdate {
        width: phenotype.width(),
        height: phenotype.height(),
        best_rgba: Arc::from(phenotype.into_data()),
        generation: report.generation,
        stats: report.stats,
        phase: engine.phase(),
    }
}

/// Spawn the background engine thread. It owns the engine outright; the UI only
/// ever receives snapshots, so the population is never read while it is replaced.
pub fn spawn_engine(mut engine: Engine, ctx: egui::Context, autostart: bool) -> std::io::Result<EngineHandle> {
    let (command_tx, command_rx) = mpsc::channel();
    let (update_tx, update_rx) = mpsc::channel();

    let handle = thread::Builder::new()
        .name("engine".to_owned())
        .spawn(move || {
            let mut running = autostart;

            loop {
                profiling::scope!("engine_thread_loop");

                // non-blocking while evolving, block while paused or finished
                let cmd = if running && !engine.is_finished() {
                    match command_rx.try_recv() {
                        Ok(cmd) => Some(cmd),
                        Err(TryRecvError::Empty) => None,
                        Err(TryRecvError::Disconnected) => break,
                    }
                } else {
                    match command_rx.recv() {
                        Ok(cmd) => Some(cmd),
                        Err(_) => break,
                    }
                };

                match cmd {
                    Some(EngineCommand::Start) => running = true,
                    Some(EngineCommand::Pause) => running = false,
                    Some(EngineCommand::Stop) => {
                        engine.request_stop();
                        break;
                    }
                    None => {}
                }

                if !running || engine.is_finished() {
                    continue;
                }

                let Some(report) = engine.step().cloned() else {
                    continue;
                };
                if update_tx.send(snapshot(&engine, &report)).is_err() {
                    break; // UI is gone
                }
                ctx.request_repaint();
            }

            log::debug!("engine thread exiting at generation {}", engine.generation());
        })?;

    Ok(EngineHandle {
        command_tx,
        update_rx,
        thread: Some(handle),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Phase;
    use crate::evolve_config::EvolveConfig;
    use crate::render::Raster;

    fn engine(cfg: EvolveConfig) -> Engine {
        let cfg = EvolveConfig {
            gene_count: 4,
            population_size: 6,
            tournament_size: 2,
            min_radius: 1,
            max_radius: 3,
            parallel_evaluation: false,
            seed: Some(21),
            ..cfg
        };
        Engine::new(Arc::new(Raster::filled(8, 8, [0, 0, 0])), cfg).unwrap()
    }

    #[test]
    fn test_snapshot_reports_generation_cap_stop() {
        let mut engine = engine(EvolveConfig { max_generations: Some(1), convergence_threshold: 1.0, ..Default::default() });
        let report = engine.step().cloned().unwrap();
        let update = snapshot(&engine, &report);
        assert_eq!(update.phase, Phase::Stopped);
        assert!(update.phase.is_finished());
        assert_eq!((update.width, update.height), (8, 8));
        assert_eq!(update.best_rgba.len(), 8 * 8 * 4);
    }

    #[test]
    fn test_snapshot_reports_running_and_converged() {
        let mut engine1 = engine(EvolveConfig { convergence_threshold: 1.0, ..Default::default() });
        let report = engine1.step().cloned().unwrap();
        assert_eq!(snapshot(&engine1, &report).phase, Phase::Ready);

        let mut engine2 = engine(EvolveConfig { convergence_threshold: 0.0, ..Default::default() });
        let report = engine2.step().cloned().unwrap();
        assert_eq!(snapshot(&engine2, &report).phase, Phase::Converged);
    }
}
