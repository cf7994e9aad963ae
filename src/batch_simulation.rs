use crate::config::Config;
use crate::error::Result;
use crate::simulation::{Scenario, Simulation};
use crate::statistics::BatchSummary;
use log::{info, warn};
use std::time::{Duration, Instant};

/// Runs many random scenarios and cross-checks every A* length against BFS.
pub struct BatchSimulation {
    simulation: Simulation,
    base_seed: u64,
    summary: BatchSummary,
    start_time: Instant,
}

impl BatchSimulation {
    pub fn new(config: Config) -> Self {
        let base_seed = config.seed.unwrap_or_else(rand::random::<u64>);
        BatchSimulation {
            simulation: Simulation::new(config),
            base_seed,
            summary: BatchSummary::new(),
            start_time: Instant::now(),
        }
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Trial `i` uses seed `base_seed + i`, so any failing trial can be
    /// replayed on its own with `--seed`.
    pub fn run(&mut self) -> Result<&BatchSummary> {
        let config = self.simulation.config().clone();
        let progress_interval = Duration::from_secs(10);
        let mut last_progress_report = Instant::now();

        info!(
            "batch of {} trials on {}x{} grids with {} walls, base seed {}",
            config.num_simulations, config.width, config.height, config.num_walls, self.base_seed
        );

        for trial in 0..config.num_simulations {
            let seed = self.base_seed.wrapping_add(trial as u64);
            let scenario = Scenario::generate(&config, seed)?;
            let report = self.simulation.run(&scenario)?;

            if !report.matches_reference() {
                warn!(
                    "seed {}: A* length {:?} but BFS found {:?}",
                    seed, report.length, report.reference
                );
            }

            self.summary.record(
                report.length,
                report.reference,
                report.capacity,
                &report.stats,
                report.elapsed,
            );

            if !config.quiet && last_progress_report.elapsed() > progress_interval {
                let done = trial + 1;
                let percentage = done as f64 / config.num_simulations as f64 * 100.0;
                println!(
                    "Progress: {:.1}% ({}/{}) - Elapsed: {:.1}s",
                    percentage,
                    done,
                    config.num_simulations,
                    self.start_time.elapsed().as_secs_f64()
                );
                last_progress_report = Instant::now();
            }
        }

        Ok(&self.summary)
    }

    pub fn print_summary(&self) {
        println!("\n=== BATCH SIMULATION COMPLETED ===");
        println!("Base seed: {}", self.base_seed);
        print!("{}", self.summary);
        println!("Total time: {:.2?}", self.start_time.elapsed());
    }
}
