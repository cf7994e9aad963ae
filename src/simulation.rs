use crate::algorithms::a_star::AStar;
use crate::algorithms::bfs::BreadthFirst;
use crate::config::Config;
use crate::error::Result;
use crate::grid::{Grid, Position};
use crate::statistics::SearchStats;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::time::{Duration, Instant};

/// A generated grid together with the endpoints to search between.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub seed: u64,
    pub grid: Grid,
    pub start: Position,
    pub target: Position,
}

impl Scenario {
    /// Build a reproducible scenario. Endpoints not fixed by the config are
    /// drawn from the top-left and bottom-right quarters, and are never
    /// covered by walls.
    pub fn generate(config: &Config, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let (width, height) = (config.width, config.height);

        let start = config.start.unwrap_or_else(|| Position {
            x: rng.gen_range(0..(width / 2).max(1)),
            y: rng.gen_range(0..(height / 2).max(1)),
        });
        let target = config.target.unwrap_or_else(|| Position {
            x: rng.gen_range(width / 2..width.max(1)),
            y: rng.gen_range(height / 2..height.max(1)),
        });

        let grid = Grid::random(width, height, config.num_walls, &[start, target], &mut rng)?;

        Ok(Scenario {
            seed,
            grid,
            start,
            target,
        })
    }
}

/// Outcome of running A* once on a scenario, with the BFS reference length.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub length: Option<usize>,
    pub reference: Option<usize>,
    pub capacity: usize,
    /// The steps that were written into the buffer.
    pub written: Vec<usize>,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn is_truncated(&self) -> bool {
        self.length.is_some_and(|len| len > self.capacity)
    }

    pub fn matches_reference(&self) -> bool {
        self.length == self.reference
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.length {
            Some(0) => writeln!(f, "Already at target")?,
            Some(len) => writeln!(f, "Path length: {}", len)?,
            None => writeln!(f, "No path exists")?,
        }
        if self.is_truncated() {
            writeln!(
                f,
                "Buffer holds {} steps: only the last {} were written",
                self.capacity,
                self.written.len()
            )?;
        }
        match self.reference {
            Some(len) => writeln!(f, "BFS reference length: {}", len)?,
            None => writeln!(f, "BFS reference: unreachable")?,
        }
        writeln!(f, "Search: {}", self.stats)?;
        writeln!(f, "Search time: {:.2?}", self.elapsed)?;
        if !self.matches_reference() {
            writeln!(f, "✗ A* disagrees with the BFS reference")?;
        }
        Ok(())
    }
}

pub struct Simulation {
    config: Config,
    searcher: AStar,
}

impl Simulation {
    pub fn new(config: Config) -> Self {
        let searcher = match config.max_expansions {
            Some(limit) => AStar::with_expansion_limit(limit),
            None => AStar::new(),
        };
        Simulation { config, searcher }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Search `scenario` into a buffer of the configured capacity and check
    /// the length against BFS.
    pub fn run(&self, scenario: &Scenario) -> Result<RunReport> {
        let mut buffer = vec![0; self.config.capacity];

        let started = Instant::now();
        let outcome = self
            .searcher
            .search(&scenario.grid, scenario.start, scenario.target, &mut buffer)?;
        let elapsed = started.elapsed();

        let reference = BreadthFirst::distance(&scenario.grid, scenario.start, scenario.target);
        let written = outcome.length.map_or(0, |len| len.min(buffer.len()));
        buffer.truncate(written);

        info!(
            "seed {}: {:?} -> {:?}, length {:?} (bfs {:?}) in {:.2?}",
            scenario.seed, scenario.start, scenario.target, outcome.length, reference, elapsed
        );

        Ok(RunReport {
            length: outcome.length,
            reference,
            capacity: self.config.capacity,
            written: buffer,
            stats: outcome.stats,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> Config {
        Config::parse_from(std::iter::once("grid_astar").chain(args.iter().copied()))
    }

    #[test]
    fn scenario_is_reproducible() {
        let config = config(&["--width", "12", "--height", "9", "--num-walls", "30"]);
        let a = Scenario::generate(&config, 5).unwrap();
        let b = Scenario::generate(&config, 5).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.start, b.start);
        assert_eq!(a.target, b.target);
        assert!(a.grid.is_hollow(a.start));
        assert!(a.grid.is_hollow(a.target));
    }

    #[test]
    fn fixed_endpoints_are_respected() {
        let config = config(&["--start", "0,0", "--target", "4,4", "--width", "5", "--height", "5"]);
        let scenario = Scenario::generate(&config, 1).unwrap();
        assert_eq!(scenario.start, Position::new(0, 0));
        assert_eq!(scenario.target, Position::new(4, 4));
    }

    #[test]
    fn run_reports_truncation() {
        let config = config(&[
            "--width", "6", "--height", "1", "--num-walls", "0", "--start", "0,0", "--target",
            "5,0", "--capacity", "2",
        ]);
        let scenario = Scenario::generate(&config, 0).unwrap();
        let report = Simulation::new(config).run(&scenario).unwrap();
        assert_eq!(report.length, Some(5));
        assert_eq!(report.written, vec![4, 5]);
        assert!(report.is_truncated());
        assert!(report.matches_reference());
    }

    #[test]
    fn run_propagates_out_of_bounds() {
        let config = config(&["--width", "4", "--height", "4", "--target", "9,9"]);
        let scenario = Scenario::generate(&config, 3).unwrap();
        assert!(Simulation::new(config).run(&scenario).is_err());
    }
}
