use clap::Parser;
use std::io::Write;

use grid_astar::batch_simulation::BatchSimulation;
use grid_astar::config::Config;
use grid_astar::simulation::{Scenario, Simulation};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let config = Config::parse();

    if !config.quiet {
        println!("Grid size: {}x{}", config.width, config.height);
        println!("Walls: {}", config.num_walls);
        println!("Output buffer capacity: {}", config.capacity);
        println!();
    }

    if config.batch_mode {
        let quiet = config.quiet;
        let mut batch = BatchSimulation::new(config);
        match batch.run() {
            Ok(summary) => {
                let consistent = summary.is_consistent();
                if !quiet {
                    batch.print_summary();
                }
                if !consistent {
                    std::process::exit(2);
                }
            }
            Err(e) => {
                eprintln!("Batch simulation failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let seed = config.seed.unwrap_or_else(rand::random::<u64>);
    let scenario = match Scenario::generate(&config, seed) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Could not build grid: {}", e);
            std::process::exit(1);
        }
    };

    let simulation = Simulation::new(config.clone());
    match simulation.run(&scenario) {
        Ok(report) => {
            println!("Seed: {}", seed);
            println!("Start: {:?}, Target: {:?}", scenario.start, scenario.target);
            if !config.no_visualization {
                println!("Legend: S=Start, T=Target, *=Path, #=Wall, .=Hollow");
                print!(
                    "{}",
                    scenario
                        .grid
                        .render(Some(scenario.start), Some(scenario.target), &report.written)
                );
                println!();
            }
            println!("=== RESULT ===");
            print!("{}", report);
            if !report.matches_reference() {
                std::process::exit(2);
            }
        }
        Err(e) => {
            eprintln!("Search failed: {}", e);
            std::process::exit(1);
        }
    }
}
