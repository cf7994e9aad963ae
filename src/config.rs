use crate::grid::Position;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 20)]
    pub width: usize,

    #[arg(long, default_value_t = 20)]
    pub height: usize,

    #[arg(long, default_value_t = 80)]
    pub num_walls: usize,

    /// Seed for grid generation; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start cell as `x,y`; random in the top-left quarter when omitted
    #[arg(long, value_parser = parse_position)]
    pub start: Option<Position>,

    /// Target cell as `x,y`; random in the bottom-right quarter when omitted
    #[arg(long, value_parser = parse_position)]
    pub target: Option<Position>,

    /// Number of path steps the output buffer can hold
    #[arg(long, default_value_t = 256)]
    pub capacity: usize,

    /// Abort a search after this many node expansions
    #[arg(long)]
    pub max_expansions: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub batch_mode: bool,

    #[arg(long, default_value_t = 100)]
    pub num_simulations: usize,

    #[arg(long, default_value_t = false)]
    pub no_visualization: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

pub fn parse_position(s: &str) -> Result<Position, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in `{s}`: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in `{s}`: {e}"))?;
    Ok(Position { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positions() {
        assert_eq!(parse_position("3,4"), Ok(Position::new(3, 4)));
        assert_eq!(parse_position(" 0 , 12 "), Ok(Position::new(0, 12)));
        assert!(parse_position("3").is_err());
        assert!(parse_position("a,1").is_err());
        assert!(parse_position("-1,1").is_err());
    }

    #[test]
    fn defaults_and_flags() {
        let config = Config::parse_from(["grid_astar"]);
        assert_eq!(config.width, 20);
        assert_eq!(config.capacity, 256);
        assert!(config.start.is_none());
        assert!(!config.batch_mode);

        let config = Config::parse_from([
            "grid_astar",
            "--width",
            "8",
            "--start",
            "1,2",
            "--target",
            "7,7",
            "--batch-mode",
            "--seed",
            "42",
        ]);
        assert_eq!(config.width, 8);
        assert_eq!(config.start, Some(Position::new(1, 2)));
        assert_eq!(config.target, Some(Position::new(7, 7)));
        assert!(config.batch_mode);
        assert_eq!(config.seed, Some(42));
    }
}
