//! Argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chicago Bulls game and player analytics
#[derive(Parser, Debug)]
#[command(name = "bulls")]
#[command(about = "Bulls game and player analytics with chart generation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to BULLS_CONFIG_PATH, then ./bulls.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "bulls_data=trace"
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Latest game summary and top performers
    Latest,

    /// Recent games and the team summary
    Games {
        /// Number of games (defaults to analysis.recent_games)
        #[arg(short, long, value_name = "N")]
        last: Option<usize>,
    },

    /// Averages, trend, consistency and efficiency for one player
    Player {
        /// Full player name, e.g. "Coby White"
        #[arg(value_name = "NAME")]
        name: String,

        /// Number of games (defaults to analysis.recent_games)
        #[arg(short, long, value_name = "N")]
        last: Option<usize>,

        /// Metric to trend and chart
        #[arg(short, long, default_value = "points", value_name = "METRIC")]
        metric: String,

        /// Write a bar chart of the metric to this path
        #[arg(long, value_name = "PATH")]
        chart: Option<PathBuf>,
    },

    /// Ranked box score for a game
    BoxScore {
        /// Game identifier (defaults to the latest game)
        #[arg(value_name = "GAME_ID")]
        game_id: Option<String>,
    },

    /// Shot chart for one player
    Shots {
        /// Player identifier
        #[arg(long, value_name = "ID")]
        player_id: u32,

        /// Restrict to the team's last N games
        #[arg(short, long, value_name = "N")]
        last: Option<u32>,

        /// Draw FG% by area instead of makes and misses
        #[arg(long)]
        heatmap: bool,

        /// Output image (defaults to <output_dir>/shots_<ID>.png)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Roster efficiency matrix over recent games
    Roster {
        /// Number of games (defaults to analysis.recent_games)
        #[arg(short, long, value_name = "N")]
        last: Option<usize>,

        /// Minimum field goal attempts per game (defaults to analysis.roster_min_fga)
        #[arg(long, value_name = "X")]
        min_fga: Option<f64>,

        /// Output image (defaults to <output_dir>/roster_efficiency.png)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Social graphic for the latest game's top scorer
    Graphic {
        /// Output image (defaults to <output_dir>/top_performer.png)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Check configuration and upstream reachability
    Verify,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bulls").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_player_arguments() {
        let cli = parse(&["player", "Coby White", "--last", "5", "-m", "ast", "--chart", "out/ast.png"]);
        assert_eq!(
            cli.command,
            Command::Player {
                name: "Coby White".to_string(),
                last: Some(5),
                metric: "ast".to_string(),
                chart: Some(PathBuf::from("out/ast.png")),
            }
        );
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["games"]);
        assert_eq!(cli.command, Command::Games { last: None });
        assert!(cli.config.is_none() && cli.log_level.is_none());

        let cli = parse(&["player", "Josh Giddey"]);
        let Command::Player { metric, chart, .. } = cli.command else {
            panic!("expected player command");
        };
        assert_eq!(metric, "points");
        assert!(chart.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["box-score", "0022500503", "--config", "bulls.toml", "--log-level", "debug"]);
        assert_eq!(
            cli.command,
            Command::BoxScore {
                game_id: Some("0022500503".to_string())
            }
        );
        assert_eq!(cli.config, Some(PathBuf::from("bulls.toml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_shots_requires_player_id() {
        assert!(Cli::try_parse_from(["bulls", "shots"]).is_err());
        let cli = parse(&["shots", "--player-id", "1629632", "--heatmap", "-l", "10"]);
        assert_eq!(
            cli.command,
            Command::Shots {
                player_id: 1_629_632,
                last: Some(10),
                heatmap: true,
                output: None,
            }
        );
    }

    #[test]
    fn test_roster_and_verify() {
        let cli = parse(&["roster", "--min-fga", "7.5"]);
        assert_eq!(
            cli.command,
            Command::Roster {
                last: None,
                min_fga: Some(7.5),
                output: None,
            }
        );
        assert_eq!(parse(&["verify"]).command, Command::Verify);
        assert!(Cli::try_parse_from(["bulls", "dunk-contest"]).is_err());
    }
}
