use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "box-shipper")]
#[command(about = "Record shipping boxes and their shipping cost")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Price and save a new box
    Add {
        #[arg(short, long)]
        receiver: String,

        /// Weight in kilograms
        #[arg(short, long, allow_negative_numbers = true)]
        weight: f64,

        /// Color as r,g,b or #rrggbb
        #[arg(long, default_value = "255,255,255")]
        color: String,

        /// Destination code (SWEDEN, CHINA, BRAZIL, AUSTRALIA)
        #[arg(short, long, default_value = "SWEDEN")]
        destination: String,
    },

    /// Show the cost of a box without saving it
    Estimate {
        #[arg(short, long, allow_negative_numbers = true)]
        weight: f64,

        #[arg(short, long, default_value = "SWEDEN")]
        destination: String,
    },

    /// List saved boxes, most recent first
    List {
        /// Write CSV to stdout instead of a table
        #[arg(long)]
        csv: bool,
    },

    /// Show supported destinations and their price per kg
    Countries,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = CliConfig::parse_from([
            "box-shipper",
            "add",
            "--receiver",
            "Alice",
            "--weight",
            "2.5",
            "--color",
            "#ff0000",
            "--destination",
            "CHINA",
            "--verbose",
        ]);

        assert!(cli.verbose);
        match cli.command {
            Command::Add {
                receiver,
                weight,
                color,
                destination,
            } => {
                assert_eq!(receiver, "Alice");
                assert_eq!(weight, 2.5);
                assert_eq!(color, "#ff0000");
                assert_eq!(destination, "CHINA");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_csv() {
        let cli = CliConfig::parse_from(["box-shipper", "--config", "boxes.toml", "list", "--csv"]);
        assert_eq!(cli.config, Some(PathBuf::from("boxes.toml")));
        assert!(matches!(cli.command, Command::List { csv: true }));
    }
}
