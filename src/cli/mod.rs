pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "oa-gen")]
#[command(about = "OA module generator - scaffold CRUD modules from database tables")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Generate a CRUD module for a table and mount its routes")]
    Scaffold(commands::scaffold::ScaffoldArgs),

    #[command(about = "Show how each column of a table would be generated")]
    Describe(commands::describe::DescribeArgs),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Scaffold(args) => commands::scaffold::handle(args, output_format).await,
        Commands::Describe(args) => commands::describe::handle(args, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scaffold_arguments() {
        let cli = Cli::parse_from([
            "oa-gen", "--json", "scaffold", "--name", "通知", "--module", "note", "--table", "oa_note",
            "--controller", "noteController", "--columns", "columns.json",
        ]);
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
        match cli.command {
            Commands::Scaffold(args) => {
                assert_eq!(args.module, "note");
                assert_eq!(args.kind, 0);
                assert_eq!(args.columns.as_deref(), Some(std::path::Path::new("columns.json")));
            }
            Commands::Describe(_) => panic!("expected scaffold"),
        }
    }

    #[test]
    fn parses_describe_arguments() {
        let cli = Cli::parse_from(["oa-gen", "describe", "--table", "oa_note"]);
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Text));
        assert!(matches!(cli.command, Commands::Describe(ref args) if args.table == "oa_note"));
    }
}
