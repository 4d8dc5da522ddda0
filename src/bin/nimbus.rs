use anyhow::Result;
use clap::{Parser, Subcommand};
use nimbus::configuration::Configuration;
use nimbus::main_commands::MainCommands;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "nimbus",
    version,
    about = "Weather station data collection and web publishing daemon"
)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "nimbus.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the publishing daemon
    Run,
    /// Render a single template and print or write the result
    Render {
        template: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print every registered webtag name
    ListTags,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.command {
        Command::ListTags => {
            MainCommands::list_tags();
            Ok(())
        }
        Command::Run => {
            MainCommands::new(Configuration::new_from_file(&cli.config)?)
                .run_daemon()
                .await
        }
        Command::Render { template, output } => {
            MainCommands::new(Configuration::new_from_file(&cli.config)?)
                .render_once(&template, output.as_deref())
                .await
        }
    }
}
