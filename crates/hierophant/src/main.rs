//! Hierophant - Entry Point
//!
//! Loads configuration, initializes logging, wires the demo modules into a
//! container and resolves them.

use clap::Parser;
use hierophant::demo::{self, Converse};
use hierophant_infrastructure::config::ConfigLoader;
use hierophant_infrastructure::logging::init_logging;

/// Command line interface for Hierophant
#[derive(Parser, Debug)]
#[command(name = "hierophant")]
#[command(about = "Hierophant - Composable service-resolution registry demo")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Messages passed to the conversation function
    #[arg(default_values_t = [String::from("Hello"), String::from("World")])]
    pub messages: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(&config.logging)?;

    let (container, keys) = demo::container(config.container);

    let converse = container.resolve_as::<Converse>(&keys.converse)?;
    let messages: Vec<&str> = cli.messages.iter().map(String::as_str).collect();
    println!("{}", converse(messages.as_slice()));

    let greeting = container.resolve_as::<String>(&keys.greeting)?;
    println!("{greeting}");

    print!("{}", container.report());
    Ok(())
}
