use crate::prelude::*;
use clap::Parser;

mod classify;
mod error;
mod facts;
mod prelude;
mod server;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Mathematical properties and fun facts for integers"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "NUMFACTS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Serve the number classification HTTP API
    Serve(crate::server::ServeOptions),

    /// Classify a single number and print its properties
    Classify(crate::classify::ClassifyOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Serve(options) => crate::server::run(options, app.global).await,
        SubCommands::Classify(options) => crate::classify::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
