use crate::facts::FactOptions;

#[derive(Debug, clap::Args)]
pub struct ServeOptions {
    /// Port to listen on
    #[arg(short, long, env = "NUMFACTS_PORT", default_value = "8001")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "NUMFACTS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[clap(flatten)]
    pub facts: FactOptions,
}
