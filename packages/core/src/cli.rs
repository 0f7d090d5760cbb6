use clap::Parser;

/// Disaster prediction service CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "disaster-predict",
    version,
    about = "Classify disaster risk from measurements and manage active warnings"
)]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,
}
