use clap::Parser;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "rouillenav", about = "Directory navigation for a FTP server, written in Rust.")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "")]
    pub config: String,

    /// Override the listen port from the configuration file
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}
