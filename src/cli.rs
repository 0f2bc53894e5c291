use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(version, about = "Backend of the sustainable digital nomads directory")]
pub struct Args {
    /// The port to listen on
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// URL to the database
    #[arg(long, value_name = "DATABASE_URL")]
    pub db_url: Option<String>,

    /// Configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Allow requests from any origin
    #[arg(long)]
    pub enable_cors: bool,
}
