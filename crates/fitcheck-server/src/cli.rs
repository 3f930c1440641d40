use crate::config::Mode;
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "fitcheck")]
#[command(author, version, about = "FitCheck wardrobe classification and outfit service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/fitcheck.yaml")]
    pub config: String,

    /// Listen address
    #[arg(short = 'l', long, default_value = "0.0.0.0")]
    pub listen: String,

    /// Listen port
    #[arg(short = 'P', long, default_value = "5000")]
    pub port: u16,

    /// Service mode; overrides the config file
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Gemini API key for the style advisor
    #[arg(long)]
    pub gemini_api_key: Option<String>,

    /// OpenWeather API key for live weather
    #[arg(long)]
    pub weather_api_key: Option<String>,

    /// Fixed seed for outfit assembly
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
