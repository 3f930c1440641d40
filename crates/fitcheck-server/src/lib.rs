//! FitCheck Server
//!
//! HTTP host for the wardrobe classifier and outfit engine. External
//! providers (a Gemini style advisor and OpenWeather) are optional; every
//! endpoint falls back to the local core when they are absent or fail.

pub mod advisor;
pub mod cli;
pub mod config;
pub mod routes;
pub mod state;
pub mod weather;

pub use advisor::{GeminiClient, Recommendation, RecommendedItem, StyleAdvisor, WeatherContext};
pub use cli::Cli;
pub use config::{Mode, ServerConfig};
pub use routes::{create_router, AppError};
pub use state::AppState;
pub use weather::{OpenWeatherClient, WeatherProvider, WeatherReport};
