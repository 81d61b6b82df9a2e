use std::error::Error;

use covid_eda::{pipeline, AnalysisConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<(), Box<dyn Error>> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = AnalysisConfig::default();
    info!(?config, "startup");

    pipeline::run(&config)?;

    Ok(())
}
