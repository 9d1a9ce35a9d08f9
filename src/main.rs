use anyhow::anyhow;
use controlplane_config::config::load_config;
use controlplane_config::validate;
use tracing::subscriber::set_global_default;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

fn init_logging() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let subscriber = Registry::default().with(env_filter).with(fmt_layer);

    set_global_default(subscriber)?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    let config = load_config(std::env::args().skip(1))?;
    info!(
        format = %config.output_format,
        paths = config.cluster_paths.len(),
        "Validating cluster configs"
    );

    let outcomes = validate::validate_paths(config.cluster_paths).await?;

    let mut failed = 0;
    for outcome in outcomes.iter() {
        if let Err(e) = &outcome.result {
            failed += 1;
            error!(path = %outcome.path.display(), "{:#}", e);
        }
    }

    print!("{}", validate::render(&outcomes, config.output_format)?);

    if failed > 0 {
        return Err(anyhow!(
            "{} of {} cluster configs failed validation",
            failed,
            outcomes.len()
        ));
    }

    info!(count = outcomes.len(), "All cluster configs are valid");

    Ok(())
}
