//! Tracing setup

use crate::config::PlannerConfig;
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber
///
/// `RUST_LOG` wins over `config.log_filter`. Fails if a global subscriber is
/// already set.
pub fn init(config: &PlannerConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_filter))?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_rejected() {
        let config = PlannerConfig::new();
        assert!(init(&config).is_ok());
        assert!(init(&config).is_err());
        tracing::info!("subscriber installed");
    }
}
