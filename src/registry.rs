//! Provider registry.
//!
//! Maps a configuration-selected provider name to a constructor producing a
//! ready-to-use [`FlowRunner`]. The table is a static list; nothing mutates
//! it at runtime.

use crate::config::Config;
use crate::error::UnsupportedProvider;
use crate::provider::sansgetirsin::SansGetirSin;
use crate::provider::FlowRunner;
use tracing::info;

type Constructor = fn(&Config) -> Box<dyn FlowRunner>;

const PROVIDERS: &[(&str, Constructor)] = &[
    ("sansgetirsin", build_sansgetirsin),
    // other aggregators...
];

fn build_sansgetirsin(config: &Config) -> Box<dyn FlowRunner> {
    Box::new(SansGetirSin::from_config(&config.sansgetirsin))
}

/// Construct the flow runner registered under `name`. Nothing is built when
/// the name is unknown.
pub fn flow_runner(
    name: &str,
    config: &Config,
) -> Result<Box<dyn FlowRunner>, UnsupportedProvider> {
    match PROVIDERS.iter().find(|(candidate, _)| *candidate == name) {
        Some((_, constructor)) => {
            info!("Using aggregator: {}", name);
            Ok(constructor(config))
        }
        None => Err(UnsupportedProvider(name.to_string())),
    }
}

/// The provider names this build knows about, for error reporting.
pub fn known_providers() -> Vec<&'static str> {
    PROVIDERS.iter().map(|(name, _)| *name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CallbackConfig, DatabaseConfig, SansGetirSinConfig};

    fn test_config() -> Config {
        Config {
            aggregator: "sansgetirsin".to_string(),
            database: DatabaseConfig {
                protocol: "mongodb://".to_string(),
                host: "localhost".to_string(),
                port: "27017".to_string(),
                name: "payments".to_string(),
            },
            callback: CallbackConfig {
                url: String::new(),
                listen_host: "127.0.0.1".to_string(),
                listen_port: 8080,
            },
            sansgetirsin: SansGetirSinConfig {
                key: "sandbox".to_string(),
                username: "merchant".to_string(),
                api_key: "key".to_string(),
                user_id: "u-1".to_string(),
                payment_method: 1.0,
                max_withdraw_limit: 1000.0,
                timeout_seconds: 30,
            },
        }
    }

    #[test]
    fn test_known_provider_constructs() {
        let runner = flow_runner("sansgetirsin", &test_config());
        assert!(runner.is_ok());
    }

    #[test]
    fn test_unknown_provider_constructs_nothing() {
        let err = flow_runner("acmepay", &test_config()).unwrap_err();
        assert_eq!(err.0, "acmepay");
    }

    #[test]
    fn test_known_providers_listing() {
        assert_eq!(known_providers(), vec!["sansgetirsin"]);
    }
}
