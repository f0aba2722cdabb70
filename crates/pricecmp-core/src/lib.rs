//! Shared domain types, configuration, and the search-provider seam for
//! `pricecmp`.

pub mod app_config;
pub mod category;
pub mod config;
pub mod offers;
pub mod provider;
pub mod rules;

pub use app_config::{AppConfig, Environment};
pub use category::ProductCategory;
pub use config::{load_app_config, load_app_config_from_env};
pub use offers::{AggregationResult, RawOffer, StoreIdentity, StoreKind, ValidatedOffer};
pub use provider::{SearchProvider, SearchRequest};
pub use rules::{
    load_rule_overrides, parse_rule_overrides, ExtraStore, PriceFloorOverride, RuleOverrides,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rules file {path}: {source}")]
    RulesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file: {0}")]
    RulesFileParse(#[from] serde_yaml::Error),

    #[error("rules validation failed: {0}")]
    Validation(String),
}
