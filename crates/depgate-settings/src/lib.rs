//! Config parsing and input resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::DepgateConfigV1;
pub use resolve::{ConfigError, Overrides, ResolvedConfig};

/// Parse `depgate.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> Result<DepgateConfigV1, ConfigError> {
    let cfg: DepgateConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (inputs over config file over defaults).
pub fn resolve_config(
    cfg: DepgateConfigV1,
    overrides: Overrides,
) -> Result<ResolvedConfig, ConfigError> {
    resolve::resolve_config(cfg, overrides)
}
