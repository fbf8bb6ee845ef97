//! Effective configuration display

use axiom_client::{api_key_from_env, AUTH_ENV_VAR};
use serde::Serialize;

use crate::config::AxiomConfig;
use crate::error::CliResult;
use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize)]
struct ConfigView<'a> {
    #[serde(flatten)]
    config: &'a AxiomConfig,
    api_key_env: &'static str,
    api_key_present: bool,
}

/// Print the configuration without ever revealing the API key
pub fn show(config: &AxiomConfig, format: OutputFormat) -> CliResult<()> {
    let view = ConfigView {
        config,
        api_key_env: AUTH_ENV_VAR,
        api_key_present: !api_key_from_env().is_empty(),
    };
    output::print_single(&view, format)
}
