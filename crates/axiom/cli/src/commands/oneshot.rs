//! Single-action commands

use axiom_shell::{ActionOutcome, Shell};

use crate::error::{CliError, CliResult};
use crate::output::{self, OutputFormat};

/// Authorize, synthesize one protocol and print it.
pub async fn generate(shell: Shell, prompt: &str, format: OutputFormat) -> CliResult<()> {
    shell.authorize().await;
    match shell.submit_generate(prompt).await {
        ActionOutcome::Completed(result) => {
            if result.is_sentinel() {
                tracing::warn!(signature = %result.signature, "synthesis returned the failure record");
            }
            output::print_result(&result, format)
        }
        ActionOutcome::Ignored(reason) => Err(CliError::InvalidInput(reason.to_string())),
    }
}

/// Authorize, run one fast query and print the answer.
pub async fn ask(shell: Shell, prompt: &str, format: OutputFormat) -> CliResult<()> {
    shell.authorize().await;
    match shell.submit_fast_query(prompt).await {
        ActionOutcome::Completed(answer) => output::print_text("answer", &answer, format),
        ActionOutcome::Ignored(reason) => Err(CliError::InvalidInput(reason.to_string())),
    }
}
