use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::{
    cli::{Cli, Command},
    domain, infra, remote, ui,
    usecases::{
        self, bootstrap,
        probe::{failure_hint, probe},
    },
};

const CHECK_FAILED: &str = "CHECK_FAILED";
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

pub fn run(cli: Cli) -> Result<()> {
    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        remote = remote::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    let context = bootstrap::bootstrap(cli.config.as_deref())?;

    let outcome = match cli.command_or_default() {
        Command::Run => {
            let mut shell = bootstrap::compose_shell(&context);
            ui::shell::start(
                &context,
                shell.event_source.as_mut(),
                shell.orchestrator.as_mut(),
            )
        }
        Command::Check => match probe(context.gateway.as_ref(), context.user_id()) {
            Ok(report) => {
                tracing::info!(conversations = report.conversations, "service check passed");
                println!("{}", report.summary());
                Ok(())
            }
            Err(error) => {
                tracing::warn!(code = CHECK_FAILED, error = error.code(), "service check failed");
                eprintln!("{}: {}", error.code(), failure_hint(error));
                Err(anyhow!("{CHECK_FAILED}: {}", error.code()))
            }
        },
    };

    context.shutdown(SHUTDOWN_GRACE);

    outcome
}
