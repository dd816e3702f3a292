//! `dv check` command implementation.

use clap::Args;
use dv_site::PrefixMismatch;

use super::{ChannelArg, SourceArgs, build_all, open_source, select_releases};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Only check releases of this channel.
    #[arg(long, value_enum)]
    channel: Option<ChannelArg>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Builds every release in memory and reports each error and each
    /// navigation group whose pattern does not cover its links.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or discovery fails, or if any
    /// release has an error.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.source.load_config(None)?;
        let source = open_source(&config);
        let (selected, known) = select_releases(&source, self.channel, None)?;
        let total = selected.len();
        let settings = config.site_settings();

        let mut failed = 0;
        let mut warnings = 0;
        for (release, result) in build_all(&source, selected, &known, &settings) {
            let label = release.to_string();
            match result {
                Ok(bundle) => {
                    let mismatches = bundle.nav.prefix_mismatches();
                    for mismatch in &mismatches {
                        output.warning(&format!("{label}: {}", describe_mismatch(mismatch)));
                    }
                    warnings += mismatches.len();
                    if mismatches.is_empty() {
                        output.success(&format!("{label}: ok"));
                    }
                }
                Err(err) => {
                    failed += 1;
                    output.error(&format!("{label}: {err}"));
                }
            }
        }

        output.separator();
        output.info(&format!(
            "{total} release(s) checked, {failed} failed, {warnings} warning(s)"
        ));

        if failed > 0 {
            return Err(CliError::ReleasesFailed { failed, total });
        }
        Ok(())
    }
}

fn describe_mismatch(mismatch: &PrefixMismatch) -> String {
    format!(
        "group {:?} ({}) does not match {}",
        mismatch.title,
        mismatch.group,
        mismatch.hrefs.join(", ")
    )
}
