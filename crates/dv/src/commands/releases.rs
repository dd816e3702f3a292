//! `dv releases` command implementation.

use clap::Args;
use dv_site::{Channel, ReleaseCatalog};

use super::{ChannelArg, SourceArgs, build_all, open_source, select_releases};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the releases command.
#[derive(Args)]
pub(crate) struct ReleasesArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Only list releases of this channel.
    #[arg(long, value_enum)]
    channel: Option<ChannelArg>,

    /// Resolve a release identifier and print its home route.
    #[arg(long, value_name = "RELEASE")]
    resolve: Option<String>,
}

impl ReleasesArgs {
    /// Execute the releases command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or discovery fails, or if the
    /// release passed to `--resolve` does not exist.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.source.load_config(None)?;
        let source = open_source(&config);
        let (selected, known) = select_releases(&source, self.channel, None)?;

        let Some(requested) = self.resolve else {
            for channel in Channel::ALL {
                let mut releases = selected.iter().filter(|r| r.channel == channel).peekable();
                if releases.peek().is_none() {
                    continue;
                }
                output.heading(&format!("{channel}:"));
                for release in releases {
                    if release.dir_name == release.release {
                        output.item(&format!("  {}", release.release));
                    } else {
                        output.item(&format!("  {} ({})", release.release, release.dir_name));
                    }
                }
            }
            return Ok(());
        };

        let mut catalog = ReleaseCatalog::new();
        for (release, result) in build_all(&source, selected, &known, &config.site_settings()) {
            match result {
                Ok(bundle) => catalog.insert(release.channel, bundle),
                Err(err) => output.warning(&format!("{release} skipped: {err}")),
            }
        }

        let bundle = catalog.resolve(&requested)?;
        let channel = if catalog.get(Channel::Stable, &requested).is_some() {
            Channel::Stable
        } else {
            Channel::Unstable
        };
        output.item(&format!(
            "{} ({channel}): home {}",
            bundle.config.release,
            bundle.config.home_path()
        ));
        Ok(())
    }
}
