//! `dv build` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use dv_site::{ReleaseBundle, render_config_js};
use dv_storage_fs::ReleaseDir;

use super::{ChannelArg, SourceArgs, build_all, open_source, select_releases};
use crate::error::CliError;
use crate::output::Output;

/// Directory under each release that holds the generated bundle.
const BUNDLE_DIR: &str = "main";

/// Bundle file format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// `config.js` module loaded by the site shell.
    #[default]
    Js,
    /// `bundle.json` with the same content.
    Json,
}

impl OutputFormat {
    fn file_name(self) -> &'static str {
        match self {
            Self::Js => "config.js",
            Self::Json => "bundle.json",
        }
    }

    fn render(self, bundle: &ReleaseBundle) -> Result<String, CliError> {
        match self {
            Self::Js => Ok(render_config_js(bundle)),
            Self::Json => Ok(serde_json::to_string_pretty(bundle)?),
        }
    }
}

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output root for generated bundles (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Only build releases of this channel.
    #[arg(long, value_enum)]
    channel: Option<ChannelArg>,

    /// Only build this release.
    #[arg(short, long)]
    release: Option<String>,

    /// Bundle format.
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// Every selected release is attempted; failures are reported as they
    /// are collected.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or discovery fails, or if any
    /// release failed to build or write.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.source.load_config(self.output_dir)?;
        let source = open_source(&config);
        let output_dir = &config.docs_resolved.output_dir;

        output.info(&format!("Source: {}", source.root().display()));
        output.info(&format!("Output: {}", output_dir.display()));

        let (selected, known) =
            select_releases(&source, self.channel, self.release.as_deref())?;
        if selected.is_empty() {
            output.warning("No releases found");
            return Ok(());
        }

        let total = selected.len();
        let settings = config.site_settings();
        let mut failed = 0;
        for (release, result) in build_all(&source, selected, &known, &settings) {
            let written = result
                .and_then(|bundle| write_bundle(output_dir, &release, &bundle, self.format));
            match written {
                Ok(path) => output.success(&format!("{release}: {}", path.display())),
                Err(err) => {
                    failed += 1;
                    output.error(&format!("{release}: {err}"));
                }
            }
        }

        if failed > 0 {
            return Err(CliError::ReleasesFailed { failed, total });
        }
        output.highlight(&format!("Built {total} release(s)"));
        Ok(())
    }
}

/// Path of a release's bundle under `output_dir`, mirroring its source directory.
fn bundle_path(output_dir: &Path, release: &ReleaseDir, format: OutputFormat) -> PathBuf {
    output_dir
        .join(release.channel.dir_name())
        .join(&release.dir_name)
        .join(BUNDLE_DIR)
        .join(format.file_name())
}

/// Render and write one bundle, returning the written path.
fn write_bundle(
    output_dir: &Path,
    release: &ReleaseDir,
    bundle: &ReleaseBundle,
    format: OutputFormat,
) -> Result<PathBuf, CliError> {
    let path = bundle_path(output_dir, release, format);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, format.render(bundle)?)?;
    tracing::debug!(path = %path.display(), "Wrote bundle");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use dv_site::{Channel, ContentRef, PageDefinition, PageMeta, SiteSettings};
    use pretty_assertions::assert_eq;

    use super::*;

    fn release(channel: Channel, id: &str) -> ReleaseDir {
        ReleaseDir {
            channel,
            dir_name: id.to_owned(),
            release: id.to_owned(),
        }
    }

    fn bundle() -> ReleaseBundle {
        let pages = vec![PageDefinition::new(
            "/docs/about/01_overview",
            PageMeta::titled("Overview"),
            ContentRef("pages/docs/about/01_overview.js".to_owned()),
        )];
        ReleaseBundle::build(
            "3.5.0",
            &["3.5.0".to_owned()],
            &SiteSettings::default(),
            &pages,
            &[],
        )
        .unwrap()
    }

    #[test]
    fn test_bundle_path() {
        let path = bundle_path(
            Path::new("/out"),
            &release(Channel::Unstable, "4.0.0"),
            OutputFormat::Js,
        );

        assert_eq!(path, PathBuf::from("/out/docs-unstable/4.0.0/main/config.js"));
    }

    #[test]
    fn test_bundle_path_uses_directory_name() {
        let snapshot = ReleaseDir {
            dir_name: "snapshot".to_owned(),
            ..release(Channel::Stable, "3.4.1")
        };

        let path = bundle_path(Path::new("/out"), &snapshot, OutputFormat::Js);

        assert_eq!(path, PathBuf::from("/out/docs/snapshot/main/config.js"));
    }

    #[test]
    fn test_write_bundle_js() {
        let temp_dir = tempfile::tempdir().unwrap();

        let path = write_bundle(
            temp_dir.path(),
            &release(Channel::Stable, "3.5.0"),
            &bundle(),
            OutputFormat::Js,
        )
        .unwrap();

        assert_eq!(path, temp_dir.path().join("docs/3.5.0/main/config.js"));
        let written = fs::read_to_string(path).unwrap();
        assert_eq!(written, render_config_js(&bundle()));
    }

    #[test]
    fn test_write_bundle_json() {
        let temp_dir = tempfile::tempdir().unwrap();

        let path = write_bundle(
            temp_dir.path(),
            &release(Channel::Stable, "3.5.0"),
            &bundle(),
            OutputFormat::Json,
        )
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["config"]["release"], "3.5.0");
        assert_eq!(value["config"]["home"], "docs/about/01_overview");
    }
}
