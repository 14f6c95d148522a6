//! Chart updates
//!
//! Applies a release to the chart inside a working copy: chart version,
//! image tags, and a changelog entry.

mod edit;

pub use edit::{
    bump_image_lines, bump_image_tag, bump_version_field, bump_version_lines, changelog_entry,
    prepend_changelog_entry,
};

use crate::error::Result;
use crate::types::ReleaseInfo;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory holding charts, relative to the working copy root
pub const CHARTS_DIR: &str = "charts";

/// Artifact locations of one chart inside a working copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPaths {
    /// Chart directory relative to the working copy root (`charts/<chart>`)
    pub chart_dir: PathBuf,
    /// `Chart.yaml`
    pub manifest: PathBuf,
    /// `values.yaml`
    pub values: PathBuf,
    /// `templates/deployment.yaml`
    pub deployment: PathBuf,
    /// `CHANGELOG.md`
    pub changelog: PathBuf,
}

impl TargetPaths {
    /// Resolve the fixed chart layout under `root`
    pub fn new(root: &Path, chart: &str) -> Self {
        let chart_dir = Path::new(CHARTS_DIR).join(chart);
        let abs = root.join(&chart_dir);
        Self {
            manifest: abs.join("Chart.yaml"),
            values: abs.join("values.yaml"),
            deployment: abs.join("templates").join("deployment.yaml"),
            changelog: abs.join("CHANGELOG.md"),
            chart_dir,
        }
    }
}

/// What [`update_chart`] touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartUpdate {
    /// Version written into the manifest
    pub version: String,
    /// Whether the deployment template was retagged
    pub deployment_updated: bool,
}

/// Apply a release to the chart
///
/// The deployment template is optional: failing to update it is logged and
/// the run continues. Every other artifact failure aborts.
pub fn update_chart(paths: &TargetPaths, release: &ReleaseInfo) -> Result<ChartUpdate> {
    info!(chart = %paths.chart_dir.display(), tag = %release.tag, "updating chart");

    bump_version_field(&paths.manifest, &release.tag)?;
    bump_image_tag(&paths.values, &release.tag)?;

    let deployment_updated = match bump_image_tag(&paths.deployment, &release.tag) {
        Ok(()) => true,
        Err(e) => {
            warn!("skipping deployment template: {e}");
            false
        }
    };

    prepend_changelog_entry(&paths.changelog, &release.tag, &release.notes)?;

    Ok(ChartUpdate {
        version: release.bare_version().to_string(),
        deployment_updated,
    })
}
