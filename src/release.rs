//! Release resolution
//!
//! Decides which upstream release a run syncs and where its notes come from:
//! explicit tag and notes (offline), explicit tag (notes fetched), or the
//! registry's latest release.

use crate::error::{Error, Result};
use crate::platform::{parse_repo_slug, ReleaseSource};
use crate::types::ReleaseInfo;
use tracing::{debug, info};

/// Resolve the release to sync
///
/// Notes without a tag is rejected before any network access. With both,
/// the pair is returned as given (notes trimmed). Blank tags and blank notes
/// count as not given.
pub async fn resolve_release<S: ReleaseSource + ?Sized>(
    source: &S,
    source_repo: &str,
    tag: Option<&str>,
    notes: Option<&str>,
) -> Result<ReleaseInfo> {
    let tag = tag.map(str::trim).filter(|t| !t.is_empty());
    let notes = notes.filter(|n| !n.trim().is_empty());

    match (tag, notes) {
        (None, Some(_)) => Err(Error::Config(
            "release notes were provided without a release tag".to_string(),
        )),
        (Some(tag), Some(notes)) => {
            debug!(tag, "using release notes provided on the command line");
            Ok(ReleaseInfo {
                tag: tag.to_string(),
                notes: notes.trim().to_string(),
            })
        }
        (Some(tag), None) => {
            let repo = parse_repo_slug(source_repo)?;
            info!(%repo, tag, "fetching release notes");
            let notes = source.release_notes(&repo, tag).await?;
            Ok(ReleaseInfo {
                tag: tag.to_string(),
                notes: notes.trim().to_string(),
            })
        }
        (None, None) => {
            let repo = parse_repo_slug(source_repo)?;
            info!(%repo, "fetching latest release");
            let release = source.latest_release(&repo).await?;
            Ok(ReleaseInfo {
                tag: release.tag.trim().to_string(),
                notes: release.notes.trim().to_string(),
            })
        }
    }
}
