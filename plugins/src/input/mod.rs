pub mod cutter;
pub mod private;
pub mod text;

use tracing::{debug, warn};

use geoset_common::GeoError;
use geoset_core::RemoveOutcome;

/// Downgrades a missing remove target to a warning unless `strict`.
///
/// Returns the outcome of the removal, or `None` when the target was missing.
pub(crate) fn tolerate_missing(
    name: &str,
    result: Result<RemoveOutcome, GeoError>,
    strict: bool,
) -> anyhow::Result<Option<RemoveOutcome>> {
    match result {
        Ok(outcome) => {
            match outcome {
                RemoveOutcome::Deleted => debug!("entry {name} deleted"),
                RemoveOutcome::Modified => debug!("entry {name} shrunk"),
            }
            Ok(Some(outcome))
        }
        Err(GeoError::EntryNotFound(name)) if !strict => {
            warn!("entry {name} not found, nothing to remove");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
