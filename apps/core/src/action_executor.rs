use crate::logging;
use crate::remote::{BookmarkSource, RemoteError};
use crate::scheduler::RefreshScheduler;

/// Archives a bookmark and refreshes the index so the change is visible
/// immediately. On failure the store is left untouched.
pub fn archive_bookmark(
    source: &dyn BookmarkSource,
    scheduler: &RefreshScheduler,
    id: &str,
) -> Result<(), RemoteError> {
    logging::debug(&format!("archiving bookmark {id}"));
    match source.archive(id) {
        Ok(()) => {
            scheduler.refresh_now();
            Ok(())
        }
        Err(error) => {
            logging::warn(&format!("archive failed for bookmark {id}: {error}"));
            Err(error)
        }
    }
}

pub fn delete_bookmark(
    source: &dyn BookmarkSource,
    scheduler: &RefreshScheduler,
    id: &str,
) -> Result<(), RemoteError> {
    logging::debug(&format!("deleting bookmark {id}"));
    match source.delete(id) {
        Ok(()) => {
            scheduler.refresh_now();
            Ok(())
        }
        Err(error) => {
            logging::warn(&format!("delete failed for bookmark {id}: {error}"));
            Err(error)
        }
    }
}
