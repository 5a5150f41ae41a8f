use tracing::{info, warn};

use reading_core::model::SessionId;
use storage::repository::{SessionHintRepository, StorageError};

use crate::backend::ExamBackend;

/// End an attempt left behind by a previous run and clear its hint.
///
/// Ending the backend session is best-effort; the hint is cleared either way.
/// Returns the id that was found, if any.
///
/// # Errors
///
/// Returns `StorageError` if the hint cannot be read or cleared.
pub async fn recover_abandoned_session(
    backend: &dyn ExamBackend,
    hints: &dyn SessionHintRepository,
) -> Result<Option<SessionId>, StorageError> {
    let Some(hint) = hints.load_hint().await? else {
        return Ok(None);
    };

    info!(session_id = %hint.session_id, started_at = %hint.started_at, "found abandoned session");
    if let Err(err) = backend.end_session(&hint.session_id).await {
        warn!(error = %err, session_id = %hint.session_id, "failed to end abandoned session");
    }
    hints.clear_hint().await?;
    Ok(Some(hint.session_id))
}
