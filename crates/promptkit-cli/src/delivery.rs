//! Delivery: hand a compiled prompt to the clipboard and settle its draft

use promptkit::{transfer, ClipboardHost, ClipboardResult, DraftAutosaver, DraftRepository, FormValues};

/// Copy `prompt` through `host`, then settle the draft
///
/// A successful copy ends the draft. If every tier fails the current
/// values are saved so nothing typed is lost.
pub async fn deliver<H, R>(
    host: &H,
    prompt: &str,
    values: &FormValues,
    autosaver: Option<&DraftAutosaver<R>>,
) -> ClipboardResult
where
    H: ClipboardHost,
    R: DraftRepository + 'static,
{
    let result = transfer(host, prompt).await;

    if let Some(autosaver) = autosaver {
        if result.ok {
            autosaver.discard().await;
        } else {
            autosaver.flush(values).await;
        }
    }
    result
}
