//! Background flattening and saving

use std::path::PathBuf;

use crossbeam_channel::Receiver;

use crate::session::SceneSnapshot;
use crate::storage::ImageStore;

/// Flatten `snapshot` and hand it to `store` on a worker thread.
///
/// The receiver yields exactly one result.
pub fn spawn_save<S>(snapshot: SceneSnapshot, store: S) -> Receiver<anyhow::Result<PathBuf>>
where
    S: ImageStore + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded(1);
    std::thread::spawn(move || {
        let image = snapshot.flatten();
        log::debug!(
            "Flattened {} annotations onto {}x{}",
            snapshot.annotations.len(),
            image.width(),
            image.height()
        );
        // Receiver may already be gone
        let _ = tx.send(store.save(&image));
    });
    rx
}
