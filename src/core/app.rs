use std::path::PathBuf;

use anyhow::Context;

use crate::capture::{Capturer, RegionSelector};
use crate::clipboard::Clipboard;
use crate::config::EditorConfig;
use crate::export::spawn_save;
use crate::session::{EditorSession, InputEvent, SessionOutcome};
use crate::storage::ImageStore;

/// Collaborators used by one capture
pub struct CaptureFlow<'a> {
    pub capturer: &'a dyn Capturer,
    pub selector: &'a dyn RegionSelector,
    /// Receives the saved path when `copy_path_to_clipboard` is set
    pub clipboard: Option<&'a dyn Clipboard>,
    pub config: &'a EditorConfig,
}

/// Capture the screen, let the user pick and annotate a region, then save it.
///
/// Returns the saved path, or `None` when the user cancelled at any step.
/// Capture and save failures are logged and returned; a clipboard failure is
/// only logged since the file already exists.
pub fn run_capture_flow<S>(
    flow: &CaptureFlow<'_>,
    events: impl IntoIterator<Item = InputEvent>,
    store: S,
) -> anyhow::Result<Option<PathBuf>>
where
    S: ImageStore + Send + 'static,
{
    let screen = flow
        .capturer
        .capture_full_screen()
        .inspect_err(|err| log::error!("Failed to capture screen: {err:#}"))?;
    log::debug!("Captured screen {}x{}", screen.width(), screen.height());

    let Some(selection) = flow.selector.select_region(&screen) else {
        log::info!("Region selection cancelled");
        return Ok(None);
    };

    let Some(mut session) = EditorSession::open(screen, selection, flow.config) else {
        log::warn!("Selection {:?} does not overlap the screen", selection);
        return Ok(None);
    };
    session.replay(events);
    if session.outcome() != Some(SessionOutcome::Committed) {
        log::info!("Editing cancelled");
        return Ok(None);
    }

    let path = spawn_save(session.snapshot(), store)
        .recv()
        .context("save worker exited without a result")?
        .inspect_err(|err| log::error!("Failed to save screenshot: {err:#}"))?;

    if flow.config.copy_path_to_clipboard
        && let Some(clipboard) = flow.clipboard
        && let Err(err) = clipboard.set_text(&path.to_string_lossy())
    {
        log::error!("Failed to copy path to clipboard: {err:#}");
    }

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::capture::FixedRegion;
    use crate::config::{ImageFormat, PALETTE};
    use crate::domain::Rect;
    use crate::session::Key;
    use crate::storage::FileStore;

    struct Screen;

    impl Capturer for Screen {
        fn capture_full_screen(&self) -> anyhow::Result<RgbaImage> {
            Ok(RgbaImage::from_pixel(200, 150, Rgba([10, 20, 30, 255])))
        }
    }

    struct NoScreen;

    impl Capturer for NoScreen {
        fn capture_full_screen(&self) -> anyhow::Result<RgbaImage> {
            anyhow::bail!("no outputs")
        }
    }

    #[derive(Default)]
    struct Recorder {
        texts: RefCell<Vec<String>>,
        fail: bool,
    }

    impl Clipboard for Recorder {
        fn set_text(&self, text: &str) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("clipboard unavailable");
            }
            self.texts.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    const REGION: FixedRegion = FixedRegion(Some(Rect::new(20, 10, 120, 90)));

    fn store(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path(), ImageFormat::Png, 90)
    }

    fn confirm() -> Vec<InputEvent> {
        vec![
            // Below both bars, which sit at the top of this small screen
            InputEvent::pointer_down(40, 65),
            InputEvent::pointer_move(80, 85),
            InputEvent::pointer_up(80, 85),
            InputEvent::key(Key::Enter),
        ]
    }

    #[test]
    fn test_committed_flow_saves_and_copies_path() {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = Recorder::default();
        let config = EditorConfig::default();
        let flow = CaptureFlow {
            capturer: &Screen,
            selector: &REGION,
            clipboard: Some(&clipboard),
            config: &config,
        };

        let path = run_capture_flow(&flow, confirm(), store(&dir)).unwrap().unwrap();
        let saved = image::open(&path).unwrap().into_rgba8();
        assert_eq!(saved.dimensions(), (100, 80));
        assert_eq!(saved.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(saved.get_pixel(20, 65).0, PALETTE[0].to_rgba_u8());
        assert_eq!(*clipboard.texts.borrow(), vec![path.to_string_lossy().to_string()]);
    }

    #[test]
    fn test_cancellation_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::default();
        let mut flow = CaptureFlow {
            capturer: &Screen,
            selector: &FixedRegion(None),
            clipboard: None,
            config: &config,
        };
        assert_eq!(run_capture_flow(&flow, confirm(), store(&dir)).unwrap(), None);

        flow.selector = &REGION;
        let escape = [InputEvent::key(Key::Escape)];
        assert_eq!(run_capture_flow(&flow, escape, store(&dir)).unwrap(), None);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_capture_failure_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::default();
        let flow = CaptureFlow {
            capturer: &NoScreen,
            selector: &REGION,
            clipboard: None,
            config: &config,
        };
        let err = run_capture_flow(&flow, confirm(), store(&dir)).unwrap_err();
        assert_eq!(err.to_string(), "no outputs");
    }

    #[test]
    fn test_clipboard_failure_keeps_saved_path() {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = Recorder {
            fail: true,
            ..Default::default()
        };
        let config = EditorConfig::default();
        let flow = CaptureFlow {
            capturer: &Screen,
            selector: &REGION,
            clipboard: Some(&clipboard),
            config: &config,
        };
        let path = run_capture_flow(&flow, confirm(), store(&dir)).unwrap();
        assert!(path.is_some_and(|p| p.exists()));
    }

    #[test]
    fn test_clipboard_skipped_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = Recorder::default();
        let config = EditorConfig {
            copy_path_to_clipboard: false,
            ..Default::default()
        };
        let flow = CaptureFlow {
            capturer: &Screen,
            selector: &REGION,
            clipboard: Some(&clipboard),
            config: &config,
        };
        assert!(run_capture_flow(&flow, confirm(), store(&dir)).unwrap().is_some());
        assert!(clipboard.texts.borrow().is_empty());
    }
}
