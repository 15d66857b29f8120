use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, bail};
use snapmark::capture::{FileCapturer, FixedRegion};
use snapmark::clipboard::{Clipboard, SystemClipboard};
use snapmark::config::EditorConfig;
use snapmark::core::{CaptureFlow, run_capture_flow};
use snapmark::domain::{Annotation, Rect};
use snapmark::render::render_scene;
use snapmark::session::InputEvent;
use snapmark::storage::{FileStore, write_png};

const USAGE: &str = "usage:
  snapmark render <base-image> <annotations.json> <out.png>
  snapmark edit <capture-image> <left,top,right,bottom> <events.json>
  snapmark config";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["render", base, scene, out] => render(Path::new(base), Path::new(scene), Path::new(out)),
        ["edit", capture, rect, events] => edit(Path::new(capture), rect, Path::new(events)),
        ["config"] => {
            let Some(path) = EditorConfig::path() else {
                bail!("no config directory available");
            };
            // Write defaults so there is something to edit
            if !path.exists() {
                EditorConfig::load().save();
            }
            println!("{}", path.display());
            Ok(())
        }
        _ => bail!("{USAGE}"),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let data = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
}

/// Flatten a JSON annotation list onto an image
fn render(base: &Path, scene: &Path, out: &Path) -> anyhow::Result<()> {
    let base = image::open(base)
        .with_context(|| format!("opening {}", base.display()))?
        .into_rgba8();
    let annotations: Vec<Annotation> = read_json(scene)?;
    let image = render_scene(&base, &annotations, None);

    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    let mut writer = BufWriter::new(file);
    write_png(&mut writer, &image)?;
    writer
        .flush()
        .with_context(|| format!("writing {}", out.display()))?;
    log::info!("Rendered {} annotations to {}", annotations.len(), out.display());
    Ok(())
}

/// Replay an event script over a capture and save the result
fn edit(capture: &Path, rect: &str, events: &Path) -> anyhow::Result<()> {
    let config = EditorConfig::load();
    let selection = parse_rect(rect)?;
    let events: Vec<InputEvent> = read_json(events)?;

    let clipboard = config
        .copy_path_to_clipboard
        .then(SystemClipboard::new)
        .transpose()
        .inspect_err(|err| log::warn!("Clipboard disabled: {err:#}"))
        .ok()
        .flatten();
    let flow = CaptureFlow {
        capturer: &FileCapturer::new(capture),
        selector: &FixedRegion(Some(selection)),
        clipboard: clipboard.as_ref().map(|c| c as &dyn Clipboard),
        config: &config,
    };

    match run_capture_flow(&flow, events, FileStore::from_config(&config.storage))? {
        Some(path) => println!("{}", path.display()),
        None => println!("cancelled"),
    }
    Ok(())
}

/// Parse `left,top,right,bottom`
fn parse_rect(s: &str) -> anyhow::Result<Rect> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid rectangle {s:?}"))?;
    let [left, top, right, bottom] = values[..] else {
        bail!("rectangle {s:?} needs four values");
    };
    Ok(Rect::new(left, top, right, bottom))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rect() {
        assert_eq!(parse_rect("1, 2,30,40").unwrap(), Rect::new(1, 2, 30, 40));
        assert!(parse_rect("1,2,3").is_err());
        assert!(parse_rect("a,b,c,d").is_err());
    }

    #[test]
    fn test_render_command() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.png");
        let scene = dir.path().join("scene.json");
        let out = dir.path().join("out.png");
        image::RgbaImage::from_pixel(40, 30, image::Rgba([0, 0, 0, 255]))
            .save(&base)
            .unwrap();
        std::fs::write(
            &scene,
            r#"[{"kind": "line", "start": {"x": 0, "y": 15}, "end": {"x": 39, "y": 15},
                 "color": {"r": 255, "g": 255, "b": 255, "a": 255}, "width": 3}]"#,
        )
        .unwrap();

        render(&base, &scene, &out).unwrap();
        let result = image::open(&out).unwrap().into_rgba8();
        assert_eq!(result.get_pixel(20, 15).0, [255, 255, 255, 255]);
        assert_eq!(result.get_pixel(20, 5).0, [0, 0, 0, 255]);
    }
}
