// File loading runs off the ui thread: each request gets a short-lived worker
// thread and the outcome comes back over a channel, drained once per frame.
// Nothing cancels a superseded request, so the last one to finish wins.

use std::path::{Path, PathBuf};

use crossbeam_channel::Sender;

use crate::error::LoadError;
use crate::model::{LoadedSample, Thumbnail};
use crate::shared::PadId;

pub mod image_loader;
pub mod sample_loader;

const SAMPLE_EXTENSIONS: &[&str] = &["wav"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadKind {
    Sample,
    Image,
}

impl LoadKind {
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            LoadKind::Sample => SAMPLE_EXTENSIONS,
            LoadKind::Image => IMAGE_EXTENSIONS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoadKind::Sample => "Audio",
            LoadKind::Image => "Image",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadRequest {
    pub pad: PadId,
    pub kind: LoadKind,
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum Loaded {
    Sample(LoadedSample),
    Image { name: String, thumbnail: Thumbnail },
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub request: LoadRequest,
    pub result: Result<Loaded, LoadError>,
}

// decode on the calling thread; spawn_load wraps this
pub fn run_load(request: &LoadRequest, sample_rate: u32) -> Result<Loaded, LoadError> {
    match request.kind {
        LoadKind::Sample => sample_loader::load(&request.path, sample_rate).map(Loaded::Sample),
        LoadKind::Image => image_loader::load(&request.path).map(|thumbnail| Loaded::Image {
            name: sample_loader::display_name(&request.path),
            thumbnail,
        }),
    }
}

pub fn spawn_load(request: LoadRequest, sample_rate: u32, tx: Sender<LoadOutcome>) {
    log::debug!("loading {} for pad {}", request.path.display(), request.pad);
    let (fallback, fallback_tx) = (request.clone(), tx.clone());
    let spawned = std::thread::Builder::new()
        .name(format!("load-{}", request.pad))
        .spawn(move || {
            let result = run_load(&request, sample_rate);
            let _ = tx.send(LoadOutcome { request, result });
        });
    if let Err(e) = spawned {
        log::error!("could not start loader thread: {e}");
        report_spawn_failure(fallback, e, &fallback_tx);
    }
}

// the pad still gets its error message when no thread could run the load
fn report_spawn_failure(request: LoadRequest, err: std::io::Error, tx: &Sender<LoadOutcome>) {
    let _ = tx.send(LoadOutcome { request, result: Err(LoadError::Io(err)) });
}

// not recursive, extension match ignores case
pub fn index_files_in_dir(dir: &Path, extensions: &[&str]) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.iter().any(|want| ext.eq_ignore_ascii_case(want)))
        })
        .collect();
    files.sort_by_key(|p| p.file_name().map(|n| n.to_ascii_lowercase()));
    Ok(files)
}
