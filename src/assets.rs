//! Sprite loading.
//!
//! Both images are decoded on a background thread and delivered through a
//! channel, one `AssetEvent` per asset, exactly once.  Receiving the event is
//! the readiness signal.  An image that fails to load is replaced by a plain
//! coloured block so the game remains playable.
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use image::imageops::FilterType;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Castle,
    Knight,
}

impl AssetKind {
    /// Colour of the stand-in block used when the image cannot be read.
    fn fallback_rgb(self) -> [u8; 3] {
        match self {
            AssetKind::Castle => [150, 150, 160],
            AssetKind::Knight => [190, 50, 50],
        }
    }
}

/// An image downsampled to terminal cells; one RGB colour per cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub cols: u16,
    pub rows: u16,
    pub pixels: Vec<[u8; 3]>,
}

impl Sprite {
    pub fn solid(cols: u16, rows: u16, rgb: [u8; 3]) -> Self {
        Self {
            cols,
            rows,
            pixels: vec![rgb; cols as usize * rows as usize],
        }
    }

    pub fn pixel(&self, col: u16, row: u16) -> Option<[u8; 3]> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.pixels
            .get(row as usize * self.cols as usize + col as usize)
            .copied()
    }
}

#[derive(Clone, Debug)]
pub struct AssetRequest {
    pub kind: AssetKind,
    pub path: PathBuf,
    /// Footprint in terminal cells.
    pub cols: u16,
    pub rows: u16,
}

#[derive(Clone, Debug)]
pub struct AssetEvent {
    pub kind: AssetKind,
    pub sprite: Sprite,
}

/// Decode an image and shrink it to `cols` × `rows` cells.
pub fn load_sprite(path: &Path, cols: u16, rows: u16) -> anyhow::Result<Sprite> {
    let cols = cols.max(1);
    let rows = rows.max(1);
    let image = image::open(path)
        .with_context(|| format!("failed to load image {}", path.display()))?;
    let scaled = image
        .resize_exact(cols as u32, rows as u32, FilterType::Triangle)
        .to_rgb8();
    Ok(Sprite {
        cols,
        rows,
        pixels: scaled.pixels().map(|p| p.0).collect(),
    })
}

/// Resolve one request, falling back to a solid block on failure.
pub fn resolve(request: &AssetRequest) -> Sprite {
    match load_sprite(&request.path, request.cols, request.rows) {
        Ok(sprite) => {
            info!(kind = ?request.kind, path = %request.path.display(), "asset loaded");
            sprite
        }
        Err(err) => {
            let error = format!("{err:#}");
            warn!(kind = ?request.kind, %error, "asset unavailable, using fallback");
            Sprite::solid(
                request.cols.max(1),
                request.rows.max(1),
                request.kind.fallback_rgb(),
            )
        }
    }
}

/// Load the requests in order on a background thread; an event is sent as
/// each one finishes.
pub fn spawn_loader(requests: Vec<AssetRequest>) -> mpsc::Receiver<AssetEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for request in requests {
            let sprite = resolve(&request);
            if tx
                .send(AssetEvent {
                    kind: request.kind,
                    sprite,
                })
                .is_err()
            {
                break; // receiver dropped → program exiting
            }
        }
    });
    rx
}
