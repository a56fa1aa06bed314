//! Slide thumbnail cache for the slide picker.
//!
//! One directory per presentation, named by the BLAKE3 digest of its full
//! path. Slides are exported as `slide_{i}.jpg`; each file is written under
//! a `.partial.jpg` name first and renamed into place, so a reader listing
//! the directory never sees a half-written image. Entries are never
//! invalidated.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, warn};

use crate::error::{DriverResult, ThumbnailError};
use crate::events::{AppEvent, EventPublisher};
use crate::model::{CACHE_DIR, THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH};

/// Cache directory name for a presentation path.
pub fn cache_key(presentation_path: &str) -> String {
    blake3::hash(presentation_path.as_bytes()).to_hex().to_string()
}

/// Renders one slide to an image file.
pub trait SlideExporter {
    /// Export 1-based slide `index` as a JPEG of `width` x `height` to `dest`.
    fn export_slide(&mut self, index: u32, dest: &Path, width: u32, height: u32)
        -> DriverResult<()>;
}

#[derive(Debug, Clone)]
pub struct ThumbnailCache {
    root: PathBuf,
}

impl ThumbnailCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `%APPDATA%/Podium/Cache`.
    pub fn open_default() -> Self {
        Self::new(crate::config::app_dir().join(CACHE_DIR))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    pub fn slide_path(&self, key: &str, index: u32) -> PathBuf {
        self.dir(key).join(format!("slide_{index}.jpg"))
    }

    fn partial_path(&self, key: &str, index: u32) -> PathBuf {
        self.dir(key).join(format!("slide_{index}.partial.jpg"))
    }

    /// Finished thumbnails for `key`, ordered by slide index.
    pub fn list(&self, key: &str) -> Vec<(u32, PathBuf)> {
        let Ok(entries) = fs::read_dir(self.dir(key)) else {
            return Vec::new();
        };
        let mut slides: Vec<(u32, PathBuf)> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let name = e.file_name();
                let index = parse_slide_name(name.to_str()?)?;
                Some((index, e.path()))
            })
            .collect();
        slides.sort_by_key(|(i, _)| *i);
        slides
    }

    /// Export every slide that is not cached yet. Returns how many were
    /// written. A failing slide is logged and skipped.
    pub fn populate(
        &self,
        key: &str,
        slide_count: u32,
        exporter: &mut dyn SlideExporter,
    ) -> Result<usize, ThumbnailError> {
        fs::create_dir_all(self.dir(key))?;
        let mut written = 0;
        for index in 1..=slide_count {
            let dest = self.slide_path(key, index);
            if dest.exists() {
                continue;
            }
            let partial = self.partial_path(key, index);
            match exporter.export_slide(index, &partial, THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT) {
                Ok(()) => {
                    fs::rename(&partial, &dest)?;
                    written += 1;
                }
                Err(e) => {
                    warn!(index, error = %e, "slide export failed");
                    let _ = fs::remove_file(&partial);
                }
            }
        }
        Ok(written)
    }
}

/// `slide_12.jpg` -> 12. Partial files do not match.
fn parse_slide_name(name: &str) -> Option<u32> {
    name.strip_prefix("slide_")?
        .strip_suffix(".jpg")?
        .parse()
        .ok()
}

/// Populate the cache on a background thread.
///
/// `connect` runs on the new thread so the exporter can own thread-bound
/// resources. Completion, successful or not, is signalled exactly once
/// with [`AppEvent::ThumbnailsReady`], flagged by whether any slide is
/// cached afterwards.
pub fn spawn_export<F>(
    cache: ThumbnailCache,
    key: String,
    slide_count: u32,
    connect: F,
    publisher: EventPublisher,
) -> std::io::Result<JoinHandle<()>>
where
    F: FnOnce() -> DriverResult<Box<dyn SlideExporter>> + Send + 'static,
{
    thread::Builder::new()
        .name("thumbnail-export".into())
        .spawn(move || {
            match connect() {
                Ok(mut exporter) => match cache.populate(&key, slide_count, exporter.as_mut()) {
                    Ok(written) => info!(%key, written, "thumbnail export finished"),
                    Err(e) => warn!(%key, error = %e, "thumbnail export aborted"),
                },
                Err(e) => warn!(error = %e, "thumbnail exporter unavailable"),
            }
            let cached = !cache.list(&key).is_empty();
            debug!(%key, cached, "signalling thumbnails ready");
            publisher.publish(AppEvent::ThumbnailsReady {
                cache_key: key,
                cached,
            });
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DriverError;

    struct WriteFiles {
        calls: Vec<u32>,
        fail_on: Option<u32>,
    }

    impl SlideExporter for WriteFiles {
        fn export_slide(
            &mut self,
            index: u32,
            dest: &Path,
            _width: u32,
            _height: u32,
        ) -> DriverResult<()> {
            self.calls.push(index);
            if self.fail_on == Some(index) {
                return Err(DriverError::call("Slide.Export", "boom"));
            }
            fs::write(dest, b"jpg").map_err(|e| DriverError::call("write", e))
        }
    }

    #[test]
    fn key_is_stable_hex() {
        let k = cache_key("C:\\talks\\deck.pptx");
        assert_eq!(k.len(), 64);
        assert_eq!(k, cache_key("C:\\talks\\deck.pptx"));
        assert_ne!(k, cache_key("C:\\talks\\other.pptx"));
    }

    #[test]
    fn parses_only_final_names() {
        assert_eq!(parse_slide_name("slide_3.jpg"), Some(3));
        assert_eq!(parse_slide_name("slide_3.partial.jpg"), None);
        assert_eq!(parse_slide_name("notes.txt"), None);
    }

    #[test]
    fn populate_skips_existing_and_failed() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ThumbnailCache::new(dir.path());
        fs::create_dir_all(cache.dir("k")).unwrap();
        fs::write(cache.slide_path("k", 1), b"old").unwrap();

        let mut exporter = WriteFiles {
            calls: Vec::new(),
            fail_on: Some(3),
        };
        let written = cache.populate("k", 4, &mut exporter).unwrap();
        assert_eq!(written, 2);
        assert_eq!(exporter.calls, vec![2, 3, 4]);

        let listed: Vec<u32> = cache.list("k").into_iter().map(|(i, _)| i).collect();
        assert_eq!(listed, vec![1, 2, 4]);
        assert_eq!(fs::read(cache.slide_path("k", 1)).unwrap(), b"old");
    }

    #[test]
    fn list_of_unknown_key_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ThumbnailCache::new(dir.path()).list("missing").is_empty());
    }
}
