//! Tests for the background thumbnail export and its completion signal.

use std::fs;
use std::path::Path;

use podium::error::{DriverError, DriverResult};
use podium::events::{AppEvent, EventBus};
use podium::thumbnails::{cache_key, spawn_export, SlideExporter, ThumbnailCache};

struct FileExporter;

impl SlideExporter for FileExporter {
    fn export_slide(
        &mut self,
        index: u32,
        dest: &Path,
        _width: u32,
        _height: u32,
    ) -> DriverResult<()> {
        fs::write(dest, format!("slide {index}")).map_err(|e| DriverError::call("Export", e))
    }
}

#[test]
fn export_fills_cache_then_signals_once() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ThumbnailCache::new(dir.path());
    let key = cache_key("D:\\decks\\quarterly.pptx");
    let bus = EventBus::new();

    let handle = spawn_export(
        cache.clone(),
        key.clone(),
        3,
        || Ok(Box::new(FileExporter) as Box<dyn SlideExporter>),
        bus.publisher(),
    )
    .unwrap();
    handle.join().unwrap();

    assert_eq!(
        bus.drain(),
        vec![AppEvent::ThumbnailsReady {
            cache_key: key.clone(),
            cached: true,
        }]
    );
    let slides: Vec<u32> = cache.list(&key).into_iter().map(|(i, _)| i).collect();
    assert_eq!(slides, vec![1, 2, 3]);
    assert_eq!(
        fs::read_to_string(cache.slide_path(&key, 2)).unwrap(),
        "slide 2"
    );
}

#[test]
fn unavailable_exporter_signals_nothing_cached() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ThumbnailCache::new(dir.path());
    let bus = EventBus::new();

    let handle = spawn_export(
        cache.clone(),
        "k".to_owned(),
        5,
        || Err(DriverError::NotRunning),
        bus.publisher(),
    )
    .unwrap();
    handle.join().unwrap();

    assert_eq!(
        bus.drain(),
        vec![AppEvent::ThumbnailsReady {
            cache_key: "k".to_owned(),
            cached: false,
        }]
    );
    assert!(cache.list("k").is_empty());
}

#[test]
fn second_export_skips_cached_slides() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ThumbnailCache::new(dir.path());
    fs::create_dir_all(cache.dir("k")).unwrap();
    fs::write(cache.slide_path("k", 1), "kept").unwrap();

    let written = cache.populate("k", 2, &mut FileExporter).unwrap();
    assert_eq!(written, 1);
    assert_eq!(fs::read_to_string(cache.slide_path("k", 1)).unwrap(), "kept");
}
