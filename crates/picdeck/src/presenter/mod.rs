pub mod blob;
pub mod ingest;
pub mod slide;
pub mod timer;


use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::fullscreen::FullscreenSurface;

use blob::{BlobStore, BlobUrl};
use ingest::IncomingFile;
use slide::{Slide, SlideSource};
use timer::{IntervalTimer, Timer, TimerHandle};

pub const MIN_INTERVAL_MS: u32 = 800;
pub const MAX_INTERVAL_MS: u32 = 6000;
pub const INTERVAL_STEP_MS: u32 = 200;
pub const DEFAULT_INTERVAL_MS: u32 = 2500;

pub const DEFAULT_DEMO_DIR: &str = "assets/demo";

/// Demo file names, in display order.
pub const DEMO_FILES: [&str; 7] = [
    "imagen-1.webp",
    "imagen-2.webp",
    "imagen-3.webp",
    "imagen-4.webp",
    "imagen-5.webp",
    "imagen-6.webp",
    "imagen-7.webp",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

pub fn clamp_interval_ms(ms: u32) -> u32 {
    ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS)
}

/// Slideshow state and behavior.
///
/// Playing is represented by holding a timer handle, so there is never a
/// timer without playback or playback without a timer.
pub struct Presenter<T: Timer = IntervalTimer> {
    slides: Vec<Slide>,
    current: usize,
    interval_ms: u32,
    timer: T,
    active: Option<TimerHandle>,
    blobs: BlobStore,
    demo_dir: PathBuf,
    generation: u64,
}

impl Presenter<IntervalTimer> {
    pub fn new(demo_dir: impl Into<PathBuf>) -> Self {
        Self::with_timer(IntervalTimer::default(), demo_dir)
    }
}

impl<T: Timer> Presenter<T> {
    pub fn with_timer(timer: T, demo_dir: impl Into<PathBuf>) -> Self {
        Self {
            slides: Vec::new(),
            current: 0,
            interval_ms: DEFAULT_INTERVAL_MS,
            timer,
            active: None,
            blobs: BlobStore::new(),
            demo_dir: demo_dir.into(),
            generation: 0,
        }
    }

    // --- Ingestion ---

    /// Replace the slides with the image files among `files`.
    /// Returns how many files were accepted.
    pub fn load_from_files(&mut self, files: impl IntoIterator<Item = IncomingFile>) -> usize {
        self.unload();
        for file in files {
            if !file.is_image() {
                log::debug!("Skipping {} ({})", file.name, file.mime);
                continue;
            }
            let url = self.blobs.create(file.bytes);
            self.slides.push(Slide::from_blob(url, file.name));
        }
        self.current = 0;
        log::info!("Loaded {} slide(s)", self.slides.len());
        self.slides.len()
    }

    pub fn load_demo(&mut self) {
        self.unload();
        let dir = self.demo_dir.clone();
        self.slides = DEMO_FILES
            .iter()
            .map(|name| Slide::from_asset(&dir, name))
            .collect();
        self.current = 0;
        log::info!("Loaded demo slides from {}", dir.display());
    }

    /// Drop every slide, revoking transient data, and stop playback.
    pub fn unload(&mut self) {
        for slide in self.slides.drain(..) {
            if let SlideSource::Blob(url) = slide.source {
                self.blobs.revoke(url);
            }
        }
        self.pause();
        self.generation += 1;
    }

    // --- Playback ---

    pub fn play(&mut self) {
        if self.slides.is_empty() {
            return;
        }
        if let Some(handle) = self.active.take() {
            self.timer.stop(handle);
        }
        let interval = Duration::from_millis(u64::from(self.interval_ms));
        self.active = Some(self.timer.start(interval));
        log::debug!("Playing every {} ms", self.interval_ms);
    }

    pub fn pause(&mut self) {
        if let Some(handle) = self.active.take() {
            self.timer.stop(handle);
            log::debug!("Paused");
        }
    }

    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Advance once per timer tick that elapsed since the last call.
    pub fn tick(&mut self) -> u32 {
        let Some(handle) = &self.active else {
            return 0;
        };
        let ticks = self.timer.take_ticks(handle);
        for _ in 0..ticks {
            self.advance(Direction::Forward);
        }
        ticks
    }

    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.active
            .as_ref()
            .and_then(|handle| self.timer.time_until_next(handle))
    }

    pub fn state(&self) -> PlaybackState {
        if self.active.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Idle
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state() == PlaybackState::Playing
    }

    /// Set the interval, clamped to the supported range. A running timer
    /// keeps its old interval until the next [`Presenter::play`].
    pub fn set_interval_ms(&mut self, ms: u32) {
        self.interval_ms = clamp_interval_ms(ms);
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    // --- Navigation ---

    pub fn advance(&mut self, direction: Direction) {
        let len = self.slides.len();
        if len == 0 {
            return;
        }
        self.current = match direction {
            Direction::Forward => (self.current + 1) % len,
            Direction::Backward => (self.current + len - 1) % len,
        };
    }

    pub fn next(&mut self) {
        self.advance(Direction::Forward);
    }

    pub fn prev(&mut self) {
        self.advance(Direction::Backward);
    }

    // --- Presentation ---

    /// Best effort: failures are logged and otherwise ignored.
    pub fn toggle_fullscreen(&self, surface: &mut impl FullscreenSurface) {
        let target = !surface.is_fullscreen();
        if let Err(e) = surface.set_fullscreen(target) {
            log::debug!("Fullscreen toggle ignored: {e}");
        }
    }

    // --- Accessors ---

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.current)
    }

    /// Fraction shown by the progress bar: `(current + 1) / len`.
    pub fn progress(&self) -> f32 {
        if self.slides.is_empty() {
            0.0
        } else {
            (self.current + 1) as f32 / self.slides.len() as f32
        }
    }

    /// Identifies the current slide batch; bumped on every load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn blob_bytes(&self, url: &BlobUrl) -> Option<Arc<[u8]>> {
        self.blobs.get(url)
    }

    pub fn live_blob_count(&self) -> usize {
        self.blobs.live_count()
    }

    #[cfg(test)]
    pub(crate) fn timer(&self) -> &T {
        &self.timer
    }
}

impl<T: Timer> Drop for Presenter<T> {
    fn drop(&mut self) {
        self.unload();
    }
}
