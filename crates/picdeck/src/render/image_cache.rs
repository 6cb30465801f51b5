use std::cell::RefCell;
use std::collections::HashMap;

use eframe::egui;

use crate::presenter::Presenter;
use crate::presenter::slide::{Slide, SlideSource};
use crate::presenter::timer::Timer;

/// Decoded slide textures, keyed by slide source.
///
/// Failed decodes are cached as `None` so a broken file is reported once
/// instead of every frame. The whole cache is dropped when the presenter
/// loads a new batch, which frees textures of revoked blobs.
pub struct ImageCache {
    generation: u64,
    textures: RefCell<HashMap<String, Option<egui::TextureHandle>>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self {
            generation: 0,
            textures: RefCell::new(HashMap::new()),
        }
    }

    /// Forget all textures if the presenter's slide batch changed.
    pub fn sync<T: Timer>(&mut self, presenter: &Presenter<T>) {
        if presenter.generation() != self.generation {
            self.generation = presenter.generation();
            self.textures.get_mut().clear();
        }
    }

    pub fn get_or_load<T: Timer>(
        &self,
        ui: &egui::Ui,
        presenter: &Presenter<T>,
        slide: &Slide,
    ) -> Option<egui::TextureHandle> {
        let key = slide.source.cache_key();
        if let Some(entry) = self.textures.borrow().get(&key) {
            return entry.clone();
        }

        let max_side = ui.ctx().input(|i| i.max_texture_side);
        let loaded = match load_color_image(presenter, &slide.source, max_side) {
            Ok(image) => Some(ui.ctx().load_texture(
                &key,
                image,
                egui::TextureOptions::LINEAR,
            )),
            Err(e) => {
                log::warn!("Cannot display {}: {e:#}", slide.label);
                None
            }
        };
        self.textures.borrow_mut().insert(key, loaded.clone());
        loaded
    }
}

fn load_color_image<T: Timer>(
    presenter: &Presenter<T>,
    source: &SlideSource,
    max_side: usize,
) -> anyhow::Result<egui::ColorImage> {
    let image = match source {
        SlideSource::Blob(url) => {
            let bytes = presenter
                .blob_bytes(url)
                .ok_or_else(|| anyhow::anyhow!("{url} was revoked"))?;
            image::load_from_memory(&bytes)?
        }
        SlideSource::Asset(path) => image::open(path)
            .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?,
    };
    let mut rgba = image.into_rgba8();
    let (mut w, mut h) = rgba.dimensions();

    let max_side = u32::try_from(max_side).unwrap_or(u32::MAX);
    if let Some((fit_w, fit_h)) = fit_within(w, h, max_side) {
        log::debug!("Downscaling {w}x{h} to {fit_w}x{fit_h}");
        rgba = image::imageops::resize(
            &rgba,
            fit_w,
            fit_h,
            image::imageops::FilterType::Triangle,
        );
        (w, h) = (fit_w, fit_h);
    }
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        [w as usize, h as usize],
        rgba.as_raw(),
    ))
}

/// Size that fits `w`x`h` inside a `max_side` square keeping the aspect
/// ratio, or `None` when it already fits.
fn fit_within(w: u32, h: u32, max_side: u32) -> Option<(u32, u32)> {
    let longest = w.max(h);
    if longest <= max_side || max_side == 0 {
        return None;
    }
    let scale = |side: u32| -> u32 {
        let scaled = u64::from(side) * u64::from(max_side) / u64::from(longest);
        (scaled as u32).max(1)
    };
    Some((scale(w), scale(h)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_within_leaves_small_images() {
        assert_eq!(fit_within(1920, 1080, 8192), None);
        assert_eq!(fit_within(8192, 8192, 8192), None);
    }

    #[test]
    fn test_fit_within_panorama() {
        assert_eq!(fit_within(20000, 1000, 8192), Some((8192, 409)));
    }

    #[test]
    fn test_fit_within_tall_scan() {
        assert_eq!(fit_within(3000, 24000, 16384), Some((2048, 16384)));
    }

    #[test]
    fn test_fit_within_keeps_thin_side_visible() {
        assert_eq!(fit_within(100000, 1, 2048), Some((2048, 1)));
    }

    #[test]
    fn test_downscales_oversized_blob() {
        let mut presenter = Presenter::new("assets/demo");
        let mut png = Vec::new();
        image::RgbaImage::new(40, 10)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        presenter.load_from_files([crate::presenter::ingest::IncomingFile::new(
            "wide.png",
            "image/png",
            png,
        )]);

        let source = &presenter.slides()[0].source;
        let image = load_color_image(&presenter, source, 16).unwrap();
        assert_eq!(image.size, [16, 4]);
    }
}
