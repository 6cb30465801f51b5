use eframe::egui;
use std::path::PathBuf;

use crate::cli::LaunchOptions;
use crate::config::Config;
use crate::fullscreen::EguiViewport;
use crate::presenter::{
    self, DEFAULT_DEMO_DIR, INTERVAL_STEP_MS, MAX_INTERVAL_MS, MIN_INTERVAL_MS, Presenter,
    ingest,
};
use crate::render;
use crate::render::image_cache::ImageCache;
use crate::render::transition::Fade;
use crate::shortcuts::{Shortcut, ShortcutListener};
use crate::theme::Theme;

const DEFAULT_TITLE: &str = "PicDeck";
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];
const STAGE_ASPECT: egui::Vec2 = egui::vec2(16.0, 9.0);
const STAGE_PADDING: f32 = 24.0;

struct PresentationApp {
    presenter: Presenter,
    shortcuts: ShortcutListener,
    image_cache: ImageCache,
    theme: Theme,
    title: String,
    fade: Option<Fade>,
    /// Index drawn last frame, used to start a fade when it changes
    shown_index: usize,
    shown_generation: u64,
}

impl PresentationApp {
    fn new(presenter: Presenter, theme: Theme, title: String) -> Self {
        let mut shortcuts = ShortcutListener::new();
        shortcuts.attach();
        let shown_index = presenter.current_index();
        let shown_generation = presenter.generation();
        Self {
            presenter,
            shortcuts,
            image_cache: ImageCache::new(),
            theme,
            title,
            fade: None,
            shown_index,
            shown_generation,
        }
    }

    fn apply_shortcut(&mut self, ctx: &egui::Context, shortcut: Shortcut) {
        match shortcut {
            Shortcut::TogglePlayback => self.presenter.toggle(),
            Shortcut::Next => self.presenter.next(),
            Shortcut::Previous => self.presenter.prev(),
            Shortcut::ToggleFullscreen => {
                self.presenter
                    .toggle_fullscreen(&mut EguiViewport::new(ctx));
            }
        }
    }

    fn open_file_dialog(&mut self) {
        let Some(paths) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_files()
        else {
            return;
        };
        self.load_files(ingest::read_files(&paths));
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }
        let files: Vec<_> = dropped.iter().filter_map(ingest::from_dropped).collect();
        self.load_files(files);
    }

    fn load_files(&mut self, files: Vec<ingest::IncomingFile>) {
        let accepted = self.presenter.load_from_files(files);
        if accepted == 0 {
            log::warn!("None of the selected files are images");
        }
        log::debug!("{} blob(s) live", self.presenter.live_blob_count());
    }

    /// Start a cross-fade whenever the visible slide changes. A new batch
    /// of slides shows immediately, without fading.
    fn track_slide_change(&mut self) {
        let generation = self.presenter.generation();
        let index = self.presenter.current_index();
        if generation != self.shown_generation {
            self.shown_generation = generation;
            self.shown_index = index;
            self.fade = None;
            return;
        }
        if index != self.shown_index {
            self.fade = Some(Fade::new(self.shown_index, index));
            self.shown_index = index;
        }
        if self.fade.is_some_and(|f| f.is_complete()) {
            self.fade = None;
        }
    }

    fn draw_header(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let theme = self.theme.clone();
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(&self.title)
                    .size(20.0)
                    .strong()
                    .color(theme.heading_color),
            );
            ui.label(
                egui::RichText::new("Presentation")
                    .size(11.0)
                    .color(theme.badge),
            );

            // Right-to-left: widgets are added from the right edge inwards
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut interval = self.presenter.interval_ms();
                let slider = egui::Slider::new(&mut interval, MIN_INTERVAL_MS..=MAX_INTERVAL_MS)
                    .step_by(f64::from(INTERVAL_STEP_MS))
                    .suffix(" ms");
                if ui.add(slider).changed() {
                    self.presenter.set_interval_ms(interval);
                }
                ui.label(
                    egui::RichText::new("Speed")
                        .size(12.0)
                        .color(Theme::with_opacity(theme.foreground, 0.7)),
                );

                if ui.button("Fullscreen").clicked() {
                    self.presenter
                        .toggle_fullscreen(&mut EguiViewport::new(ctx));
                }
                if ui.button("\u{203A}").on_hover_text("Next").clicked() {
                    self.presenter.next();
                }
                if ui.button("\u{2039}").on_hover_text("Previous").clicked() {
                    self.presenter.prev();
                }

                let play_label = if self.presenter.is_playing() {
                    "Pause"
                } else {
                    "Play"
                };
                let play = egui::Button::new(
                    egui::RichText::new(play_label).color(egui::Color32::WHITE),
                )
                .fill(theme.accent);
                if ui.add(play).clicked() {
                    self.presenter.toggle();
                }

                if ui.button("Demo").clicked() {
                    self.presenter.load_demo();
                }
                if ui.button("Upload images").clicked() {
                    self.open_file_dialog();
                }
            });
        });
    }

    fn draw_stage(&mut self, ui: &mut egui::Ui) {
        let available = ui.max_rect();
        let stage = render::contain_rect(STAGE_ASPECT, available);

        let response = ui
            .interact(stage, ui.id().with("stage"), egui::Sense::click())
            .on_hover_text(stage_hint());
        if response.clicked() {
            self.presenter.toggle();
        }

        ui.painter().rect_filled(stage, 16.0, self.theme.stage);
        ui.painter().rect_stroke(
            stage,
            16.0,
            egui::Stroke::new(1.0, self.theme.border),
            egui::StrokeKind::Inside,
        );

        let mut stage_ui =
            ui.new_child(egui::UiBuilder::new().max_rect(stage).id_salt("stage_clip"));
        stage_ui.set_clip_rect(stage);
        let content = stage.shrink(STAGE_PADDING);

        match self.fade {
            Some(fade) => {
                let t = fade.progress();
                self.draw_slide(&stage_ui, fade.from, content, 1.0 - t);
                self.draw_slide(&stage_ui, fade.to, content, t);
            }
            None => {
                self.draw_slide(&stage_ui, self.presenter.current_index(), content, 1.0);
            }
        }

        if let Some(slide) = self.presenter.current_slide() {
            render::draw_caption(&stage_ui, stage, &slide.label, &self.theme);
        }
        render::draw_progress_bar(&stage_ui, stage, self.presenter.progress(), &self.theme);

        if !self.presenter.is_playing() {
            render::draw_hint(
                &stage_ui,
                stage,
                self.presenter.slide_count() > 0,
                &self.theme,
            );
        }
    }

    fn draw_slide(&self, ui: &egui::Ui, index: usize, rect: egui::Rect, opacity: f32) {
        render::draw_slide(
            ui,
            &self.presenter,
            &self.image_cache,
            index,
            rect,
            opacity,
            &self.theme,
        );
    }

    fn draw_footer(&self, ui: &mut egui::Ui) {
        let muted = Theme::with_opacity(self.theme.foreground, 0.8);
        let count = self.presenter.slide_count();
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Images:").color(muted));
            ui.label(
                egui::RichText::new(count.to_string())
                    .strong()
                    .color(self.theme.foreground),
            );

            if count > 0 {
                ui.add_space(24.0);
                ui.label(egui::RichText::new("Showing").color(muted));
                ui.label(
                    egui::RichText::new((self.presenter.current_index() + 1).to_string())
                        .strong()
                        .color(self.theme.foreground),
                );
                ui.label(egui::RichText::new(format!("/ {count}")).color(muted));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let keys = Shortcut::ALL
                    .iter()
                    .map(|s| s.key_label())
                    .collect::<Vec<_>>()
                    .join(", ");
                let faint = Theme::with_opacity(self.theme.foreground, 0.56);
                ui.label(egui::RichText::new(keys).color(faint));
                ui.label(egui::RichText::new("Shortcuts:").color(muted));
            });
        });
    }
}

fn stage_hint() -> String {
    let mut parts = vec!["Click: play/pause".to_string()];
    parts.extend(
        Shortcut::ALL
            .iter()
            .map(|s| format!("{}: {}", s.key_label(), s.description())),
    );
    parts.join(" \u{00B7} ")
}

impl eframe::App for PresentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for shortcut in self.shortcuts.poll(ctx) {
            self.apply_shortcut(ctx, shortcut);
        }
        self.handle_dropped_files(ctx);
        self.presenter.tick();
        self.image_cache.sync(&self.presenter);
        self.track_slide_change();

        let theme = self.theme.clone();

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(theme.panel).inner_margin(12.0))
            .show(ctx, |ui| self.draw_header(ui, ctx));

        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::new().fill(theme.panel).inner_margin(12.0))
            .show(ctx, |ui| self.draw_footer(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme.background).inner_margin(16.0))
            .show(ctx, |ui| self.draw_stage(ui));

        // Repaint only as often as the fade or the slideshow timer needs
        if self.fade.is_some() {
            ctx.request_repaint();
        } else if let Some(wait) = self.presenter.time_until_next_tick() {
            ctx.request_repaint_after(wait);
        }
    }
}

impl Drop for PresentationApp {
    fn drop(&mut self) {
        self.shortcuts.detach();
    }
}

/// Build the presenter from launch options and saved config.
fn build_presenter(options: &LaunchOptions, config: &Config) -> anyhow::Result<Presenter> {
    let demo_dir = config
        .demo_dir()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DEMO_DIR));
    let mut presenter = Presenter::new(demo_dir);

    if let Some(ms) = options.interval.or(config.interval_ms()) {
        let clamped = presenter::clamp_interval_ms(ms);
        if clamped != ms {
            log::warn!("Interval {ms} ms is out of range, using {clamped} ms");
        }
        presenter.set_interval_ms(clamped);
    }

    if options.demo {
        presenter.load_demo();
    } else if !options.paths.is_empty() {
        let paths = ingest::collect_paths(&options.paths)?;
        let files = ingest::read_files(&paths);
        if presenter.load_from_files(files) == 0 {
            log::warn!("No images found in the given paths");
        }
    }

    if options.play || config.autoplay() {
        presenter.play();
    }
    Ok(presenter)
}

pub fn run(options: LaunchOptions) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let presenter = build_presenter(&options, &config)?;
    let theme = Theme::from_name(config.theme());
    log::debug!("Using {} theme", theme.name);

    let title = options
        .title
        .clone()
        .or_else(|| config.title().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let viewport = if options.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let native_options = eframe::NativeOptions {
        viewport: viewport.with_drag_and_drop(true),
        ..Default::default()
    };

    let app_title = title.clone();
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(PresentationApp::new(presenter, theme, app_title)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.png"), b"png").unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"jpg").unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"text").unwrap();
        dir
    }

    #[test]
    fn test_build_presenter_from_directory() {
        let dir = image_dir();
        let options = LaunchOptions {
            paths: vec![dir.path().to_path_buf()],
            ..Default::default()
        };
        let presenter = build_presenter(&options, &Config::default()).unwrap();
        let labels: Vec<_> = presenter.slides().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["a.jpg", "b.png"]);
        assert!(!presenter.is_playing());
    }

    #[test]
    fn test_build_presenter_cli_overrides_config() {
        let mut config = Config::default();
        config.set("defaults.interval_ms", "4000").unwrap();
        config.set("defaults.demo_dir", "/opt/demo").unwrap();

        let options = LaunchOptions {
            demo: true,
            play: true,
            interval: Some(1000),
            ..Default::default()
        };
        let presenter = build_presenter(&options, &config).unwrap();
        assert_eq!(presenter.interval_ms(), 1000);
        assert_eq!(presenter.slide_count(), 7);
        assert!(presenter.is_playing());
        assert_eq!(
            presenter.slides()[0].source,
            presenter::slide::SlideSource::Asset(PathBuf::from("/opt/demo/imagen-1.webp"))
        );
    }

    #[test]
    fn test_build_presenter_clamps_interval_and_autoplays() {
        let mut config = Config::default();
        config.set("defaults.autoplay", "true").unwrap();
        let options = LaunchOptions {
            interval: Some(50),
            ..Default::default()
        };
        let presenter = build_presenter(&options, &config).unwrap();
        assert_eq!(presenter.interval_ms(), MIN_INTERVAL_MS);
        // Nothing loaded, so autoplay has nothing to play
        assert!(!presenter.is_playing());
    }

    #[test]
    fn test_build_presenter_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let options = LaunchOptions {
            paths: vec![dir.path().join("missing.png")],
            ..Default::default()
        };
        assert!(build_presenter(&options, &Config::default()).is_err());
    }

    #[test]
    fn test_stage_hint_lists_shortcuts() {
        let hint = stage_hint();
        assert!(hint.starts_with("Click: play/pause"));
        assert!(hint.contains("Space: play/pause"));
        assert!(hint.contains("F: fullscreen"));
    }
}
