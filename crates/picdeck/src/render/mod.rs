pub mod image_cache;
pub mod transition;

use eframe::egui;

use crate::presenter::Presenter;
use crate::presenter::timer::Timer;
use crate::theme::Theme;

use image_cache::ImageCache;

const PROGRESS_HEIGHT: f32 = 6.0;

/// Largest rect with the texture's aspect ratio that fits inside `available`,
/// centered (object-fit: contain).
pub fn contain_rect(tex_size: egui::Vec2, available: egui::Rect) -> egui::Rect {
    if tex_size.x <= 0.0 || tex_size.y <= 0.0 {
        return available;
    }
    let scale = (available.width() / tex_size.x).min(available.height() / tex_size.y);
    egui::Rect::from_center_size(available.center(), tex_size * scale)
}

/// Draw slide `index` of the presenter into `rect`. Slides that fail to load
/// are drawn as a labelled placeholder.
pub fn draw_slide<T: Timer>(
    ui: &egui::Ui,
    presenter: &Presenter<T>,
    image_cache: &ImageCache,
    index: usize,
    rect: egui::Rect,
    opacity: f32,
    theme: &Theme,
) {
    let Some(slide) = presenter.slides().get(index) else {
        return;
    };
    if opacity <= 0.0 {
        return;
    }

    if let Some(texture) = image_cache.get_or_load(ui, presenter, slide) {
        let draw_rect = contain_rect(texture.size_vec2(), rect);
        let tint = Theme::with_opacity(egui::Color32::WHITE, opacity);
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        ui.painter().image(texture.id(), draw_rect, uv, tint);
    } else {
        draw_placeholder(ui, &slide.label, rect, opacity, theme);
    }
}

fn draw_placeholder(ui: &egui::Ui, label: &str, rect: egui::Rect, opacity: f32, theme: &Theme) {
    let border = Theme::with_opacity(theme.foreground, 0.3 * opacity);
    let inner = rect.shrink(rect.width().min(rect.height()) * 0.15);
    ui.painter().rect_stroke(
        inner,
        8.0,
        egui::Stroke::new(2.0, border),
        egui::StrokeKind::Inside,
    );
    let color = Theme::with_opacity(theme.foreground, 0.6 * opacity);
    ui.painter().text(
        inner.center(),
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(18.0),
        color,
    );
}

/// Thin bar along the bottom edge of `rect`, filled to `progress`.
pub fn draw_progress_bar(ui: &egui::Ui, rect: egui::Rect, progress: f32, theme: &Theme) {
    let track = egui::Rect::from_min_max(
        egui::pos2(rect.left(), rect.bottom() - PROGRESS_HEIGHT),
        rect.right_bottom(),
    );
    ui.painter()
        .rect_filled(track, 0.0, Theme::with_opacity(theme.foreground, 0.15));
    let fill = egui::Rect::from_min_size(
        track.min,
        egui::vec2(track.width() * progress.clamp(0.0, 1.0), track.height()),
    );
    ui.painter().rect_filled(fill, 0.0, theme.accent);
}

/// Caption chip in the top-left corner of the stage.
pub fn draw_caption(ui: &egui::Ui, rect: egui::Rect, label: &str, theme: &Theme) {
    let padding = egui::vec2(12.0, 6.0);
    let color = Theme::with_opacity(theme.heading_color, 0.95);
    let galley = ui.painter().layout_no_wrap(
        label.to_string(),
        egui::FontId::proportional(16.0),
        color,
    );
    let chip = egui::Rect::from_min_size(
        rect.left_top() + egui::vec2(16.0, 16.0),
        galley.size() + padding * 2.0,
    );
    ui.painter()
        .rect_filled(chip, 10.0, Theme::with_opacity(egui::Color32::BLACK, 0.35));
    ui.painter().galley(chip.min + padding, galley, color);
}

/// Centered prompt shown while the slideshow is not playing.
pub fn draw_hint(ui: &egui::Ui, rect: egui::Rect, has_slides: bool, theme: &Theme) {
    let first = if has_slides {
        "Paused."
    } else {
        "Upload images or press Demo."
    };
    let second = "Click or press Space to play.";

    let painter = ui.painter();
    let primary = Theme::with_opacity(theme.heading_color, 0.9);
    let secondary = Theme::with_opacity(theme.heading_color, 0.7);
    let top = painter.layout_no_wrap(first.to_string(), egui::FontId::proportional(16.0), primary);
    let bottom = painter.layout_no_wrap(
        second.to_string(),
        egui::FontId::proportional(13.0),
        secondary,
    );

    let padding = egui::vec2(16.0, 12.0);
    let gap = 4.0;
    let width = top.size().x.max(bottom.size().x);
    let height = top.size().y + gap + bottom.size().y;
    let panel = egui::Rect::from_center_size(
        rect.center(),
        egui::vec2(width, height) + padding * 2.0,
    );
    painter.rect_filled(panel, 12.0, Theme::with_opacity(egui::Color32::BLACK, 0.5));

    let top_pos = egui::pos2(panel.center().x - top.size().x / 2.0, panel.top() + padding.y);
    let bottom_pos = egui::pos2(
        panel.center().x - bottom.size().x / 2.0,
        top_pos.y + top.size().y + gap,
    );
    painter.galley(top_pos, top, primary);
    painter.galley(bottom_pos, bottom, secondary);
}
