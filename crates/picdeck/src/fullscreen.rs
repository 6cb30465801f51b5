use eframe::egui;

#[derive(Debug, thiserror::Error)]
pub enum FullscreenError {
    #[error("fullscreen is not supported by this display")]
    Unsupported,
}

/// Something that can be switched in and out of fullscreen.
pub trait FullscreenSurface {
    fn is_fullscreen(&self) -> bool;
    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(), FullscreenError>;
}

/// The root egui viewport.
pub struct EguiViewport<'a> {
    ctx: &'a egui::Context,
}

impl<'a> EguiViewport<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl FullscreenSurface for EguiViewport<'_> {
    fn is_fullscreen(&self) -> bool {
        self.ctx
            .input(|i| i.viewport().fullscreen)
            .unwrap_or(false)
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<(), FullscreenError> {
        // Backends that cannot fullscreen never report a fullscreen state
        if self.ctx.input(|i| i.viewport().fullscreen).is_none() {
            return Err(FullscreenError::Unsupported);
        }
        // Must be sent outside any ctx.input() closure (RwLock deadlock)
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_context_reports_unsupported() {
        let ctx = egui::Context::default();
        let mut viewport = EguiViewport::new(&ctx);
        assert!(!viewport.is_fullscreen());
        assert!(matches!(
            viewport.set_fullscreen(true),
            Err(FullscreenError::Unsupported)
        ));
    }
}
