use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePlayback,
    Next,
    Previous,
    ToggleFullscreen,
}

impl Shortcut {
    /// Every shortcut, in dispatch order.
    pub const ALL: [Shortcut; 4] = [
        Shortcut::TogglePlayback,
        Shortcut::Next,
        Shortcut::Previous,
        Shortcut::ToggleFullscreen,
    ];

    pub fn key(self) -> egui::Key {
        match self {
            Self::TogglePlayback => egui::Key::Space,
            Self::Next => egui::Key::ArrowRight,
            Self::Previous => egui::Key::ArrowLeft,
            Self::ToggleFullscreen => egui::Key::F,
        }
    }

    #[cfg(test)]
    pub fn from_key(key: egui::Key) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn key_label(self) -> &'static str {
        match self {
            Self::TogglePlayback => "Space",
            Self::Next => "\u{2192}",
            Self::Previous => "\u{2190}",
            Self::ToggleFullscreen => "F",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::TogglePlayback => "play/pause",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::ToggleFullscreen => "fullscreen",
        }
    }
}

/// Window-wide keyboard listener with an explicit lifecycle.
///
/// While attached, [`ShortcutListener::poll`] consumes matching key presses
/// so focused widgets never see them (a focused button would otherwise also
/// react to Space). A detached listener neither reports nor consumes keys.
#[derive(Debug, Default)]
pub struct ShortcutListener {
    attached: bool,
}

impl ShortcutListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self) {
        if !self.attached {
            log::debug!("Keyboard shortcuts attached");
        }
        self.attached = true;
    }

    pub fn detach(&mut self) {
        if self.attached {
            log::debug!("Keyboard shortcuts detached");
        }
        self.attached = false;
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Shortcuts pressed this frame, in [`Shortcut::ALL`] order.
    pub fn poll(&self, ctx: &egui::Context) -> Vec<Shortcut> {
        if !self.attached {
            return Vec::new();
        }
        ctx.input_mut(|i| {
            Shortcut::ALL
                .into_iter()
                .filter(|s| i.consume_key(egui::Modifiers::NONE, s.key()))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_press(key: egui::Key, modifiers: egui::Modifiers) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    /// Run one frame with `events` and return what the listener reported.
    fn run_frame(listener: &ShortcutListener, events: Vec<egui::Event>) -> Vec<Shortcut> {
        let ctx = egui::Context::default();
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let mut seen = Vec::new();
        let _ = ctx.run(input, |ctx| {
            seen = listener.poll(ctx);
        });
        seen
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            Shortcut::from_key(egui::Key::Space),
            Some(Shortcut::TogglePlayback)
        );
        assert_eq!(
            Shortcut::from_key(egui::Key::ArrowRight),
            Some(Shortcut::Next)
        );
        assert_eq!(
            Shortcut::from_key(egui::Key::ArrowLeft),
            Some(Shortcut::Previous)
        );
        assert_eq!(
            Shortcut::from_key(egui::Key::F),
            Some(Shortcut::ToggleFullscreen)
        );
        assert_eq!(Shortcut::from_key(egui::Key::ArrowUp), None);
        assert_eq!(Shortcut::from_key(egui::Key::Q), None);
    }

    #[test]
    fn test_attached_listener_reports_presses() {
        let mut listener = ShortcutListener::new();
        listener.attach();
        let seen = run_frame(
            &listener,
            vec![
                key_press(egui::Key::F, egui::Modifiers::NONE),
                key_press(egui::Key::Space, egui::Modifiers::NONE),
                key_press(egui::Key::Enter, egui::Modifiers::NONE),
            ],
        );
        assert_eq!(
            seen,
            vec![Shortcut::TogglePlayback, Shortcut::ToggleFullscreen]
        );
    }

    #[test]
    fn test_uppercase_f_toggles_fullscreen() {
        let mut listener = ShortcutListener::new();
        listener.attach();
        let seen = run_frame(
            &listener,
            vec![key_press(egui::Key::F, egui::Modifiers::SHIFT)],
        );
        assert_eq!(seen, vec![Shortcut::ToggleFullscreen]);
    }

    #[test]
    fn test_detached_listener_is_silent() {
        let mut listener = ShortcutListener::new();
        assert!(!listener.is_attached());
        let seen = run_frame(
            &listener,
            vec![key_press(egui::Key::ArrowRight, egui::Modifiers::NONE)],
        );
        assert!(seen.is_empty());

        listener.attach();
        listener.detach();
        let seen = run_frame(
            &listener,
            vec![key_press(egui::Key::ArrowLeft, egui::Modifiers::NONE)],
        );
        assert!(seen.is_empty());
    }

    #[test]
    fn test_released_keys_are_ignored() {
        let mut listener = ShortcutListener::new();
        listener.attach();
        let release = egui::Event::Key {
            key: egui::Key::Space,
            physical_key: None,
            pressed: false,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };
        assert!(run_frame(&listener, vec![release]).is_empty());
    }
}
