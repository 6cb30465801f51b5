use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub panel: Color32,
    pub stage: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub badge: Color32,
    pub border: Color32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x0F, 0x17, 0x2A),
            panel: Color32::from_rgb(0x1E, 0x29, 0x3B),
            stage: Color32::from_rgb(0x08, 0x0C, 0x16),
            foreground: Color32::from_rgb(0xE2, 0xE8, 0xF0),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x63, 0x66, 0xF1),
            badge: Color32::from_rgb(0x6E, 0xE7, 0xB7),
            border: Color32::from_rgba_unmultiplied(0xFF, 0xFF, 0xFF, 0x1A),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xF1, 0xF5, 0xF9),
            panel: Color32::WHITE,
            stage: Color32::from_rgb(0xE2, 0xE8, 0xF0),
            foreground: Color32::from_rgb(0x1E, 0x29, 0x3B),
            heading_color: Color32::from_rgb(0x0F, 0x17, 0x2A),
            accent: Color32::from_rgb(0x4F, 0x46, 0xE5),
            badge: Color32::from_rgb(0x04, 0x78, 0x57),
            border: Color32::from_rgba_unmultiplied(0x0F, 0x17, 0x2A, 0x1A),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}
