//! Theme module for the scheduler window
//!
//! Defines the SchedulerTheme structure and the conversion from the
//! hex colours stored on slot types.

use egui::Color32;

use crate::models::settings::Settings;

/// Colours used by the scheduler window
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    pub app_background: Color32,

    /// Grid background behind the cells
    pub grid_background: Color32,

    pub today_background: Color32,
    pub today_border: Color32,

    pub cell_background: Color32,
    pub cell_border: Color32,

    pub header_background: Color32,
    pub header_text: Color32,

    /// Primary text color (headings, slot titles)
    pub text_primary: Color32,

    /// Secondary text color (times, coach names)
    pub text_secondary: Color32,
}

impl SchedulerTheme {
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(245, 245, 245),
            grid_background: Color32::from_rgb(255, 255, 255),
            today_background: Color32::from_rgb(230, 240, 255),
            today_border: Color32::from_rgb(100, 150, 255),
            cell_background: Color32::from_rgb(255, 255, 255),
            cell_border: Color32::from_rgb(220, 220, 220),
            header_background: Color32::from_rgb(235, 238, 243),
            header_text: Color32::from_rgb(40, 40, 40),
            text_primary: Color32::from_rgb(40, 40, 40),
            text_secondary: Color32::from_rgb(100, 100, 100),
        }
    }

    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(30, 30, 30),
            grid_background: Color32::from_rgb(40, 40, 40),
            today_background: Color32::from_rgb(50, 60, 80),
            today_border: Color32::from_rgb(100, 150, 255),
            cell_background: Color32::from_rgb(40, 40, 40),
            cell_border: Color32::from_rgb(60, 60, 60),
            header_background: Color32::from_rgb(48, 50, 56),
            header_text: Color32::from_rgb(230, 230, 230),
            text_primary: Color32::from_rgb(240, 240, 240),
            text_secondary: Color32::from_rgb(170, 170, 170),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        if settings.is_dark() {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Apply this theme to an egui context
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.app_background;
        visuals.panel_fill = self.app_background;

        visuals.widgets.noninteractive.bg_fill = self.cell_background;
        visuals.widgets.inactive.bg_fill = self.cell_background;
        visuals.widgets.hovered.bg_fill = self.today_background;
        visuals.widgets.active.bg_fill = self.today_background;

        visuals.override_text_color = Some(self.text_primary);

        ctx.set_visuals(visuals);
    }

    /// Parse hex string to Color32
    pub fn hex_to_color(hex: &str) -> Result<Color32, String> {
        let hex = hex.trim_start_matches('#');

        if hex.len() != 6 {
            return Err("Hex color must be 6 characters".to_string());
        }

        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| "Invalid hex color")?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| "Invalid hex color")?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| "Invalid hex color")?;

        Ok(Color32::from_rgb(r, g, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_color() {
        let result = SchedulerTheme::hex_to_color("#3B82F6").unwrap();
        assert_eq!(result, Color32::from_rgb(59, 130, 246));
        assert!(SchedulerTheme::hex_to_color("#12345").is_err());
        assert!(SchedulerTheme::hex_to_color("#GGGGGG").is_err());
    }

    #[test]
    fn test_theme_follows_settings() {
        let mut settings = Settings::default();
        assert!(!SchedulerTheme::from_settings(&settings).is_dark);

        settings.theme = "dark".to_string();
        assert_eq!(SchedulerTheme::from_settings(&settings), SchedulerTheme::dark());
    }
}
