use crate::models::slot::SlotType;
use crate::ui_egui::theme::SchedulerTheme;
use egui::Color32;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[derive(Clone, Copy)]
pub struct GridPalette {
    pub background: Color32,
    pub cell_bg: Color32,
    pub today_bg: Color32,
    pub today_border: Color32,
    pub row_line: Color32,
    pub divider: Color32,
    pub header_bg: Color32,
    pub header_text: Color32,
    pub time_text: Color32,
    pub hover_overlay: Color32,
    pub drop_target: Color32,
    pub block_text: Color32,
    pub is_dark: bool,
}

impl GridPalette {
    pub fn from_theme(theme: &SchedulerTheme) -> Self {
        Self {
            background: theme.grid_background,
            cell_bg: theme.cell_background,
            today_bg: theme.today_background,
            today_border: theme.today_border,
            row_line: with_alpha(theme.cell_border, 170),
            divider: with_alpha(theme.cell_border, 220),
            header_bg: theme.header_background,
            header_text: theme.header_text,
            time_text: theme.text_secondary,
            hover_overlay: with_alpha(theme.today_border, if theme.is_dark { 80 } else { 50 }),
            drop_target: Color32::from_rgb(120, 200, 120),
            block_text: Color32::from_rgb(250, 250, 250),
            is_dark: theme.is_dark,
        }
    }

    /// Fill for a slot block of `slot_type`, toned down in dark mode.
    pub fn slot_fill(&self, slot_type: SlotType) -> Color32 {
        let base = SchedulerTheme::hex_to_color(slot_type.color())
            .unwrap_or(Color32::from_rgb(100, 150, 200));
        if self.is_dark {
            blend(base, self.background, 0.25)
        } else {
            base
        }
    }

    /// Slots with a save in flight are drawn translucent.
    pub fn pending_fill(&self, slot_type: SlotType) -> Color32 {
        with_alpha(self.slot_fill(slot_type), 110)
    }
}
