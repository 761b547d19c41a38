//! Short-lived notices in the bottom-right corner.
//!
//! Every notice comes from a store round trip: an editor save or delete, a
//! drag relocation, or a week load that found slots outside the grid hours.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use egui::{Align2, Color32, Context, RichText, Vec2};

use crate::services::store::MutationOutcome;
use crate::ui_egui::drag::RelocationOutcome;

const MAX_VISIBLE: usize = 4;
const FADE: Duration = Duration::from_millis(400);
const NOTICE_WIDTH: f32 = 300.0;
/// Keeps the stack clear of the status bar.
const BOTTOM_OFFSET: f32 = 34.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Done,
    Attention,
    Failure,
}

impl ToastKind {
    fn lifetime(self) -> Duration {
        match self {
            ToastKind::Done => Duration::from_secs(3),
            ToastKind::Attention => Duration::from_secs(4),
            ToastKind::Failure => Duration::from_secs(6),
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            ToastKind::Done => "✓",
            ToastKind::Attention => "⚠",
            ToastKind::Failure => "✗",
        }
    }

    /// (fill, text) for the current theme.
    fn colors(self, is_dark: bool) -> (Color32, Color32) {
        let rgb = |(r, g, b): (u8, u8, u8)| Color32::from_rgb(r, g, b);
        let (fill, text) = match (self, is_dark) {
            (ToastKind::Done, false) => ((222, 247, 228), (24, 110, 48)),
            (ToastKind::Done, true) => ((28, 64, 38), (120, 222, 140)),
            (ToastKind::Attention, false) => ((254, 243, 199), (146, 90, 6)),
            (ToastKind::Attention, true) => ((74, 56, 18), (252, 204, 92)),
            (ToastKind::Failure, false) => ((254, 226, 226), (170, 36, 36)),
            (ToastKind::Failure, true) => ((78, 28, 28), (250, 128, 128)),
        };
        (rgb(fill), rgb(text))
    }
}

#[derive(Debug, Clone)]
struct Toast {
    text: String,
    kind: ToastKind,
    shown_at: Instant,
}

impl Toast {
    fn remaining(&self, now: Instant) -> Duration {
        self.kind
            .lifetime()
            .saturating_sub(now.saturating_duration_since(self.shown_at))
    }

    /// 1.0 until the last [`FADE`] of its lifetime, then down to 0.0.
    fn alpha(&self, now: Instant) -> f32 {
        let left = self.remaining(now);
        if left >= FADE {
            1.0
        } else {
            left.as_secs_f32() / FADE.as_secs_f32()
        }
    }
}

/// Toast text for a finished editor save or delete.
pub fn slot_change_notice(result: &Result<MutationOutcome, String>) -> (ToastKind, String) {
    match result {
        Ok(MutationOutcome::Created(_)) => (ToastKind::Done, "Slot created".to_string()),
        Ok(MutationOutcome::Updated(_)) => (ToastKind::Done, "Slot saved".to_string()),
        Ok(MutationOutcome::Deleted(_)) => (ToastKind::Done, "Slot deleted".to_string()),
        Err(err) => (ToastKind::Failure, format!("Could not save slot: {}", err)),
    }
}

pub fn relocation_notice(outcome: &RelocationOutcome) -> (ToastKind, String) {
    match outcome {
        RelocationOutcome::Relocated { .. } => (ToastKind::Done, "Slot moved".to_string()),
        RelocationOutcome::Failed(message) => {
            (ToastKind::Failure, format!("Could not move slot: {}", message))
        }
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: VecDeque<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notice. Repeating the newest text restarts its timer instead of stacking.
    pub fn push(&mut self, kind: ToastKind, text: impl Into<String>) {
        let text = text.into();
        if let Some(last) = self.toasts.back_mut() {
            if last.kind == kind && last.text == text {
                last.shown_at = Instant::now();
                return;
            }
        }
        if self.toasts.len() == MAX_VISIBLE {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            text,
            kind,
            shown_at: Instant::now(),
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(ToastKind::Done, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(ToastKind::Attention, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(ToastKind::Failure, text);
    }

    pub fn slot_change(&mut self, result: &Result<MutationOutcome, String>) {
        let (kind, text) = slot_change_notice(result);
        self.push(kind, text);
    }

    pub fn relocation(&mut self, outcome: &RelocationOutcome) {
        let (kind, text) = relocation_notice(outcome);
        self.push(kind, text);
    }

    pub fn off_grid(&mut self, count: usize) {
        if count > 0 {
            self.warning(format!("{} slot(s) fall outside the grid hours", count));
        }
    }

    fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| !toast.remaining(now).is_zero());
    }

    pub fn render(&mut self, ctx: &Context, is_dark: bool) {
        let now = Instant::now();
        self.prune(now);
        if self.toasts.is_empty() {
            return;
        }
        ctx.request_repaint();

        egui::Area::new(egui::Id::new("scheduler_toasts"))
            .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-10.0, -BOTTOM_OFFSET))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                ui.spacing_mut().item_spacing.y = 5.0;
                for toast in self.toasts.iter().rev() {
                    let alpha = toast.alpha(now);
                    let (fill, text) = toast.kind.colors(is_dark);
                    egui::Frame::none()
                        .fill(fill.gamma_multiply(0.92 * alpha))
                        .stroke(egui::Stroke::new(1.0, text.gamma_multiply(0.3 * alpha)))
                        .rounding(6.0)
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                        .show(ui, |ui| {
                            ui.set_width(NOTICE_WIDTH);
                            ui.horizontal(|ui| {
                                let color = text.gamma_multiply(alpha);
                                ui.label(RichText::new(toast.kind.glyph()).color(color).strong());
                                ui.label(RichText::new(&toast.text).color(color));
                            });
                        });
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grid::CellKey;

    #[test]
    fn repeated_off_grid_warning_does_not_stack() {
        let mut manager = ToastManager::new();
        manager.off_grid(2);
        manager.off_grid(2);
        assert_eq!(manager.toasts.len(), 1);

        manager.off_grid(3);
        assert_eq!(manager.toasts.len(), 2);
    }

    #[test]
    fn zero_off_grid_is_silent() {
        let mut manager = ToastManager::new();
        manager.off_grid(0);
        assert!(manager.toasts.is_empty());
    }

    #[test]
    fn oldest_notice_makes_room() {
        let mut manager = ToastManager::new();
        for i in 0..MAX_VISIBLE + 2 {
            manager.error(format!("failure {}", i));
        }
        assert_eq!(manager.toasts.len(), MAX_VISIBLE);
        assert_eq!(manager.toasts.front().map(|t| t.text.as_str()), Some("failure 2"));
    }

    #[test]
    fn expired_notices_are_pruned() {
        let mut manager = ToastManager::new();
        manager.success("Slot saved");
        manager.error("Could not save slot: locked");

        manager.prune(Instant::now() + Duration::from_secs(4));
        assert_eq!(manager.toasts.len(), 1, "failures outlive confirmations");
        manager.prune(Instant::now() + Duration::from_secs(7));
        assert!(manager.toasts.is_empty());
    }

    #[test]
    fn notice_fades_at_end_of_life() {
        let shown_at = Instant::now();
        let toast = Toast {
            text: "Slot moved".to_string(),
            kind: ToastKind::Done,
            shown_at,
        };
        assert_eq!(toast.alpha(shown_at), 1.0);
        let fading = toast.alpha(shown_at + Duration::from_millis(2800));
        assert!(fading > 0.0 && fading < 1.0);
        assert_eq!(toast.alpha(shown_at + Duration::from_secs(3)), 0.0);
    }

    #[test]
    fn mutation_results_map_to_notices() {
        assert_eq!(
            slot_change_notice(&Ok(MutationOutcome::Deleted(4))),
            (ToastKind::Done, "Slot deleted".to_string())
        );
        assert_eq!(
            slot_change_notice(&Err("Slot with id 4 not found".to_string())).0,
            ToastKind::Failure
        );
        assert_eq!(
            relocation_notice(&RelocationOutcome::Relocated {
                slot_id: 4,
                destination: CellKey::new(2, "16:00"),
            }),
            (ToastKind::Done, "Slot moved".to_string())
        );
    }
}
