mod lifecycle;
mod navigation;
mod status_bar;
mod toast;
mod toolbar;

pub use self::navigation::WeekNavigator;

use self::toast::ToastManager;
use crate::models::coach::Coach;
use crate::models::grid::TimeGridDefinition;
use crate::models::settings::Settings;
use crate::models::slot::Slot;
use crate::services::store::{MutationOutcome, SlotMutation};
use crate::services::worker::{MutationOrigin, StoreRequest, StoreResponse, StoreWorker};
use crate::ui_egui::drag::DragController;
use crate::ui_egui::slot_editor::{render_slot_editor, EditorRequest, EditorStatus, SlotEditorState};
use crate::ui_egui::theme::SchedulerTheme;
use crate::ui_egui::views::palette::GridPalette;
use crate::ui_egui::views::slot_index::{CoachFilter, SlotIndex};
use crate::ui_egui::views::week_grid::{GridAction, GridLayout, SlotLocks, WeekGridView};
use crate::utils::date::DAY_NAMES;
use chrono::{Local, NaiveDate};
use std::collections::HashSet;
use std::time::Duration;

/// Repaint interval while the store worker owes us a response.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct SchedulerApp {
    settings: Settings,
    definition: TimeGridDefinition,
    theme: SchedulerTheme,
    palette: GridPalette,
    worker: StoreWorker,
    navigator: WeekNavigator,
    /// Unfiltered slots of the displayed week, as last fetched
    week_slots: Vec<Slot>,
    week_loading: bool,
    coaches: Vec<Coach>,
    filter: CoachFilter,
    index: SlotIndex,
    layout: GridLayout,
    /// Day the layout's "today" highlight was computed for
    layout_day: NaiveDate,
    drag: DragController,
    editor: Option<SlotEditorState>,
    /// Slots with a mutation still with the worker
    pending: HashSet<i64>,
    jump_date: NaiveDate,
    toast_manager: ToastManager,
    last_error: Option<String>,
}

impl eframe::App for SchedulerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_responses();
        self.handle_shortcuts(ctx);
        self.refresh_layout_if_day_changed();

        self.render_toolbar(ctx);
        self.render_status_bar(ctx);

        let locks = SlotLocks {
            in_flight: &self.pending,
            editing: self.editor.as_ref().and_then(|editor| editor.slot_id),
        };
        let interaction = egui::CentralPanel::default()
            .show(ctx, |ui| {
                WeekGridView::show(
                    ui,
                    &self.layout,
                    &self.definition,
                    &self.palette,
                    &mut self.drag,
                    locks,
                )
            })
            .inner;

        if let Some(request) = interaction.relocation {
            let slot_id = request.slot_id;
            log::info!(
                "Moving slot {} to {} {}",
                slot_id,
                DAY_NAMES[request.day_of_week as usize % 7],
                request.start_time
            );
            self.submit(
                MutationOrigin::Drag,
                SlotMutation::Update {
                    id: slot_id,
                    changes: request.into_changes(),
                },
            );
        }
        if let Some(action) = interaction.action {
            self.open_editor(action);
        }

        self.render_editor(ctx);
        self.toast_manager.render(ctx, self.theme.is_dark);

        if self.awaiting_worker() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }
}

impl SchedulerApp {
    fn awaiting_worker(&self) -> bool {
        self.week_loading
            || !self.pending.is_empty()
            || self.drag.is_committing()
            || self.editor.as_ref().is_some_and(|editor| editor.pending)
    }

    fn request_week(&mut self) {
        let week_start = self.navigator.week_start();
        self.week_loading = true;
        if let Err(err) = self.worker.send(StoreRequest::LoadWeek(week_start)) {
            log::error!("Failed to request week {}: {:#}", week_start, err);
            self.week_loading = false;
            self.report_error(format!("Could not load week: {}", err));
        }
    }

    fn request_coaches(&mut self) {
        let active_only = !self.settings.show_inactive_coaches;
        if let Err(err) = self.worker.send(StoreRequest::LoadCoaches { active_only }) {
            log::error!("Failed to request coaches: {:#}", err);
            self.report_error(format!("Could not load coaches: {}", err));
        }
    }

    /// Called after the navigator moved to another week.
    fn on_week_changed(&mut self) {
        log::info!("Showing week {}", self.navigator.label());
        // A committing drag keeps waiting for its response
        if self.drag.is_dragging() {
            self.drag.cancel();
        }
        self.jump_date = self.navigator.week_start();
        self.week_slots.clear();
        self.rebuild_index();
        self.request_week();
    }

    fn process_responses(&mut self) {
        for response in self.worker.poll() {
            match response {
                StoreResponse::Week { week_start, result } => {
                    self.handle_week(week_start, result)
                }
                StoreResponse::Coaches(result) => self.handle_coaches(result),
                StoreResponse::Applied {
                    origin,
                    slot_id,
                    result,
                } => self.handle_applied(origin, slot_id, result),
            }
        }
    }

    fn handle_week(&mut self, week_start: NaiveDate, result: Result<Vec<Slot>, String>) {
        if !self.navigator.is_showing(week_start) {
            log::debug!("Dropping stale slots for week {}", week_start);
            return;
        }
        self.week_loading = false;

        match result {
            Ok(slots) => {
                log::info!("Loaded {} slots for week {}", slots.len(), week_start);
                self.week_slots = slots;
                if self.drag.is_dragging() {
                    self.drag.cancel();
                }
                self.last_error = None;
                self.rebuild_index();
                self.toast_manager.off_grid(self.layout.off_grid);
            }
            Err(err) => self.report_error(format!("Could not load week: {}", err)),
        }
    }

    fn handle_coaches(&mut self, result: Result<Vec<Coach>, String>) {
        match result {
            Ok(coaches) => {
                log::info!("Loaded {} coaches", coaches.len());
                if let CoachFilter::Coach(id) = self.filter {
                    if !coaches.iter().any(|coach| coach.id == id) {
                        self.filter = CoachFilter::All;
                        self.rebuild_index();
                    }
                }
                self.coaches = coaches;
            }
            Err(err) => self.report_error(format!("Could not load coaches: {}", err)),
        }
    }

    fn handle_applied(
        &mut self,
        origin: MutationOrigin,
        slot_id: Option<i64>,
        result: Result<MutationOutcome, String>,
    ) {
        if let Some(id) = slot_id {
            self.pending.remove(&id);
        }
        let succeeded = result.is_ok();

        match origin {
            MutationOrigin::Editor => self.finish_editor(result),
            MutationOrigin::Drag => {
                let finished =
                    slot_id.and_then(|id| self.drag.finish(id, result.clone().map(|_| ())));
                match finished {
                    Some(outcome) => {
                        log::info!("Relocation finished: {:?}", outcome);
                        self.toast_manager.relocation(&outcome);
                    }
                    None => match &result {
                        Ok(_) => self.toast_manager.success("Slot moved"),
                        Err(err) => {
                            self.toast_manager.error(format!("Could not move slot: {}", err))
                        }
                    },
                }
            }
        }

        if succeeded {
            self.request_week();
        }
    }

    fn finish_editor(&mut self, result: Result<MutationOutcome, String>) {
        self.toast_manager.slot_change(&result);
        // An editor opened after this one was closed is not ours to complete
        let Some(editor) = self.editor.as_mut().filter(|editor| editor.pending) else {
            return;
        };
        if editor.complete(result) == EditorStatus::Closed {
            self.editor = None;
        }
    }

    /// Hand a mutation to the worker and mark its slot as in flight.
    fn submit(&mut self, origin: MutationOrigin, mutation: SlotMutation) {
        let slot_id = mutation.slot_id();
        if let Some(id) = slot_id {
            self.pending.insert(id);
        }

        if let Err(err) = self.worker.send(StoreRequest::Apply { origin, mutation }) {
            log::error!("Failed to submit slot change: {:#}", err);
            self.handle_applied(origin, slot_id, Err(err.to_string()));
        }
    }

    fn open_editor(&mut self, action: GridAction) {
        let week_start = self.navigator.week_start();
        let editor = match action {
            GridAction::Create {
                day_of_week,
                start_time,
                end_time,
            } => SlotEditorState::open(None, week_start, day_of_week, &start_time, &end_time),
            GridAction::Edit(slot) => {
                if slot.id.is_some_and(|id| self.pending.contains(&id)) {
                    return;
                }
                SlotEditorState::open(Some(&slot), week_start, 0, "", "")
            }
        };
        self.editor = Some(editor.with_delete(self.settings.allow_delete));
    }

    fn render_editor(&mut self, ctx: &egui::Context) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        editor.sync_in_flight(&self.pending);
        editor.check_warnings(&self.week_slots);
        match render_slot_editor(ctx, editor, &self.coaches, &self.definition) {
            Some(EditorRequest::Submit(mutation)) => {
                log::info!("Submitting slot {}", mutation.describe());
                self.submit(MutationOrigin::Editor, mutation);
            }
            Some(EditorRequest::Close) => self.editor = None,
            None => {}
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if self.editor.is_some() || self.drag.is_dragging() {
            return;
        }
        let (previous, next, today) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::T),
            )
        });
        if previous {
            self.navigate_previous();
        } else if next {
            self.navigate_next();
        } else if today {
            self.jump_to_today();
        }
    }

    fn rebuild_index(&mut self) {
        self.index = SlotIndex::build(&self.week_slots, self.filter);
        self.rebuild_layout();
    }

    fn rebuild_layout(&mut self) {
        self.layout_day = Local::now().date_naive();
        self.layout = GridLayout::build(
            &self.definition,
            &self.index,
            self.navigator.week_start(),
            self.layout_day,
        );
    }

    fn refresh_layout_if_day_changed(&mut self) {
        if Local::now().date_naive() != self.layout_day {
            self.rebuild_layout();
        }
    }

    fn report_error(&mut self, message: String) {
        self.toast_manager.error(message.clone());
        self.last_error = Some(message);
    }
}
