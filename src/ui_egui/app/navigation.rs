use super::SchedulerApp;
use crate::utils::date::{format_week_label, is_current_week, week_end, week_start_for};
use chrono::{Duration, Local, NaiveDate};

/// Which week the grid shows.
///
/// Store responses carry the week they were fetched for; anything not for
/// [`WeekNavigator::is_showing`] is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekNavigator {
    week_start: NaiveDate,
}

impl WeekNavigator {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            week_start: week_start_for(date),
        }
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    pub fn week_end(&self) -> NaiveDate {
        week_end(self.week_start)
    }

    /// Whether a week fetched for `week_start` belongs on screen.
    pub fn is_showing(&self, week_start: NaiveDate) -> bool {
        self.week_start == week_start
    }

    pub fn label(&self) -> String {
        format_week_label(self.week_start, self.week_end())
    }

    pub fn is_current_week(&self, today: NaiveDate) -> bool {
        is_current_week(self.week_start, today)
    }

    pub fn previous(&mut self) -> bool {
        self.set(self.week_start - Duration::days(7))
    }

    pub fn next(&mut self) -> bool {
        self.set(self.week_start + Duration::days(7))
    }

    pub fn current(&mut self, today: NaiveDate) -> bool {
        self.jump_to(today)
    }

    /// Show the week containing `date`.
    pub fn jump_to(&mut self, date: NaiveDate) -> bool {
        self.set(week_start_for(date))
    }

    /// Returns true when the week changed.
    fn set(&mut self, week_start: NaiveDate) -> bool {
        if week_start == self.week_start {
            return false;
        }
        self.week_start = week_start;
        true
    }
}

impl SchedulerApp {
    pub(super) fn navigate_previous(&mut self) {
        if self.navigator.previous() {
            self.on_week_changed();
        }
    }

    pub(super) fn navigate_next(&mut self) {
        if self.navigator.next() {
            self.on_week_changed();
        }
    }

    pub(super) fn jump_to_today(&mut self) {
        if self.navigator.current(Local::now().date_naive()) {
            self.on_week_changed();
        }
    }

    pub(super) fn jump_to_date(&mut self, date: NaiveDate) {
        if self.navigator.jump_to(date) {
            self.on_week_changed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn starts_on_monday_of_given_date() {
        let navigator = WeekNavigator::new(date(2026, 1, 29));
        assert_eq!(navigator.week_start(), date(2026, 1, 26));
        assert_eq!(navigator.label(), "26 Jan – 1 Feb 2026");
    }

    #[test]
    fn previous_and_next_move_seven_days() {
        let mut navigator = WeekNavigator::new(date(2026, 1, 26));
        assert!(navigator.next());
        assert_eq!(navigator.week_start(), date(2026, 2, 2));
        assert!(navigator.previous());
        assert!(navigator.previous());
        assert_eq!(navigator.week_start(), date(2026, 1, 19));
        assert_eq!(navigator.label(), "19 – 25 Jan 2026");
    }

    #[test]
    fn jump_within_same_week_is_not_a_change() {
        let mut navigator = WeekNavigator::new(date(2026, 1, 26));
        assert!(!navigator.jump_to(date(2026, 1, 30)));

        assert!(navigator.jump_to(date(2026, 1, 1)));
        assert_eq!(navigator.week_start(), date(2025, 12, 29));
        assert_eq!(navigator.label(), "29 Dec 2025 – 4 Jan 2026");
    }

    #[test]
    fn current_week_detection() {
        let today = date(2026, 10, 16);
        let mut navigator = WeekNavigator::new(date(2026, 3, 4));
        assert!(!navigator.is_current_week(today));
        assert!(navigator.current(today));
        assert!(navigator.is_current_week(today));
        assert!(!navigator.current(today));
    }

    #[test]
    fn fetches_for_other_weeks_are_stale() {
        let mut navigator = WeekNavigator::new(date(2026, 1, 26));
        navigator.next();
        assert!(!navigator.is_showing(date(2026, 1, 26)));
        assert!(navigator.is_showing(date(2026, 2, 2)));

        // Coming back makes the original fetch current again
        navigator.previous();
        assert!(navigator.is_showing(date(2026, 1, 26)));
    }

    proptest! {
        #[test]
        fn previous_then_next_round_trips(days in 0i64..30_000) {
            let start = date(1990, 1, 1) + Duration::days(days);
            let mut navigator = WeekNavigator::new(start);
            let original = navigator.week_start();

            navigator.previous();
            navigator.next();
            prop_assert_eq!(navigator.week_start(), original);
        }
    }
}
