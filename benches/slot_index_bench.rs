// Benchmark for the week grid pipeline
// Measures cell indexing and layout building for busy weeks

use chrono::NaiveDate;
use coach_scheduler::models::grid::TimeGridDefinition;
use coach_scheduler::models::slot::{Slot, SlotType};
use coach_scheduler::ui_egui::views::slot_index::{CoachFilter, SlotIndex};
use coach_scheduler::ui_egui::views::week_grid::GridLayout;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn week() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 26).unwrap()
}

/// `count` slots spread across every day and row of the default grid.
fn week_of_slots(count: usize, grid: &TimeGridDefinition) -> Vec<Slot> {
    (0..count)
        .map(|i| {
            let row = &grid.rows[i % grid.rows.len()];
            let day = grid.days[(i / grid.rows.len()) % grid.days.len()].day_of_week;
            let coach_id = (i % 3) as i64 + 1;
            Slot::builder()
                .slot_type(if i % 4 == 0 { SlotType::Available } else { SlotType::OneToOne })
                .student(format!("Student {}", i))
                .coach(coach_id, format!("Coach {}", coach_id))
                .day(day)
                .times(row.start_time.clone(), row.end_time.clone())
                .week_start(week())
                .build()
                .unwrap()
        })
        .collect()
}

fn bench_index_build(c: &mut Criterion) {
    let grid = TimeGridDefinition::default();
    let mut group = c.benchmark_group("slot_index_build");

    for count in [10, 100, 500].iter() {
        let slots = week_of_slots(*count, &grid);
        group.bench_with_input(BenchmarkId::from_parameter(count), &slots, |b, slots| {
            b.iter(|| SlotIndex::build(black_box(slots), black_box(CoachFilter::All)));
        });
    }

    group.finish();
}

fn bench_layout_build(c: &mut Criterion) {
    let grid = TimeGridDefinition::default();
    let mut group = c.benchmark_group("grid_layout_build");

    for count in [10, 100, 500].iter() {
        let index = SlotIndex::build(&week_of_slots(*count, &grid), CoachFilter::Coach(1));
        group.bench_with_input(BenchmarkId::from_parameter(count), &index, |b, index| {
            b.iter(|| GridLayout::build(black_box(&grid), black_box(index), week(), week()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_index_build, bench_layout_build);
criterion_main!(benches);
