// Plan aggregation: pivots filtered insertions into a program x date matrix.
//
// Events are grouped by (program, date). Each group contributes its
// insertion count and the most frequent start time among its events. A
// program's representative time comes from its earliest timed group.
use crate::types::{DayMonth, Event, Plan, PlanRow, TotalsRow};
use crate::util::{format_count, format_time, minutes_key};
use chrono::{NaiveDate, NaiveTime};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

pub const PROGRAM_HEADER: &str = "Título Programa";
pub const TIME_HEADER: &str = "Hora Inicio";
pub const TOTAL_LABEL: &str = "Total";

#[derive(Default)]
struct GroupAcc {
    insertions: u32,
    times: Vec<NaiveTime>,
}

/// Most frequent time; ties go to the earliest time. Absent times do not
/// vote.
pub fn mode_time(times: &[NaiveTime]) -> Option<NaiveTime> {
    let mut freq: BTreeMap<NaiveTime, usize> = BTreeMap::new();
    for t in times {
        *freq.entry(*t).or_insert(0) += 1;
    }
    let mut best: Option<(NaiveTime, usize)> = None;
    for (time, count) in freq {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((time, count)),
        }
    }
    best.map(|(time, _)| time)
}

pub fn build_plan(events: &[Event]) -> Plan {
    let mut groups: BTreeMap<(&str, NaiveDate), GroupAcc> = BTreeMap::new();
    for e in events {
        let acc = groups
            .entry((e.program_title.as_str(), e.date))
            .or_default();
        acc.insertions += e.count;
        if let Some(t) = e.start_time {
            acc.times.push(t);
        }
    }

    // Keys iterate program first, then date. A program's representative time
    // is the mode of its earliest group that has any start time.
    let mut representative: BTreeMap<&str, NaiveTime> = BTreeMap::new();
    let mut cells: BTreeMap<&str, BTreeMap<DayMonth, u32>> = BTreeMap::new();
    let mut columns: BTreeSet<DayMonth> = BTreeSet::new();
    for ((program, date), acc) in &groups {
        if !representative.contains_key(program) {
            if let Some(time) = mode_time(&acc.times) {
                representative.insert(*program, time);
            }
        }
        let column = DayMonth::from(*date);
        columns.insert(column);
        *cells.entry(*program).or_default().entry(column).or_insert(0) += acc.insertions;
    }

    let dates: Vec<DayMonth> = columns.into_iter().collect();
    let mut rows: Vec<PlanRow> = cells
        .into_iter()
        .map(|(program, by_date)| {
            let counts_by_date: Vec<u32> = dates
                .iter()
                .map(|d| by_date.get(d).copied().unwrap_or(0))
                .collect();
            PlanRow {
                program_title: program.to_string(),
                representative_start_time: representative.get(program).copied(),
                total: counts_by_date.iter().sum(),
                counts_by_date,
            }
        })
        .collect();

    let mut column_sums = vec![0u32; dates.len()];
    for row in &rows {
        for (sum, n) in column_sums.iter_mut().zip(&row.counts_by_date) {
            *sum += n;
        }
    }
    let totals = TotalsRow {
        total: column_sums.iter().sum(),
        counts_by_date: column_sums,
    };

    // Stable sort: rows sharing a key keep their alphabetical order.
    rows.sort_by(|a, b| {
        minutes_key(a.representative_start_time).total_cmp(&minutes_key(b.representative_start_time))
    });

    debug!(
        groups = groups.len(),
        programs = rows.len(),
        dates = dates.len(),
        insertions = totals.total,
        "plan built"
    );
    Plan {
        dates,
        rows,
        totals,
    }
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn grand_total(&self) -> u32 {
        self.totals.total
    }

    /// Column headers of the tabular form: label, time, total, then dates.
    pub fn header(&self) -> Vec<String> {
        let mut header = vec![
            PROGRAM_HEADER.to_string(),
            TIME_HEADER.to_string(),
            TOTAL_LABEL.to_string(),
        ];
        header.extend(self.dates.iter().map(DayMonth::to_string));
        header
    }

    /// Program rows followed by the `Total` row, zero counts left blank.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        let mut out: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                display_row(
                    row.program_title.clone(),
                    format_time(row.representative_start_time),
                    row.total,
                    &row.counts_by_date,
                )
            })
            .collect();
        out.push(display_row(
            TOTAL_LABEL.to_string(),
            String::new(),
            self.totals.total,
            &self.totals.counts_by_date,
        ));
        out
    }
}

fn display_row(label: String, time: String, total: u32, counts: &[u32]) -> Vec<String> {
    let mut cells = vec![label, time, format_count(total)];
    cells.extend(counts.iter().map(|n| format_count(*n)));
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32, s: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, s)
    }

    fn scenario() -> Vec<Event> {
        vec![
            Event::new("ProgA", d(2024, 1, 1), t(8, 0, 0), "Promo1", "TypeX"),
            Event::new("ProgA", d(2024, 1, 2), t(8, 0, 0), "Promo1", "TypeX"),
            Event::new("ProgB", d(2024, 1, 1), t(20, 0, 0), "Promo2", "TypeY"),
        ]
    }

    #[test]
    fn end_to_end_scenario() {
        let plan = build_plan(&scenario());
        assert_eq!(
            plan.header(),
            vec!["Título Programa", "Hora Inicio", "Total", "01/01", "02/01"]
        );
        assert_eq!(
            plan.display_rows(),
            vec![
                vec!["ProgA", "08:00:00", "2", "1", "1"],
                vec!["ProgB", "20:00:00", "1", "1", ""],
                vec!["Total", "", "3", "2", "1"],
            ]
        );
    }

    #[test]
    fn row_totals_match_their_cells() {
        let mut events = scenario();
        events.push(Event::new("ProgC", d(2024, 1, 5), None, "Promo1", "TypeX"));
        events.push(Event::new("ProgC", d(2024, 1, 5), None, "Promo1", "TypeX"));
        let plan = build_plan(&events);
        for row in &plan.rows {
            assert_eq!(row.counts_by_date.iter().sum::<u32>(), row.total);
        }
        let grand: u32 = events.iter().map(|e| e.count).sum();
        assert_eq!(plan.grand_total(), grand);
    }

    #[test]
    fn columns_sort_by_day_month_key() {
        let events = vec![
            Event::new("P", d(2024, 3, 1), t(9, 0, 0), "x", "y"),
            Event::new("P", d(2024, 1, 15), t(9, 0, 0), "x", "y"),
            Event::new("P", d(2024, 1, 31), t(9, 0, 0), "x", "y"),
        ];
        let plan = build_plan(&events);
        let labels: Vec<String> = plan.dates.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["15/01", "31/01", "01/03"]);
    }

    #[test]
    fn same_day_month_across_years_share_a_column() {
        let events = vec![
            Event::new("P", d(2023, 12, 31), t(9, 0, 0), "x", "y"),
            Event::new("P", d(2024, 1, 1), t(9, 0, 0), "x", "y"),
            Event::new("P", d(2025, 1, 1), t(9, 0, 0), "x", "y"),
        ];
        let plan = build_plan(&events);
        let labels: Vec<String> = plan.dates.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["01/01", "31/12"]);
        assert_eq!(plan.rows[0].counts_by_date, vec![2, 1]);
    }

    #[test]
    fn rows_sort_by_time_with_absent_last() {
        let events = vec![
            Event::new("Late", d(2024, 1, 1), t(8, 0, 30), "x", "y"),
            Event::new("NoTime", d(2024, 1, 1), None, "x", "y"),
            Event::new("Early", d(2024, 1, 1), t(8, 0, 0), "x", "y"),
        ];
        let plan = build_plan(&events);
        let order: Vec<&str> = plan.rows.iter().map(|r| r.program_title.as_str()).collect();
        assert_eq!(order, vec!["Early", "Late", "NoTime"]);
        assert_eq!(plan.rows[2].representative_start_time, None);
        assert_eq!(plan.display_rows().last().unwrap()[0], "Total");
    }

    #[test]
    fn representative_time_comes_from_earliest_date() {
        let events = vec![
            Event::new("P", d(2024, 1, 2), t(21, 0, 0), "x", "y"),
            Event::new("P", d(2024, 1, 2), t(21, 0, 0), "x", "y"),
            Event::new("P", d(2024, 1, 2), t(21, 0, 0), "x", "y"),
            Event::new("P", d(2024, 1, 1), t(7, 30, 0), "x", "y"),
        ];
        let plan = build_plan(&events);
        assert_eq!(plan.rows[0].representative_start_time, t(7, 30, 0));
    }

    #[test]
    fn representative_time_skips_groups_without_times() {
        let events = vec![
            Event::new("P", d(2024, 1, 1), None, "x", "y"),
            Event::new("P", d(2024, 1, 2), t(21, 0, 0), "x", "y"),
            Event::new("P", d(2024, 1, 3), t(6, 0, 0), "x", "y"),
            Event::new("Q", d(2024, 1, 1), t(22, 0, 0), "x", "y"),
            Event::new("R", d(2024, 1, 1), None, "x", "y"),
            Event::new("R", d(2024, 1, 2), None, "x", "y"),
        ];
        let plan = build_plan(&events);
        let rows: Vec<(&str, Option<NaiveTime>)> = plan
            .rows
            .iter()
            .map(|r| (r.program_title.as_str(), r.representative_start_time))
            .collect();
        assert_eq!(
            rows,
            vec![("P", t(21, 0, 0)), ("Q", t(22, 0, 0)), ("R", None)]
        );
    }

    #[test]
    fn mode_prefers_frequency_then_earliest() {
        let a = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let b = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(mode_time(&[a, a, b]), Some(a));
        assert_eq!(mode_time(&[a, b]), Some(b));
        assert_eq!(mode_time(&[]), None);
    }

    #[test]
    fn group_with_some_times_ignores_missing_ones() {
        let events = vec![
            Event::new("P", d(2024, 1, 1), None, "x", "y"),
            Event::new("P", d(2024, 1, 1), None, "x", "y"),
            Event::new("P", d(2024, 1, 1), t(12, 0, 0), "x", "y"),
        ];
        let plan = build_plan(&events);
        assert_eq!(plan.rows[0].representative_start_time, t(12, 0, 0));
        assert_eq!(plan.rows[0].total, 3);
    }

    #[test]
    fn empty_input_gives_empty_plan() {
        let plan = build_plan(&[]);
        assert!(plan.is_empty());
        assert!(plan.dates.is_empty());
        assert_eq!(plan.grand_total(), 0);
        assert_eq!(plan.display_rows(), vec![vec!["Total", "", ""]]);
    }
}
