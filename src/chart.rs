use crate::slots::{classify, SlotLabel};
use crate::types::{ChartRow, Event, EvolutionPoint, Plan, SlotShare};
use crate::util::{format_number, minutes_key};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::{BTreeMap, HashMap};

/// Per-program chart rows, Total row excluded, ordered by start time.
pub fn to_chart_rows(plan: &Plan) -> Vec<ChartRow> {
    let mut rows: Vec<ChartRow> = plan
        .rows
        .iter()
        .map(|row| ChartRow {
            program_title: row.program_title.clone(),
            representative_start_time: row.representative_start_time,
            total: row.total,
            time_slot: classify(row.representative_start_time),
        })
        .collect();
    rows.sort_by(|a, b| {
        minutes_key(a.representative_start_time).total_cmp(&minutes_key(b.representative_start_time))
    });
    rows
}

/// Earliest insertion date per program over the filtered events.
pub fn earliest_dates(events: &[Event]) -> HashMap<String, NaiveDate> {
    let mut out: HashMap<String, NaiveDate> = HashMap::new();
    for e in events {
        out.entry(e.program_title.clone())
            .and_modify(|d| {
                if e.date < *d {
                    *d = e.date;
                }
            })
            .or_insert(e.date);
    }
    out
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekdaySplit {
    pub weekdays: Vec<ChartRow>,
    pub weekend: Vec<ChartRow>,
}

/// Partition chart rows by the weekday of each program's earliest date.
/// Programs absent from `earliest` are left out of both sides.
pub fn split_by_weekday(rows: &[ChartRow], earliest: &HashMap<String, NaiveDate>) -> WeekdaySplit {
    let mut split = WeekdaySplit::default();
    for row in rows {
        let Some(date) = earliest.get(&row.program_title) else {
            continue;
        };
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => split.weekend.push(row.clone()),
            _ => split.weekdays.push(row.clone()),
        }
    }
    split
}

/// Insertions per slot, largest first, with each slot's percentage share.
pub fn slot_summary(rows: &[ChartRow]) -> Vec<SlotShare> {
    let mut order: Vec<SlotLabel> = Vec::new();
    let mut totals: HashMap<SlotLabel, u32> = HashMap::new();
    for row in rows {
        let entry = totals.entry(row.time_slot).or_insert_with(|| {
            order.push(row.time_slot);
            0
        });
        *entry += row.total;
    }
    let grand: u32 = totals.values().sum();

    let mut summary: Vec<SlotShare> = order
        .into_iter()
        .map(|slot| {
            let total = totals.get(&slot).copied().unwrap_or(0);
            let pct = if grand == 0 {
                0.0
            } else {
                f64::from(total) / f64::from(grand) * 100.0
            };
            SlotShare {
                time_slot: slot,
                total,
                share: format_number(pct, 2),
            }
        })
        .collect();
    summary.sort_by(|a, b| b.total.cmp(&a.total));
    summary
}

/// Insertions per calendar date (year included), ascending.
pub fn daily_evolution(events: &[Event]) -> Vec<EvolutionPoint> {
    let mut by_date: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for e in events {
        *by_date.entry(e.date).or_insert(0) += e.count;
    }
    by_date
        .into_iter()
        .map(|(date, insertions)| EvolutionPoint { date, insertions })
        .collect()
}
