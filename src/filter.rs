use crate::plan::build_plan;
use crate::types::{Event, Plan};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::debug;

/// The user's search: an inclusive date window plus the selected products
/// and commercial types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanFilter {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub products: Vec<String>,
    pub commercial_types: Vec<String>,
}

impl PlanFilter {
    pub fn in_range(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.in_range(event.date)
            && self.products.iter().any(|p| *p == event.product)
            && self.commercial_types.iter().any(|t| *t == event.commercial_type)
    }
}

fn distinct_in_order<'a, I>(values: I) -> Vec<String>
where
    I: Iterator<Item = &'a str>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for v in values {
        if !v.is_empty() && seen.insert(v) {
            out.push(v.to_string());
        }
    }
    out
}

/// Distinct products with at least one insertion in `[start, end]`, in
/// first-seen order.
pub fn promotions_in_range(events: &[Event], start: NaiveDate, end: NaiveDate) -> Vec<String> {
    distinct_in_order(
        events
            .iter()
            .filter(|e| start <= e.date && e.date <= end)
            .map(|e| e.product.as_str()),
    )
}

pub fn commercial_types(events: &[Event]) -> Vec<String> {
    distinct_in_order(events.iter().map(|e| e.commercial_type.as_str()))
}

pub fn apply(events: &[Event], filter: &PlanFilter) -> Vec<Event> {
    let filtered: Vec<Event> = events.iter().filter(|e| filter.matches(e)).cloned().collect();
    debug!(
        input = events.len(),
        matched = filtered.len(),
        start = %filter.start,
        end = %filter.end,
        "filter applied"
    );
    filtered
}

pub fn build_filtered_plan(events: &[Event], filter: &PlanFilter) -> Plan {
    build_plan(&apply(events, filter))
}

/// Resolve a menu selection against the offered options.
///
/// Accepts `*` for everything, or a comma separated list of 1-based
/// positions and/or option names. Unknown entries are ignored. Blank input
/// selects everything when `blank_selects_all` is set, nothing otherwise.
pub fn parse_selection(input: &str, options: &[String], blank_selects_all: bool) -> Vec<String> {
    let input = input.trim();
    if input == "*" || (input.is_empty() && blank_selects_all) {
        return options.to_vec();
    }
    let mut picked: Vec<String> = Vec::new();
    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let hit = match token.parse::<usize>() {
            Ok(n) if n >= 1 => options.get(n - 1),
            _ => options.iter().find(|o| o.as_str() == token),
        };
        if let Some(option) = hit {
            if !picked.contains(option) {
                picked.push(option.clone());
            }
        }
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> Vec<Event> {
        let t = NaiveTime::from_hms_opt(10, 0, 0);
        vec![
            Event::new("ProgA", d(2024, 1, 1), t, "Promo1", "TypeX"),
            Event::new("ProgA", d(2024, 1, 2), t, "Promo2", "TypeY"),
            Event::new("ProgB", d(2024, 1, 3), t, "Promo1", "TypeX"),
            Event::new("ProgB", d(2024, 1, 9), t, "Promo3", "TypeX"),
            Event::new("ProgC", d(2024, 1, 2), t, "", "TypeZ"),
        ]
    }

    #[test]
    fn promotions_are_distinct_in_first_seen_order() {
        let promos = promotions_in_range(&sample(), d(2024, 1, 1), d(2024, 1, 3));
        assert_eq!(promos, vec!["Promo1", "Promo2"]);
    }

    #[test]
    fn promotions_bounds_are_inclusive() {
        let promos = promotions_in_range(&sample(), d(2024, 1, 9), d(2024, 1, 9));
        assert_eq!(promos, vec!["Promo3"]);
        assert!(promotions_in_range(&[], d(2024, 1, 1), d(2024, 12, 31)).is_empty());
    }

    #[test]
    fn commercial_types_skip_empty() {
        let mut events = sample();
        events[0].commercial_type.clear();
        assert_eq!(commercial_types(&events), vec!["TypeY", "TypeX", "TypeZ"]);
    }

    #[test]
    fn filter_requires_all_three_conditions() {
        let filter = PlanFilter {
            start: d(2024, 1, 1),
            end: d(2024, 1, 3),
            products: vec!["Promo1".into()],
            commercial_types: vec!["TypeX".into()],
        };
        let filtered = apply(&sample(), &filter);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|e| e.product == "Promo1"));
    }

    #[test]
    fn selection_by_position_name_and_wildcard() {
        let options: Vec<String> = vec!["Promo1".into(), "Promo2".into(), "Promo3".into()];
        assert_eq!(parse_selection("*", &options, false), options);
        assert_eq!(parse_selection("", &options, true), options);
        assert!(parse_selection("", &options, false).is_empty());
        assert_eq!(
            parse_selection("3, Promo1, 9, 3", &options, false),
            vec!["Promo3", "Promo1"]
        );
    }
}
