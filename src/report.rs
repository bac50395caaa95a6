use crate::chart::{daily_evolution, earliest_dates, slot_summary, split_by_weekday, to_chart_rows};
use crate::error::SearchError;
use crate::filter::{apply, PlanFilter};
use crate::plan::build_plan;
use crate::types::{ChartDatasets, ChartRow, Event, EvolutionPoint, Plan, SlotShare};
use tracing::{info, warn};

/// Everything produced by one search.
#[derive(Debug, Clone)]
pub struct Report {
    pub plan: Plan,
    pub weekdays: Vec<ChartRow>,
    pub weekend: Vec<ChartRow>,
    pub slot_summary: Vec<SlotShare>,
    pub evolution: Vec<EvolutionPoint>,
}

impl Report {
    pub fn chart_datasets(&self) -> ChartDatasets {
        ChartDatasets {
            weekdays: self.weekdays.clone(),
            weekend: self.weekend.clone(),
            slot_summary: self.slot_summary.clone(),
            evolution: self.evolution.clone(),
        }
    }
}

/// Filter the loaded events and rebuild the plan and chart datasets.
pub fn run_search(events: &[Event], filter: &PlanFilter) -> Result<Report, SearchError> {
    if filter.commercial_types.is_empty() {
        warn!("search rejected: no commercial type selected");
        return Err(SearchError::NoCommercialType);
    }
    let filtered = apply(events, filter);
    if filtered.is_empty() {
        warn!(
            products = filter.products.len(),
            commercial_types = filter.commercial_types.len(),
            "search matched no insertions"
        );
        return Err(SearchError::NoData);
    }

    let plan = build_plan(&filtered);
    let chart_rows = to_chart_rows(&plan);
    let split = split_by_weekday(&chart_rows, &earliest_dates(&filtered));
    // The slot breakdown covers Monday to Friday programs only.
    let slot_summary = slot_summary(&split.weekdays);
    let evolution = daily_evolution(&filtered);

    info!(
        programs = plan.rows.len(),
        dates = plan.dates.len(),
        insertions = plan.grand_total(),
        weekday_rows = split.weekdays.len(),
        weekend_rows = split.weekend.len(),
        "report generated"
    );
    Ok(Report {
        plan,
        weekdays: split.weekdays,
        weekend: split.weekend,
        slot_summary,
        evolution,
    })
}
