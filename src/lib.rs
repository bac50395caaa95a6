//! Commercial insertion plan reports.
//!
//! Loads a CSV log of ads aired within TV programs and turns a filtered
//! slice of it into a program x date insertion plan plus the datasets used
//! by the time-slot and daily evolution charts.
pub mod chart;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod output;
pub mod plan;
pub mod report;
pub mod slots;
pub mod types;
pub mod util;

pub use chart::{daily_evolution, slot_summary, split_by_weekday, to_chart_rows};
pub use filter::{build_filtered_plan, promotions_in_range, PlanFilter};
pub use plan::build_plan;
pub use report::{run_search, Report};
pub use slots::{classify, SlotLabel, TimeSlot};
