use crate::error::OutputError;
use crate::types::Plan;
use serde::Serialize;
use std::path::Path;
use tabled::{builder::Builder, settings::Style, Table, Tabled};
use tracing::info;

/// Write the plan in its display form: zero cells stay blank.
pub fn write_plan_csv<P: AsRef<Path>>(path: P, plan: &Plan) -> Result<(), OutputError> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(plan.header())?;
    for row in plan.display_rows() {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    info!(path = %path.display(), rows = plan.rows.len() + 1, "plan exported");
    Ok(())
}

pub fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<(), OutputError> {
    let path = path.as_ref();
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    info!(path = %path.display(), "chart datasets exported");
    Ok(())
}

/// Markdown rendering of the first `max_rows` programs plus the Total row.
pub fn render_plan(plan: &Plan, max_rows: usize) -> String {
    let mut rows = plan.display_rows();
    let Some(total_row) = rows.pop() else {
        return String::new();
    };
    let mut builder = Builder::default();
    builder.push_record(plan.header());
    for row in rows.into_iter().take(max_rows) {
        builder.push_record(row);
    }
    builder.push_record(total_row);
    builder.build().with(Style::markdown()).to_string()
}

pub fn preview_plan(plan: &Plan, max_rows: usize) {
    if plan.is_empty() {
        println!("(no rows)\n");
        return;
    }
    println!("{}\n", render_plan(plan, max_rows));
    if plan.rows.len() > max_rows {
        println!("... {} more programs\n", plan.rows.len() - max_rows);
    }
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}
