use crate::slots::SlotLabel;
use crate::util::format_time;
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use tabled::Tabled;

/// One line of the insertion CSV (`Fecha`, `Hora Inicio`, `Producto`,
/// `Tipo Comercial`, `Título Programa`), before any validation.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub fecha: Option<String>,
    pub hora_inicio: Option<String>,
    pub producto: Option<String>,
    pub tipo_comercial: Option<String>,
    pub titulo_programa: Option<String>,
}

/// A single aired insertion after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub product: String,
    pub commercial_type: String,
    pub program_title: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub count: u32,
}

impl Event {
    pub fn new(
        program_title: &str,
        date: NaiveDate,
        start_time: Option<NaiveTime>,
        product: &str,
        commercial_type: &str,
    ) -> Self {
        Event {
            product: product.to_string(),
            commercial_type: commercial_type.to_string(),
            program_title: program_title.to_string(),
            date,
            start_time,
            count: 1,
        }
    }
}

/// Plan column key: a calendar date without its year.
///
/// Ordering uses `day + month * 100`, so dates from different years that
/// share day and month land in the same column, and a December/January
/// range sorts January first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayMonth {
    pub day: u32,
    pub month: u32,
}

impl DayMonth {
    pub fn sort_key(&self) -> u32 {
        self.day + self.month * 100
    }
}

impl From<NaiveDate> for DayMonth {
    fn from(date: NaiveDate) -> Self {
        DayMonth {
            day: date.day(),
            month: date.month(),
        }
    }
}

impl Ord for DayMonth {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for DayMonth {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.day, self.month)
    }
}

/// One program line of the plan. `counts_by_date` is aligned with
/// [`Plan::dates`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRow {
    pub program_title: String,
    pub representative_start_time: Option<NaiveTime>,
    pub counts_by_date: Vec<u32>,
    pub total: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TotalsRow {
    pub counts_by_date: Vec<u32>,
    pub total: u32,
}

/// Program x date insertion matrix with its derived totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub dates: Vec<DayMonth>,
    pub rows: Vec<PlanRow>,
    pub totals: TotalsRow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct ChartRow {
    #[serde(rename = "Título Programa")]
    #[tabled(rename = "Título Programa")]
    pub program_title: String,
    #[serde(rename = "Hora Inicio")]
    #[tabled(rename = "Hora Inicio", display_with = "display_time")]
    pub representative_start_time: Option<NaiveTime>,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total")]
    pub total: u32,
    #[serde(rename = "Franja Horaria")]
    #[tabled(rename = "Franja Horaria")]
    pub time_slot: SlotLabel,
}

fn display_time(time: &Option<NaiveTime>) -> String {
    format_time(*time)
}

/// Insertions aggregated per time slot, with their share of the whole.
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct SlotShare {
    #[serde(rename = "Franja Horaria")]
    #[tabled(rename = "Franja Horaria")]
    pub time_slot: SlotLabel,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total")]
    pub total: u32,
    #[serde(rename = "Porcentaje")]
    #[tabled(rename = "%")]
    pub share: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct EvolutionPoint {
    #[serde(rename = "Fecha")]
    #[tabled(rename = "Fecha")]
    pub date: NaiveDate,
    #[serde(rename = "Inserciones")]
    #[tabled(rename = "Inserciones")]
    pub insertions: u32,
}

/// Everything the chart renderer consumes, exported as one JSON document.
#[derive(Debug, Clone, Serialize)]
pub struct ChartDatasets {
    pub weekdays: Vec<ChartRow>,
    pub weekend: Vec<ChartRow>,
    pub slot_summary: Vec<SlotShare>,
    pub evolution: Vec<EvolutionPoint>,
}
