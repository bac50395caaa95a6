use chrono::NaiveDate;
use plan_report::error::SearchError;
use plan_report::loader::load_events;
use plan_report::output::{write_json, write_plan_csv};
use plan_report::{build_filtered_plan, promotions_in_range, run_search, PlanFilter};
use std::io::Write;

const LOG: &str = "\
Fecha,Hora Inicio,Producto,Tipo Comercial,Título Programa
01/01/2024,08:00:00,Promo1,TypeX,ProgA
02/01/2024,08:00:00,Promo1,TypeX,ProgA
01/01/2024,20:00:00,Promo2,TypeY,ProgB
06/01/2024,14:10:00,Promo1,TypeX,ProgS
06/01/2024,14:10:00,Promo1,TypeZ,ProgS
??/01/2024,10:00:00,Promo1,TypeX,ProgA
15/02/2024,10:00:00,Promo9,TypeX,ProgLate
";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_log(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("promocionales.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(LOG.as_bytes()).unwrap();
    path
}

fn january_filter(types: &[&str]) -> PlanFilter {
    PlanFilter {
        start: date(2024, 1, 1),
        end: date(2024, 1, 31),
        products: vec!["Promo1".into(), "Promo2".into()],
        commercial_types: types.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn load_filter_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let (events, load) = load_events(write_log(&dir)).unwrap();
    assert_eq!(load.total_rows, 7);
    assert_eq!(load.dropped_dates, 1);
    assert_eq!(events.len(), 6);

    assert_eq!(
        promotions_in_range(&events, date(2024, 1, 1), date(2024, 1, 31)),
        vec!["Promo1", "Promo2"]
    );

    let report = run_search(&events, &january_filter(&["TypeX", "TypeY"])).unwrap();
    let rows = report.plan.display_rows();
    assert_eq!(rows[0], vec!["ProgA", "08:00:00", "2", "1", "1", ""]);
    assert_eq!(rows[1], vec!["ProgS", "14:10:00", "1", "", "", "1"]);
    assert_eq!(rows[2], vec!["ProgB", "20:00:00", "1", "1", "", ""]);
    assert_eq!(rows[3], vec!["Total", "", "4", "2", "1", "1"]);

    assert_eq!(report.weekend.len(), 1);
    assert_eq!(report.weekend[0].time_slot.label(), "Sobremesa");
    assert_eq!(report.weekdays.len(), 2);
    assert_eq!(report.evolution.len(), 3);

    let plan_path = dir.path().join("plan.csv");
    write_plan_csv(&plan_path, &report.plan).unwrap();
    let exported = std::fs::read_to_string(&plan_path).unwrap();
    assert!(exported.starts_with("Título Programa,Hora Inicio,Total,01/01,02/01,06/01"));

    let charts_path = dir.path().join("charts.json");
    write_json(&charts_path, &report.chart_datasets()).unwrap();
    let charts: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&charts_path).unwrap()).unwrap();
    assert_eq!(charts["weekdays"][0]["Título Programa"], "ProgA");
    assert_eq!(charts["weekdays"][0]["Franja Horaria"], "Despertador");
    assert_eq!(charts["evolution"][0]["Fecha"], "2024-01-01");
}

#[test]
fn filtered_plan_matches_search_plan() {
    let dir = tempfile::tempdir().unwrap();
    let (events, _) = load_events(write_log(&dir)).unwrap();
    let filter = january_filter(&["TypeZ"]);
    let plan = build_filtered_plan(&events, &filter);
    assert_eq!(plan.grand_total(), 1);
    assert_eq!(run_search(&events, &filter).unwrap().plan, plan);
}

#[test]
fn empty_searches_are_reported_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    let (events, _) = load_events(write_log(&dir)).unwrap();

    let mut filter = january_filter(&["TypeX"]);
    filter.products.clear();
    assert_eq!(run_search(&events, &filter).unwrap_err(), SearchError::NoData);
    let plan = build_filtered_plan(&events, &filter);
    assert!(plan.is_empty());
    assert_eq!(plan.grand_total(), 0);

    assert_eq!(
        run_search(&events, &january_filter(&[])).unwrap_err(),
        SearchError::NoCommercialType
    );
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_events(dir.path().join("absent.csv")).is_err());
}
