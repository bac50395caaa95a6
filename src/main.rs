// Entry point and high-level CLI flow.
//
// - Option [1] loads the insertion CSV once and prints load diagnostics.
// - Option [2] asks for a date range, promotions and commercial types,
//   prints the plan with its chart summaries and exports them to files.
// - After a report, the user can go back to the menu or exit.
use chrono::{Duration, Local, NaiveDate};
use once_cell::sync::Lazy;
use plan_report::config::AppConfig;
use plan_report::error::SearchError;
use plan_report::filter::{commercial_types, parse_selection, promotions_in_range, PlanFilter};
use plan_report::logging::init_logging;
use plan_report::report::{run_search, Report};
use plan_report::types::Event;
use plan_report::util::{format_int, parse_date_safe};
use plan_report::{loader, output};
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use tracing::{error, warn};

// Loaded events live for the whole session so the CSV is read only once.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { events: None }));

struct AppState {
    events: Option<Vec<Event>>,
}

fn prompt(label: &str) -> String {
    print!("{}", label);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    if let Ok(0) = io::stdin().read_line(&mut buf) {
        // stdin closed: nothing more to ask.
        println!();
        std::process::exit(0);
    }
    buf.trim().to_string()
}

fn read_choice() -> String {
    prompt("Enter choice: ")
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        match prompt("Back to Report Selection (Y/N): ").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

fn prompt_date(label: &str, default: NaiveDate) -> NaiveDate {
    loop {
        let input = prompt(&format!("{} [{}]: ", label, default.format("%d/%m/%Y")));
        if input.is_empty() {
            return default;
        }
        match parse_date_safe(Some(&input)) {
            Some(date) => return date,
            None => println!("Invalid date. Use DD/MM/YYYY."),
        }
    }
}

fn print_options(options: &[String]) {
    for (i, option) in options.iter().enumerate() {
        println!("  [{}] {}", i + 1, option);
    }
}

fn handle_load(config: &AppConfig) {
    match loader::load_events(&config.csv_path) {
        Ok((events, report)) => {
            println!(
                "Processing dataset... ({} rows read, {} insertions loaded)",
                format_int(report.total_rows),
                format_int(report.loaded_rows)
            );
            println!(
                "Note: {} rows dropped for invalid Fecha, {} undecodable.",
                format_int(report.dropped_dates),
                format_int(report.parse_errors)
            );
            if report.missing_times > 0 {
                println!(
                    "Info: {} insertions have no Hora Inicio.",
                    format_int(report.missing_times)
                );
            }
            println!();
            let mut state = APP_STATE.lock().unwrap_or_else(PoisonError::into_inner);
            state.events = Some(events);
        }
        Err(e) => {
            error!(error = %e, path = %config.csv_path.display(), "load failed");
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

fn ask_filter(events: &[Event]) -> PlanFilter {
    let today = Local::now().date_naive();
    let start = prompt_date("Fecha de inicio", today - Duration::days(7));
    let end = prompt_date("Fecha de fin", today);

    let promotions = promotions_in_range(events, start, end);
    println!("\nPromociones in range ({}):", promotions.len());
    print_options(&promotions);
    let products = parse_selection(
        &prompt("Select promotions (numbers/names, comma separated, * for all): "),
        &promotions,
        false,
    );

    let types = commercial_types(events);
    println!("\nTipos comerciales:");
    print_options(&types);
    let selected_types = parse_selection(
        &prompt("Select commercial types (blank for all): "),
        &types,
        true,
    );

    PlanFilter {
        start,
        end,
        products,
        commercial_types: selected_types,
    }
}

fn print_report(report: &Report, config: &AppConfig) {
    println!("Plan\n");
    output::preview_plan(&report.plan, config.preview_rows);

    println!("INSERCIONES LUNES A VIERNES\n");
    output::preview_table_rows(&report.weekdays, config.preview_rows);
    println!("INSERCIONES SÁBADO Y DOMINGO\n");
    if report.weekend.is_empty() {
        println!("No hay datos para sábado y domingo.\n");
    } else {
        output::preview_table_rows(&report.weekend, config.preview_rows);
    }

    println!("Tabla Resumen por Franja Horaria\n");
    output::preview_table_rows(&report.slot_summary, report.slot_summary.len());
    println!("Evolución diaria de inserciones\n");
    output::preview_table_rows(&report.evolution, report.evolution.len());
}

fn export_report(report: &Report, config: &AppConfig) {
    let plan_file = config.output_dir.join("plan.csv");
    match output::write_plan_csv(&plan_file, &report.plan) {
        Ok(()) => println!("(Full plan exported to {})", plan_file.display()),
        Err(e) => eprintln!("Write error: {}", e),
    }
    let charts_file = config.output_dir.join("charts.json");
    match output::write_json(&charts_file, &report.chart_datasets()) {
        Ok(()) => println!("(Chart datasets exported to {})\n", charts_file.display()),
        Err(e) => eprintln!("Write error: {}", e),
    }
}

fn handle_generate_plan(config: &AppConfig) {
    let events = {
        let state = APP_STATE.lock().unwrap_or_else(PoisonError::into_inner);
        state.events.clone()
    };
    let Some(events) = events else {
        println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
        return;
    };

    let filter = ask_filter(&events);
    println!();
    match run_search(&events, &filter) {
        Ok(report) => {
            print_report(&report, config);
            export_report(&report, config);
        }
        Err(SearchError::NoCommercialType) => {
            println!("Warning: Debes seleccionar al menos un Tipo Comercial.\n");
        }
        Err(SearchError::NoData) => {
            println!("Warning: No hay datos para los filtros seleccionados.\n");
        }
    }
}

fn main() {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();
    init_logging(&config);
    for message in &config.warnings {
        warn!("{}", message);
    }

    loop {
        println!("Informe de Inserciones");
        println!("[1] Load the file");
        println!("[2] Generate Plan\n");
        match read_choice().as_str() {
            "1" => handle_load(&config),
            "2" => {
                println!();
                handle_generate_plan(&config);
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => println!("Invalid choice. Please enter 1 or 2.\n"),
        }
    }
}
