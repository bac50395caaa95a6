use crate::error::LoadError;
use crate::types::{Event, RawRow};
use crate::util::{clean_text, parse_date_safe, parse_time_safe};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
    pub dropped_dates: usize,
    pub missing_times: usize,
}

/// Positions of the known columns in the header. Extra columns are ignored
/// and short rows read their missing fields as absent.
struct ColumnIndex {
    fecha: usize,
    hora_inicio: Option<usize>,
    producto: Option<usize>,
    tipo_comercial: Option<usize>,
    titulo_programa: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        Ok(ColumnIndex {
            fecha: find("Fecha").ok_or(LoadError::MissingColumn("Fecha"))?,
            hora_inicio: find("Hora Inicio"),
            producto: find("Producto"),
            tipo_comercial: find("Tipo Comercial"),
            titulo_programa: find("Título Programa"),
        })
    }

    fn raw_row(&self, record: &StringRecord) -> RawRow {
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(str::to_string);
        RawRow {
            fecha: field(Some(self.fecha)),
            hora_inicio: field(self.hora_inicio),
            producto: field(self.producto),
            tipo_comercial: field(self.tipo_comercial),
            titulo_programa: field(self.titulo_programa),
        }
    }
}

pub fn load_events<P: AsRef<Path>>(path: P) -> Result<(Vec<Event>, LoadReport), LoadError> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading insertion log");
    let file = File::open(path)?;
    load_events_from_reader(file)
}

pub fn load_events_from_reader<R: Read>(reader: R) -> Result<(Vec<Event>, LoadReport), LoadError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = ColumnIndex::from_headers(rdr.headers()?)?;

    let mut report = LoadReport::default();
    let mut events: Vec<Event> = Vec::new();

    for result in rdr.records() {
        report.total_rows += 1;
        let row = match result {
            Ok(record) => columns.raw_row(&record),
            Err(e) => {
                debug!(row = report.total_rows, error = %e, "skipping undecodable row");
                report.parse_errors += 1;
                continue;
            }
        };

        let Some(date) = parse_date_safe(row.fecha.as_deref()) else {
            report.dropped_dates += 1;
            continue;
        };
        let start_time = parse_time_safe(row.hora_inicio.as_deref());
        if start_time.is_none() {
            report.missing_times += 1;
        }

        events.push(Event {
            product: clean_text(row.producto),
            commercial_type: clean_text(row.tipo_comercial),
            program_title: clean_text(row.titulo_programa),
            date,
            start_time,
            count: 1,
        });
    }

    report.loaded_rows = events.len();
    info!(
        total = report.total_rows,
        loaded = report.loaded_rows,
        dropped_dates = report.dropped_dates,
        parse_errors = report.parse_errors,
        "insertion log loaded"
    );
    Ok((events, report))
}
