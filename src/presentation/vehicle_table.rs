//! Tabla de registros
//!
//! Tres vistas posibles: cargando, vacía o una fila por registro.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use colored::Colorize;

use super::status_badge::render_badge;
use crate::models::{AiStatus, VehicleRecord};

pub const EMPTY_MESSAGE: &str = "No vehicle data found";
pub const LOADING_MESSAGE: &str = "Loading vehicle data...";
const TIMESTAMP_FORMAT: &str = "%b %-d, %I:%M:%S %p";
const MISSING: &str = "-";

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub vehicle_id: String,
    pub temperature: String,
    pub vibration: String,
    pub ai_status: Option<AiStatus>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    Loading,
    Empty,
    Rows(Vec<TableRow>),
}

/// Mientras haya un fetch en vuelo la tabla muestra la vista de carga,
/// aunque ya existan filas
pub fn table_view(records: &[VehicleRecord], loading: bool) -> TableView {
    if loading {
        return TableView::Loading;
    }
    if records.is_empty() {
        return TableView::Empty;
    }
    TableView::Rows(records.iter().map(|r| table_row(r, &Local)).collect())
}

pub fn table_row<Tz: TimeZone>(record: &VehicleRecord, tz: &Tz) -> TableRow
where
    Tz::Offset: Display,
{
    TableRow {
        vehicle_id: record
            .vehicle_id
            .clone()
            .unwrap_or_else(|| MISSING.to_string()),
        temperature: record
            .temperature
            .map(|t| format!("{}°C", t))
            .unwrap_or_else(|| MISSING.to_string()),
        vibration: record
            .vibration
            .map(|v| v.to_string())
            .unwrap_or_else(|| MISSING.to_string()),
        ai_status: record.ai_status,
        timestamp: format_timestamp_in(&record.timestamp, tz),
    }
}

pub fn format_timestamp_in<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(tz)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

pub fn render_table(view: &TableView) -> String {
    match view {
        TableView::Loading => LOADING_MESSAGE.bright_blue().to_string(),
        TableView::Empty => EMPTY_MESSAGE.bright_black().to_string(),
        TableView::Rows(rows) => {
            let mut out = format!(
                "{:<16} {:>12} {:>10}  {:<12} {}\n",
                "Vehicle ID", "Temperature", "Vibration", "AI Status", "Timestamp"
            )
            .bold()
            .to_string();
            for row in rows {
                out.push_str(&format!(
                    "{:<16} {:>12} {:>10}  {:<12} {}\n",
                    row.vehicle_id,
                    row.temperature,
                    row.vibration,
                    render_badge(row.ai_status),
                    row.timestamp
                ));
            }
            out
        }
    }
}
