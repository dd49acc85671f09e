//! Componentes de presentación para terminal
//!
//! Funciones puras sobre un [`DashboardSnapshot`]; no guardan estado.

pub mod stat_cards;
pub mod status_badge;
pub mod vehicle_table;

use chrono::Local;
use colored::Colorize;

use crate::dashboard::DashboardSnapshot;

pub use stat_cards::{render_stat_cards, stat_cards, StatCard};
pub use status_badge::{badge_style, render_badge, BadgeStyle};
pub use vehicle_table::{format_timestamp_in, render_table, table_view, TableRow, TableView};

pub fn render_header(snapshot: &DashboardSnapshot) -> String {
    let updated = snapshot
        .last_refresh
        .with_timezone(&Local)
        .format("%I:%M:%S %p");
    let mut out = format!(
        "{}\n{}",
        "🚚 Fleet Health Monitor".bright_blue().bold(),
        format!("Last updated: {}", updated).bright_black()
    );
    if snapshot.loading {
        out.push_str(&format!(" {}", "⟳".bright_blue()));
    }
    if let Some(error) = &snapshot.error {
        out.push_str(&format!("\n{}", format!("❌ {}", error).bright_red().bold()));
    }
    out
}

/// Pantalla completa: cabecera, tarjetas, búsqueda, tabla y alerta
pub fn render_dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut out = render_header(snapshot);
    out.push_str("\n\n");
    out.push_str(&render_stat_cards(&snapshot.stats));
    out.push_str("\n\n");
    if !snapshot.search_term.is_empty() {
        out.push_str(&format!("🔍 Search: {}\n", snapshot.search_term));
    }
    out.push_str(&render_table(&table_view(&snapshot.records, snapshot.loading)));
    if snapshot.adding {
        out.push_str(&format!("\n{}", "Adding vehicle...".bright_blue()));
    }
    if let Some(alert) = &snapshot.alert {
        out.push_str(&format!("\n{}", format!("⚠️ {}", alert).bright_yellow().bold()));
    }
    out
}
