use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::*;
use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use fleet_health_monitor::client::VehicleApiClient;
use fleet_health_monitor::dashboard::{self, DashboardConfig, DashboardHandle, FormField};
use fleet_health_monitor::presentation::render_dashboard;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Los logs van a stderr para no ensuciar la pantalla
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DashboardConfig::from_env()?;
    let api = VehicleApiClient::new(config.api_base_url.clone())
        .context("No se pudo crear el cliente HTTP")?;

    println!("{}", "🚚 Fleet Health Dashboard".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!("{} {}", "📡 API:".bright_cyan(), api.base_url());
    println!();

    let handle = dashboard::mount(Arc::new(api), &config);
    let mut snapshots = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    redraw(&handle)?;

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                redraw(&handle)?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_input(&handle, line.trim()) {
                    break;
                }
            }
        }
    }

    handle.unmount().await;
    println!("{}", "👋 ¡Hasta luego!".bright_green());
    Ok(())
}

fn redraw(handle: &DashboardHandle) -> Result<()> {
    let snapshot = handle.snapshot();
    // Limpiar pantalla y volver al inicio
    print!("\x1B[2J\x1B[H");
    println!("{}", render_dashboard(&snapshot));
    println!();
    print_menu();
    std::io::stdout().flush()?;
    Ok(())
}

fn print_menu() {
    println!("{}", "📋 COMANDOS".bright_green().bold());
    println!("  s <término>                        🔍 Buscar por Vehicle ID (vacío = todos)");
    println!("  r                                  🔄 Refrescar ahora");
    println!("  a <id> <temp> <vibración> <estado> ➕ Añadir registro");
    println!("  f <campo> <valor>                  ✏️  Editar un campo del formulario");
    println!("  submit                             📤 Enviar el formulario");
    println!("  d                                  🧹 Cerrar la alerta");
    println!("  q                                  🚪 Salir");
    print!("{}", "> ".bright_yellow());
}

/// Devuelve `false` para salir
fn handle_input(handle: &DashboardHandle, input: &str) -> bool {
    let (command, rest) = input
        .split_once(char::is_whitespace)
        .map(|(c, r)| (c, r.trim()))
        .unwrap_or((input, ""));

    let sent = match command {
        "q" | "quit" => return false,
        "s" | "search" => handle.set_search_term(rest),
        "r" | "refresh" => handle.refresh(),
        "d" | "dismiss" => handle.dismiss_alert(),
        "submit" => handle.submit_form(),
        "f" | "field" => match rest.split_once(char::is_whitespace) {
            Some((field, value)) => match field.parse::<FormField>() {
                Ok(field) => handle.set_form_field(field, value.trim()),
                Err(e) => {
                    println!("{}", format!("❌ {}", e).bright_red());
                    return true;
                }
            },
            None => {
                println!("{}", "❌ Uso: f <campo> <valor>".bright_red());
                return true;
            }
        },
        "a" | "add" => {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            let [vehicle_id, temperature, vibration, status] = parts.as_slice() else {
                println!("{}", "❌ Uso: a <id> <temp> <vibración> <estado>".bright_red());
                return true;
            };
            let fields = [
                (FormField::VehicleId, *vehicle_id),
                (FormField::Temperature, *temperature),
                (FormField::Vibration, *vibration),
                (FormField::AiStatus, *status),
            ];
            fields
                .into_iter()
                .try_for_each(|(field, value)| handle.set_form_field(field, value))
                .and_then(|_| handle.submit_form())
        }
        "" => return true,
        other => {
            println!("{}", format!("❌ Comando desconocido: {}", other).bright_red());
            return true;
        }
    };

    sent.is_ok()
}
