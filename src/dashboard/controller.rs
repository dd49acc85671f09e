//! Controlador del dashboard
//!
//! Un actor tokio dueño de [`DashboardState`]. Todos los disparadores
//! (montaje, cambio de búsqueda, timer de polling, refresco manual, alta de
//! registro) llegan a un único `select!` y los resultados de red vuelven por
//! un canal propio, así que ninguna tarea concurrente toca el estado.
//! Los snapshots se publican en un canal `watch`.

use std::future::pending;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep_until, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::config::DashboardConfig;
use super::form::FormField;
use super::state::{
    DashboardSnapshot, DashboardState, FetchOutcome, FetchTicket, FetchTrigger, SubmitRejected,
};
use crate::client::{ClientError, VehicleApi};
use crate::models::VehicleRecord;

/// El controlador ya fue desmontado
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("dashboard controller is no longer mounted")]
pub struct DashboardClosed;

#[derive(Debug)]
enum DashboardCommand {
    SetSearchTerm(String),
    Refresh,
    SetFormField(FormField, String),
    SubmitForm,
    DismissAlert,
    Unmount,
}

enum Resolution {
    Fetch {
        ticket: FetchTicket,
        trigger: FetchTrigger,
        result: Result<Vec<VehicleRecord>, ClientError>,
    },
    Submit(Result<VehicleRecord, ClientError>),
}

/// Handle del dashboard montado
pub struct DashboardHandle {
    commands: mpsc::UnboundedSender<DashboardCommand>,
    snapshots: watch::Receiver<DashboardSnapshot>,
    task: JoinHandle<()>,
}

impl DashboardHandle {
    /// Cambiar el término de búsqueda (equivale a teclear en el input)
    pub fn set_search_term(&self, term: impl Into<String>) -> Result<(), DashboardClosed> {
        self.send(DashboardCommand::SetSearchTerm(term.into()))
    }

    /// Refresco manual con el término actual
    pub fn refresh(&self) -> Result<(), DashboardClosed> {
        self.send(DashboardCommand::Refresh)
    }

    pub fn set_form_field(
        &self,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<(), DashboardClosed> {
        self.send(DashboardCommand::SetFormField(field, value.into()))
    }

    pub fn submit_form(&self) -> Result<(), DashboardClosed> {
        self.send(DashboardCommand::SubmitForm)
    }

    pub fn dismiss_alert(&self) -> Result<(), DashboardClosed> {
        self.send(DashboardCommand::DismissAlert)
    }

    /// Último snapshot publicado
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.snapshots.clone()
    }

    /// Desmontar: cancela el timer y espera a que el actor termine.
    /// Los fetches en vuelo terminan solos y su resultado se ignora.
    pub async fn unmount(self) {
        let _ = self.commands.send(DashboardCommand::Unmount);
        if let Err(e) = self.task.await {
            warn!("⚠️ El controlador del dashboard terminó con error: {}", e);
        }
    }

    fn send(&self, command: DashboardCommand) -> Result<(), DashboardClosed> {
        self.commands.send(command).map_err(|_| DashboardClosed)
    }
}

/// Montar el dashboard: lanza el fetch inicial y arranca el polling.
/// Debe llamarse dentro de un runtime tokio.
pub fn mount<A: VehicleApi>(api: Arc<A>, config: &DashboardConfig) -> DashboardHandle {
    let state = DashboardState::new(config.resolution, Utc::now());
    let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (resolution_tx, resolution_rx) = mpsc::unbounded_channel();

    let controller = DashboardController {
        api,
        state,
        poll_interval: config.poll_interval,
        search_debounce: config.search_debounce,
        commands: command_rx,
        resolutions: resolution_rx,
        resolution_tx,
        snapshots: snapshot_tx,
    };

    info!(
        "📡 Dashboard montado (polling cada {:?}, resolución {})",
        config.poll_interval, config.resolution
    );
    let task = tokio::spawn(controller.run());

    DashboardHandle {
        commands: command_tx,
        snapshots: snapshot_rx,
        task,
    }
}

struct DashboardController<A: VehicleApi> {
    api: Arc<A>,
    state: DashboardState,
    poll_interval: Duration,
    search_debounce: Duration,
    commands: mpsc::UnboundedReceiver<DashboardCommand>,
    resolutions: mpsc::UnboundedReceiver<Resolution>,
    resolution_tx: mpsc::UnboundedSender<Resolution>,
    snapshots: watch::Sender<DashboardSnapshot>,
}

impl<A: VehicleApi> DashboardController<A> {
    async fn run(mut self) {
        let mut poll = interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut debounce_deadline: Option<Instant> = None;

        self.start_fetch(self.state.search_filter(), FetchTrigger::Mount);
        self.publish();

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    let Some(command) = command else { break };
                    if !self.handle_command(command, &mut poll, &mut debounce_deadline) {
                        break;
                    }
                }
                Some(resolution) = self.resolutions.recv() => {
                    self.handle_resolution(resolution);
                }
                _ = poll.tick() => {
                    self.start_fetch(self.state.search_filter(), FetchTrigger::Poll);
                }
                _ = wait_for_deadline(debounce_deadline) => {
                    debounce_deadline = None;
                    self.start_fetch(self.state.search_filter(), FetchTrigger::SearchChanged);
                }
            }
            self.publish();
        }

        info!("🛑 Dashboard desmontado, polling detenido");
    }

    /// Devuelve `false` cuando el actor debe terminar
    fn handle_command(
        &mut self,
        command: DashboardCommand,
        poll: &mut Interval,
        debounce_deadline: &mut Option<Instant>,
    ) -> bool {
        match command {
            DashboardCommand::SetSearchTerm(term) => {
                if self.state.set_search_term(&term) {
                    // El periodo de polling se reinicia con cada cambio de búsqueda
                    poll.reset();
                    if self.search_debounce.is_zero() {
                        self.start_fetch(self.state.search_filter(), FetchTrigger::SearchChanged);
                    } else {
                        *debounce_deadline = Some(Instant::now() + self.search_debounce);
                    }
                }
            }
            DashboardCommand::Refresh => {
                self.start_fetch(self.state.search_filter(), FetchTrigger::Manual);
            }
            DashboardCommand::SetFormField(field, value) => {
                if let Err(e) = self.state.set_form_field(field, &value) {
                    warn!("⚠️ Valor de formulario ignorado: {}", e);
                }
            }
            DashboardCommand::SubmitForm => self.start_submit(),
            DashboardCommand::DismissAlert => self.state.dismiss_alert(),
            DashboardCommand::Unmount => return false,
        }
        true
    }

    fn handle_resolution(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Fetch {
                ticket,
                trigger,
                result,
            } => {
                if let Err(e) = &result {
                    warn!("❌ Error obteniendo registros ({:?}): {}", trigger, e);
                }
                let outcome = self.state.resolve_fetch(ticket, result, Utc::now());
                if outcome == FetchOutcome::Discarded {
                    debug!("⏭️ Fetch #{} descartado por obsoleto", ticket.sequence());
                }
            }
            Resolution::Submit(result) => {
                if let Err(e) = &result {
                    warn!("❌ Error creando registro: {}", e);
                }
                if self.state.finish_submit(result) {
                    // Re-fetch inmediato, sin el término de búsqueda
                    self.start_fetch(None, FetchTrigger::AfterSubmit);
                }
            }
        }
    }

    fn start_fetch(&mut self, filter: Option<String>, trigger: FetchTrigger) {
        let ticket = self.state.begin_fetch();
        debug!("🔄 Fetch #{} ({:?}, filtro: {:?})", ticket.sequence(), trigger, filter);

        let api = Arc::clone(&self.api);
        let tx = self.resolution_tx.clone();
        tokio::spawn(async move {
            let result = api
                .list_vehicles(filter.as_deref())
                .await
                .map(|response| response.data);
            // Si el dashboard ya se desmontó nadie escucha
            let _ = tx.send(Resolution::Fetch {
                ticket,
                trigger,
                result,
            });
        });
    }

    fn start_submit(&mut self) {
        let request = match self.state.begin_submit() {
            Ok(request) => request,
            Err(SubmitRejected::AlreadyInFlight) => {
                debug!("⏳ Alta ya en curso, envío ignorado");
                return;
            }
            Err(SubmitRejected::Invalid(errors)) => {
                warn!("⚠️ Formulario inválido: {}", errors);
                return;
            }
        };

        let api = Arc::clone(&self.api);
        let tx = self.resolution_tx.clone();
        tokio::spawn(async move {
            let result = api.create_vehicle(&request).await;
            let _ = tx.send(Resolution::Submit(result));
        });
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.snapshot());
    }
}

async fn wait_for_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => pending().await,
    }
}
