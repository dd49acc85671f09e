//! Contenedor de estado del dashboard
//!
//! Única fuente de verdad del dashboard. Cada evento (inicio de fetch,
//! fetch resuelto, envío del formulario, resultado del envío) tiene un solo
//! método de mutación; el controlador es el único que los llama.

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::ValidationErrors;

use super::config::ResolutionPolicy;
use super::form::{FormField, VehicleForm};
use super::stats::FleetStats;
use crate::client::ClientError;
use crate::dto::CreateVehicleRequest;
use crate::models::VehicleRecord;

pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch vehicle data from local storage.";
pub const ADD_ERROR_MESSAGE: &str = "Failed to add vehicle";
pub const FORM_INCOMPLETE_MESSAGE: &str = "Please fill out every vehicle field with valid values";

/// Identificador monótono de cada fetch lanzado
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Qué disparó un fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTrigger {
    Mount,
    SearchChanged,
    Poll,
    Manual,
    AfterSubmit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// Resolución más antigua que otra ya aplicada (sólo con `Sequenced`)
    Discarded,
}

#[derive(Debug)]
pub enum SubmitRejected {
    AlreadyInFlight,
    Invalid(ValidationErrors),
}

/// Vista inmutable del estado para la capa de presentación
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub records: Vec<VehicleRecord>,
    pub loading: bool,
    pub search_term: String,
    pub last_refresh: DateTime<Utc>,
    pub error: Option<String>,
    #[serde(skip)]
    pub form: VehicleForm,
    pub adding: bool,
    pub alert: Option<String>,
    pub stats: FleetStats,
}

#[derive(Debug)]
pub struct DashboardState {
    records: Vec<VehicleRecord>,
    search_term: String,
    last_refresh: DateTime<Utc>,
    error: Option<String>,
    form: VehicleForm,
    adding: bool,
    alert: Option<String>,
    policy: ResolutionPolicy,
    next_sequence: u64,
    latest_resolved: Option<FetchTicket>,
    in_flight: usize,
}

impl DashboardState {
    pub fn new(policy: ResolutionPolicy, now: DateTime<Utc>) -> Self {
        Self {
            records: Vec::new(),
            search_term: String::new(),
            last_refresh: now,
            error: None,
            form: VehicleForm::default(),
            adding: false,
            alert: None,
            policy,
            next_sequence: 0,
            latest_resolved: None,
            in_flight: 0,
        }
    }

    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Filtro a enviar al backend; búsqueda vacía = sin filtro
    pub fn search_filter(&self) -> Option<String> {
        (!self.search_term.is_empty()).then(|| self.search_term.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn is_adding(&self) -> bool {
        self.adding
    }

    pub fn form(&self) -> &VehicleForm {
        &self.form
    }

    pub fn stats(&self) -> FleetStats {
        FleetStats::from_records(&self.records)
    }

    /// Devuelve `true` si el término cambió
    pub fn set_search_term(&mut self, term: &str) -> bool {
        if self.search_term == term {
            return false;
        }
        self.search_term = term.to_string();
        true
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.next_sequence += 1;
        self.in_flight += 1;
        FetchTicket(self.next_sequence)
    }

    pub fn resolve_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<VehicleRecord>, ClientError>,
        now: DateTime<Utc>,
    ) -> FetchOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.policy == ResolutionPolicy::Sequenced
            && self.latest_resolved.is_some_and(|latest| ticket < latest)
        {
            return FetchOutcome::Discarded;
        }
        self.latest_resolved = Some(self.latest_resolved.map_or(ticket, |l| l.max(ticket)));

        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
                self.last_refresh = now;
            }
            Err(_) => {
                // La lista anterior se conserva
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }
        FetchOutcome::Applied
    }

    pub fn set_form_field(&mut self, field: FormField, value: &str) -> Result<(), String> {
        self.form.set_field(field, value)
    }

    pub fn begin_submit(&mut self) -> Result<CreateVehicleRequest, SubmitRejected> {
        if self.adding {
            return Err(SubmitRejected::AlreadyInFlight);
        }
        match self.form.to_create_request() {
            Ok(request) => {
                self.adding = true;
                Ok(request)
            }
            Err(errors) => {
                self.alert = Some(FORM_INCOMPLETE_MESSAGE.to_string());
                Err(SubmitRejected::Invalid(errors))
            }
        }
    }

    /// Devuelve `true` si el alta fue exitosa (el formulario queda limpio)
    pub fn finish_submit(&mut self, result: Result<VehicleRecord, ClientError>) -> bool {
        self.adding = false;
        match result {
            Ok(_) => {
                self.form = VehicleForm::default();
                true
            }
            Err(_) => {
                self.alert = Some(ADD_ERROR_MESSAGE.to_string());
                false
            }
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            records: self.records.clone(),
            loading: self.is_loading(),
            search_term: self.search_term.clone(),
            last_refresh: self.last_refresh,
            error: self.error.clone(),
            form: self.form.clone(),
            adding: self.adding,
            alert: self.alert.clone(),
            stats: self.stats(),
        }
    }
}
