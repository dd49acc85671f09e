//! Dashboard de salud de la flota
//!
//! Controlador con polling, estado explícito, estadísticas derivadas y
//! formulario de alta. La presentación vive en `crate::presentation`.

pub mod config;
pub mod controller;
pub mod form;
pub mod state;
pub mod stats;

pub use config::{DashboardConfig, ResolutionPolicy};
pub use controller::{mount, DashboardClosed, DashboardHandle};
pub use form::{FormField, VehicleForm};
pub use state::{
    DashboardSnapshot, DashboardState, FetchOutcome, FetchTicket, FetchTrigger, SubmitRejected,
    ADD_ERROR_MESSAGE, FETCH_ERROR_MESSAGE, FORM_INCOMPLETE_MESSAGE,
};
pub use stats::FleetStats;
