#![forbid(unsafe_code)]
//! Planigarde — génération locale de plannings de garde équitables (sans BD).
//!
//! - Règles calendaires déclaratives : effectif exact par (jour, vacation).
//! - Affectation par flot à coût minimal ; coût marginal convexe par personne
//!   pour équilibrer les charges.
//! - Au plus une vacation par personne et par jour, encodé dans le réseau.
//! - Infaisabilité remontée créneau par créneau, jamais tronquée en silence.

pub mod io;
pub mod model;
pub mod rules;
pub mod solver;
pub mod storage;

pub use model::{Person, PersonId, Roster, Schedule, ShiftKind, Slot, SlotAssignment};
pub use rules::{export_rules_json, load_rules_from_file, CalendarRules};
pub use solver::{
    solve, InfeasibilityReport, Planner, SlotShortfall, SolveError, SolveOptions,
};
pub use storage::{JsonStorage, Storage};
