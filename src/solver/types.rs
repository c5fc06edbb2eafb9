use crate::model::Slot;
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Options d'un solve
#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    /// Durée maximale du solve, vérifiée entre deux augmentations.
    pub timeout: Option<Duration>,
    /// Drapeau d'annulation coopératif, vérifié entre deux augmentations.
    pub cancel: Option<Arc<AtomicBool>>,
}

/// Déficit d'un créneau insatisfiable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotShortfall {
    pub slot: Slot,
    pub required: u32,
    pub achieved: u32,
}

impl SlotShortfall {
    pub fn shortfall(&self) -> u32 {
        self.required - self.achieved
    }
}

impl fmt::Display for SlotShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: required {}, achievable {}",
            self.slot, self.required, self.achieved
        )
    }
}

/// Rapport structuré d'infaisabilité : quels créneaux, et de combien.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfeasibilityReport {
    pub total_demand: u32,
    pub max_flow: u32,
    pub shortfalls: Vec<SlotShortfall>,
}

impl InfeasibilityReport {
    pub fn names_slot(&self, slot: Slot) -> bool {
        self.shortfalls.iter().any(|s| s.slot == slot)
    }
}

impl fmt::Display for InfeasibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "demand {} but only {} assignable",
            self.total_demand, self.max_flow
        )?;
        for s in &self.shortfalls {
            write!(f, "; {s}")?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("invalid calendar rules: {0}")]
    InvalidRules(String),
    #[error("roster is empty")]
    EmptyRoster,
    #[error("horizon must be at least one day")]
    EmptyHorizon,
    /// Récupérable par l'appelant (ajuster roster ou règles), jamais réessayé tel quel.
    #[error("infeasible instance: {0}")]
    Infeasible(InfeasibilityReport),
    #[error("solve aborted: timed out after {0:?}")]
    TimedOut(Duration),
    #[error("solve aborted: cancelled")]
    Cancelled,
    /// Défaut du réseau ou du solveur détecté à l'extraction ; toujours fatal.
    #[error("internal consistency violation: {0}")]
    Inconsistent(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
