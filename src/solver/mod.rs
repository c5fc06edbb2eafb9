mod extract;
mod flow;
mod network;
mod types;

pub use types::{InfeasibilityReport, SlotShortfall, SolveError, SolveOptions};

use crate::model::{Roster, Schedule};
use crate::rules::CalendarRules;

/// Planner : un solve = une fonction pure de (roster, règles, horizon).
///
/// Chaque appel construit son propre réseau de flot, jeté après extraction ;
/// aucun état n'est partagé entre solves concurrents.
#[derive(Debug, Clone)]
pub struct Planner {
    roster: Roster,
    rules: CalendarRules,
    horizon: u32,
}

impl Planner {
    pub fn new(roster: Roster, rules: CalendarRules, horizon: u32) -> Self {
        Self {
            roster,
            rules,
            horizon,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn rules(&self) -> &CalendarRules {
        &self.rules
    }
    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    pub fn solve(&self, opts: &SolveOptions) -> Result<Schedule, SolveError> {
        solve(&self.roster, &self.rules, self.horizon, opts)
    }
}

/// Résout une instance : planning exact et équilibré, ou erreur structurée.
pub fn solve(
    roster: &Roster,
    rules: &CalendarRules,
    horizon: u32,
    opts: &SolveOptions,
) -> Result<Schedule, SolveError> {
    rules
        .validate()
        .map_err(|e| SolveError::InvalidRules(e.to_string()))?;

    let mut net = network::Network::build(roster, rules, horizon)?;
    let demand = net.total_demand();

    #[cfg(feature = "logging")]
    tracing::debug!(
        people = roster.people.len(),
        horizon,
        demand,
        "flow network built"
    );

    let achieved = flow::min_cost_flow(&mut net.graph, net.source, net.sink, demand, opts)?;
    if achieved < demand {
        return Err(SolveError::Infeasible(net.shortfall_report(achieved)));
    }

    extract::extract(&net, roster, rules)
}
