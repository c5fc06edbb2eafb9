use super::flow::FlowGraph;
use super::types::{InfeasibilityReport, SlotShortfall, SolveError};
use crate::model::{Roster, ShiftKind, Slot};
use crate::rules::CalendarRules;

/// Créneau doté (effectif > 0) et son arc vers le puits.
#[derive(Debug, Clone)]
pub(super) struct StaffedSlot {
    pub(super) slot: Slot,
    pub(super) required: u32,
    pub(super) sink_edge: usize,
}

/// Réseau construit pour un solve : toute contrainte dure est encodée dans les arcs.
///
/// source → personne : H arcs unitaires de coût croissant 1..=H (coût marginal
/// convexe, la k-ième garde d'une personne coûte k — c'est lui qui équilibre
/// les charges) ; personne → personne-jour : capacité 1, coût 0 (au plus une
/// vacation par jour) ; personne-jour → créneau : capacité 1, coût 0 ;
/// créneau → puits : capacité = effectif exigé, à saturer exactement.
#[derive(Debug)]
pub(super) struct Network {
    pub(super) graph: FlowGraph,
    pub(super) source: usize,
    pub(super) sink: usize,
    pub(super) horizon: u32,
    pub(super) slots: Vec<StaffedSlot>,
    person_day_base: usize,
    slot_base: usize,
}

impl Network {
    /// Construit le réseau, après contrôle de l'offre : si l'offre totale
    /// (|roster| × H) est déjà inférieure à la demande et que des créneaux
    /// dépassent à eux seuls le roster, l'infaisabilité est rapportée sans
    /// invoquer le solveur.
    pub(super) fn build(
        roster: &Roster,
        rules: &CalendarRules,
        horizon: u32,
    ) -> Result<Self, SolveError> {
        if roster.people.is_empty() {
            return Err(SolveError::EmptyRoster);
        }
        if horizon == 0 {
            return Err(SolveError::EmptyHorizon);
        }

        let person_count = roster.people.len();
        let horizon_usize = horizon as usize;

        let mut staffed: Vec<(Slot, u32)> = Vec::new();
        for day in 1..=horizon {
            for shift in ShiftKind::ALL {
                let required = rules.requirement(day, shift);
                if required > 0 {
                    staffed.push((Slot::new(day, shift), required));
                }
            }
        }

        let demand: u32 = staffed.iter().map(|(_, r)| r).sum();
        let supply = (person_count as u32) * horizon;
        if demand > supply {
            // Trace avant solve : les créneaux exigeant plus que le roster entier
            // sont insatisfiables quel que soit le flot. Sans un tel créneau, on
            // laisse le solveur tourner : la remontée de coupe minimale nommera
            // les créneaux en déficit, le rapport ne doit jamais rester anonyme.
            let shortfalls: Vec<SlotShortfall> = staffed
                .iter()
                .filter(|(_, required)| *required > person_count as u32)
                .map(|&(slot, required)| SlotShortfall {
                    slot,
                    required,
                    achieved: person_count as u32,
                })
                .collect();
            if !shortfalls.is_empty() {
                return Err(SolveError::Infeasible(InfeasibilityReport {
                    total_demand: demand,
                    max_flow: supply,
                    shortfalls,
                }));
            }
        }

        let source = 0usize;
        let person_base = 1usize;
        let person_day_base = person_base + person_count;
        let slot_base = person_day_base + person_count * horizon_usize;
        let sink = slot_base + staffed.len();
        let mut graph = FlowGraph::new(sink + 1);

        for p in 0..person_count {
            let person_node = person_base + p;
            for k in 1..=i64::from(horizon) {
                graph.add_edge(source, person_node, 1, k);
            }
            for d in 0..horizon_usize {
                graph.add_edge(person_node, person_day_base + p * horizon_usize + d, 1, 0);
            }
        }

        let mut slots = Vec::with_capacity(staffed.len());
        for (k, &(slot, required)) in staffed.iter().enumerate() {
            let slot_node = slot_base + k;
            let day_index = (slot.day - 1) as usize;
            for p in 0..person_count {
                let person_day = person_day_base + p * horizon_usize + day_index;
                graph.add_edge(person_day, slot_node, 1, 0);
            }
            let sink_edge = graph.add_edge(slot_node, sink, required, 0);
            slots.push(StaffedSlot {
                slot,
                required,
                sink_edge,
            });
        }

        Ok(Self {
            graph,
            source,
            sink,
            horizon,
            slots,
            person_day_base,
            slot_base,
        })
    }

    pub(super) fn total_demand(&self) -> u32 {
        self.slots.iter().map(|s| s.required).sum()
    }

    pub(super) fn person_day_node(&self, person: usize, day: u32) -> usize {
        self.person_day_base + person * self.horizon as usize + (day - 1) as usize
    }

    /// Créneau doté correspondant à un nœud, s'il y en a un.
    pub(super) fn slot_of_node(&self, node: usize) -> Option<&StaffedSlot> {
        if node >= self.slot_base && node < self.sink {
            self.slots.get(node - self.slot_base)
        } else {
            None
        }
    }

    /// Après un flot maximal insuffisant : remonte les arcs créneau → puits non
    /// saturés pour nommer les créneaux en déficit (coupe minimale).
    pub(super) fn shortfall_report(&self, max_flow: u32) -> InfeasibilityReport {
        let shortfalls = self
            .slots
            .iter()
            .filter_map(|s| {
                let achieved = self.graph.flow_on(s.sink_edge, s.required);
                if achieved < s.required {
                    Some(SlotShortfall {
                        slot: s.slot,
                        required: s.required,
                        achieved,
                    })
                } else {
                    None
                }
            })
            .collect();
        InfeasibilityReport {
            total_demand: self.total_demand(),
            max_flow,
            shortfalls,
        }
    }
}
