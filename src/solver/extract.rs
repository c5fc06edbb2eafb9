use super::network::Network;
use super::types::SolveError;
use crate::model::{PersonId, Roster, Schedule, ShiftKind, Slot, SlotAssignment};
use crate::rules::CalendarRules;
use std::collections::HashMap;

/// Décode le flot résolu en `Schedule`, puis revalide les invariants.
///
/// Les violations ne sont jamais dégradées en "pas de planning valide" : un
/// effectif faux ou une double affectation à l'extraction est un défaut du
/// réseau ou du solveur, remonté en `Inconsistent`.
pub(super) fn extract(
    network: &Network,
    roster: &Roster,
    rules: &CalendarRules,
) -> Result<Schedule, SolveError> {
    let mut per_slot: HashMap<Slot, Vec<PersonId>> = HashMap::new();

    for (p, person) in roster.people.iter().enumerate() {
        for day in 1..=network.horizon {
            let node = network.person_day_node(p, day);
            let mut used = 0u32;
            let mut next = network.graph.heads[node];
            while let Some(edge_index) = next {
                let edge = &network.graph.edges[edge_index];
                if let Some(staffed) = network.slot_of_node(edge.to) {
                    // Arc personne-jour → créneau, unitaire : saturé ⇔ affecté.
                    if edge.capacity == 0 {
                        used += 1;
                        per_slot
                            .entry(staffed.slot)
                            .or_default()
                            .push(person.id.clone());
                    }
                }
                next = edge.next;
            }
            if used > 1 {
                return Err(SolveError::Inconsistent(format!(
                    "person {} holds {} shifts on day {}",
                    person.handle, used, day
                )));
            }
        }
    }

    let mut rows = Vec::with_capacity(network.horizon as usize * ShiftKind::ALL.len());
    for day in 1..=network.horizon {
        for shift in ShiftKind::ALL {
            let required = rules.requirement(day, shift);
            let people = per_slot.remove(&Slot::new(day, shift)).unwrap_or_default();
            if people.len() as u32 != required {
                return Err(SolveError::Inconsistent(format!(
                    "slot {} decoded {} people, requirement is {}",
                    Slot::new(day, shift),
                    people.len(),
                    required
                )));
            }
            rows.push(SlotAssignment {
                day,
                shift,
                required,
                people,
            });
        }
    }

    if let Some((slot, _)) = per_slot.into_iter().next() {
        return Err(SolveError::Inconsistent(format!(
            "decoded assignment for unknown slot {slot}"
        )));
    }

    Ok(Schedule {
        horizon: network.horizon,
        rows,
    })
}
