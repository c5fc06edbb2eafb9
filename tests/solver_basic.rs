#![forbid(unsafe_code)]
use planigarde::{
    solve, CalendarRules, Person, Roster, ShiftKind, Slot, SolveError, SolveOptions,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn roster_of(n: usize) -> Roster {
    Roster {
        people: (1..=n)
            .map(|i| Person::new(format!("p{i}"), format!("Person {i}")))
            .collect(),
    }
}

#[test]
fn one_week_schedule_covers_every_slot_exactly() {
    let roster = roster_of(7);
    let rules = CalendarRules::default();
    let schedule = solve(&roster, &rules, 7, &SolveOptions::default()).unwrap();

    // Chaque ligne porte exactement l'effectif exigé.
    for row in schedule.rows() {
        assert_eq!(
            row.people.len() as u32,
            row.required,
            "day {} {}",
            row.day,
            row.shift
        );
        assert_eq!(row.required, rules.requirement(row.day, row.shift));
    }

    // Barème de la première semaine (jour 1 = lundi, semaine impaire).
    assert_eq!(schedule.row(1, ShiftKind::Morning).unwrap().required, 3);
    assert_eq!(schedule.row(3, ShiftKind::Morning).unwrap().required, 3);
    assert_eq!(schedule.row(5, ShiftKind::Morning).unwrap().required, 3);
    assert_eq!(schedule.row(6, ShiftKind::Morning).unwrap().required, 3);
    assert_eq!(schedule.row(4, ShiftKind::Afternoon).unwrap().required, 2);
    assert_eq!(schedule.row(2, ShiftKind::Evening).unwrap().required, 2);
    assert_eq!(schedule.row(6, ShiftKind::Evening).unwrap().required, 0);
    assert_eq!(schedule.row(7, ShiftKind::Afternoon).unwrap().required, 0);
    assert_eq!(schedule.row(7, ShiftKind::Evening).unwrap().required, 0);

    assert_eq!(schedule.total_assigned(), 31);
}

#[test]
fn nobody_is_double_booked() {
    let roster = roster_of(7);
    let rules = CalendarRules::default();
    let schedule = solve(&roster, &rules, 28, &SolveOptions::default()).unwrap();

    for day in 1..=28 {
        let mut seen = HashSet::new();
        for shift in ShiftKind::ALL {
            for id in &schedule.row(day, shift).unwrap().people {
                assert!(
                    seen.insert(id.clone()),
                    "{} works twice on day {day}",
                    id.as_str()
                );
            }
        }
    }
}

#[test]
fn workloads_are_balanced() {
    let roster = roster_of(7);
    let rules = CalendarRules::default();

    // Une semaine : 31 gardes pour 7 personnes, charges 4 ou 5 attendues.
    let schedule = solve(&roster, &rules, 7, &SolveOptions::default()).unwrap();
    assert!(schedule.spread(&roster) <= 1, "spread {}", schedule.spread(&roster));

    // Quatre semaines : l'écart reste borné à 1.
    let schedule = solve(&roster, &rules, 28, &SolveOptions::default()).unwrap();
    assert!(schedule.spread(&roster) <= 1, "spread {}", schedule.spread(&roster));
}

#[test]
fn raising_a_requirement_keeps_a_rich_roster_feasible() {
    let roster = roster_of(7);
    let mut rules = CalendarRules::default();
    rules.default_count = 2;

    let schedule = solve(&roster, &rules, 7, &SolveOptions::default()).unwrap();
    for row in schedule.rows() {
        assert_eq!(row.people.len() as u32, row.required);
    }
    assert!(schedule.spread(&roster) <= 1);
}

#[test]
fn lowering_requirements_never_breaks_feasibility() {
    // Monotonie de la demande : revenir d'un barème gonflé au barème par
    // défaut reste faisable, avec strictement moins d'unités affectées.
    let roster = roster_of(7);
    let mut raised = CalendarRules::default();
    raised.default_count = 2;

    let high = solve(&roster, &raised, 7, &SolveOptions::default()).unwrap();
    let low = solve(&roster, &CalendarRules::default(), 7, &SolveOptions::default()).unwrap();

    assert_eq!(high.total_assigned(), 40);
    assert_eq!(low.total_assigned(), 31);
    assert!(low.total_assigned() < high.total_assigned());
    assert!(high.spread(&roster) <= 1);
    assert!(low.spread(&roster) <= 1);
}

#[test]
fn raising_a_requirement_cannot_restore_feasibility() {
    let roster = roster_of(2);
    assert!(matches!(
        solve(&roster, &CalendarRules::default(), 7, &SolveOptions::default()),
        Err(SolveError::Infeasible(_))
    ));

    let mut harder = CalendarRules::default();
    harder.tuesday_evening_count = 3;
    assert!(matches!(
        solve(&roster, &harder, 7, &SolveOptions::default()),
        Err(SolveError::Infeasible(_))
    ));
}

#[test]
fn single_sunday_horizon_staffs_only_the_morning() {
    let roster = roster_of(7);
    let mut rules = CalendarRules::default();
    rules.first_weekday = 6; // dimanche

    let schedule = solve(&roster, &rules, 1, &SolveOptions::default()).unwrap();
    let morning = schedule.row(1, ShiftKind::Morning).unwrap();
    assert_eq!(morning.required, 2);
    assert_eq!(morning.people.len(), 2);
    assert!(schedule.row(1, ShiftKind::Afternoon).unwrap().people.is_empty());
    assert!(schedule.row(1, ShiftKind::Evening).unwrap().people.is_empty());
    assert_eq!(schedule.total_assigned(), 2);
}

#[test]
fn undersized_roster_reports_the_unsatisfiable_slots() {
    let roster = roster_of(2);
    let rules = CalendarRules::default();

    match solve(&roster, &rules, 7, &SolveOptions::default()) {
        Err(SolveError::Infeasible(report)) => {
            assert!(report.total_demand > report.max_flow);
            // Le lundi matin exige 3 personnes, plus que le roster entier.
            assert!(report.names_slot(Slot::new(1, ShiftKind::Morning)));
        }
        other => panic!("expected Infeasible, got {other:?}"),
    }
}

#[test]
fn global_deficit_still_names_its_slots() {
    // Demande 27 > offre 14, mais aucun créneau n'exige à lui seul plus que
    // le roster : le rapport doit quand même nommer des créneaux en déficit.
    let roster = roster_of(2);
    let mut rules = CalendarRules::default();
    rules.morning_high_count = 2;
    rules.saturday_odd_week_count = 2;

    match solve(&roster, &rules, 7, &SolveOptions::default()) {
        Err(SolveError::Infeasible(report)) => {
            assert_eq!(report.total_demand, 27);
            assert!(report.max_flow < report.total_demand);
            assert!(!report.shortfalls.is_empty());
            for deficit in &report.shortfalls {
                assert!(deficit.achieved < deficit.required, "{deficit}");
            }
        }
        other => panic!("expected Infeasible, got {other:?}"),
    }
}

#[test]
fn structural_deficit_is_traced_back_to_its_slot() {
    // Offre globale suffisante (2 × 7 = 14 ≥ 3) mais un seul créneau exige
    // plus de personnes que le roster n'en compte.
    let roster = roster_of(2);
    let rules = CalendarRules {
        morning_high_days: vec![0],
        morning_high_count: 3,
        morning_base_count: 0,
        saturday_odd_week_count: 0,
        saturday_even_week_count: 0,
        thursday_afternoon_count: 0,
        tuesday_evening_count: 0,
        default_count: 0,
        ..CalendarRules::default()
    };

    match solve(&roster, &rules, 7, &SolveOptions::default()) {
        Err(SolveError::Infeasible(report)) => {
            assert_eq!(report.shortfalls.len(), 1);
            let deficit = &report.shortfalls[0];
            assert_eq!(deficit.slot, Slot::new(1, ShiftKind::Morning));
            assert_eq!(deficit.required, 3);
            assert_eq!(deficit.achieved, 2);
            assert_eq!(deficit.shortfall(), 1);
        }
        other => panic!("expected Infeasible, got {other:?}"),
    }
}

#[test]
fn cancelled_solve_is_distinguishable_from_infeasibility() {
    let roster = roster_of(7);
    let rules = CalendarRules::default();
    let flag = Arc::new(AtomicBool::new(false));
    flag.store(true, Ordering::Relaxed);
    let opts = SolveOptions {
        timeout: None,
        cancel: Some(flag),
    };

    assert!(matches!(
        solve(&roster, &rules, 28, &opts),
        Err(SolveError::Cancelled)
    ));
}

#[test]
fn zero_timeout_aborts_before_any_augmentation() {
    let roster = roster_of(7);
    let rules = CalendarRules::default();
    let opts = SolveOptions {
        timeout: Some(Duration::ZERO),
        cancel: None,
    };

    assert!(matches!(
        solve(&roster, &rules, 28, &opts),
        Err(SolveError::TimedOut(_))
    ));
}

#[test]
fn degenerate_inputs_are_rejected_up_front() {
    let rules = CalendarRules::default();
    assert!(matches!(
        solve(&Roster::default(), &rules, 7, &SolveOptions::default()),
        Err(SolveError::EmptyRoster)
    ));
    assert!(matches!(
        solve(&roster_of(3), &rules, 0, &SolveOptions::default()),
        Err(SolveError::EmptyHorizon)
    ));

    let mut bad = CalendarRules::default();
    bad.first_weekday = 9;
    assert!(matches!(
        solve(&roster_of(3), &bad, 7, &SolveOptions::default()),
        Err(SolveError::InvalidRules(_))
    ));
}
