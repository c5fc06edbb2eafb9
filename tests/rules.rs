#![forbid(unsafe_code)]
use planigarde::rules::WEEKDAY_LABELS;
use planigarde::{export_rules_json, load_rules_from_file, CalendarRules, ShiftKind};
use tempfile::tempdir;

#[test]
fn default_week_one_requirement_table() {
    let rules = CalendarRules::default();
    let table = (1..=7u32)
        .map(|day| {
            format!(
                "{} {} {} {} {}",
                day,
                WEEKDAY_LABELS[rules.weekday(day) as usize],
                rules.requirement(day, ShiftKind::Morning),
                rules.requirement(day, ShiftKind::Afternoon),
                rules.requirement(day, ShiftKind::Evening),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    insta::assert_snapshot!(table, @r"
    1 Mon 3 1 1
    2 Tue 2 1 2
    3 Wed 3 1 1
    4 Thu 2 2 1
    5 Fri 3 1 1
    6 Sat 3 1 0
    7 Sun 2 0 0
    ");
}

#[test]
fn saturday_morning_alternates_with_week_parity() {
    let rules = CalendarRules::default();
    assert_eq!(rules.requirement(6, ShiftKind::Morning), 3); // semaine 1
    assert_eq!(rules.requirement(13, ShiftKind::Morning), 2); // semaine 2
    assert_eq!(rules.requirement(20, ShiftKind::Morning), 3); // semaine 3
    assert_eq!(rules.requirement(27, ShiftKind::Morning), 2); // semaine 4
}

#[test]
fn unstaffed_slots_require_nobody() {
    let rules = CalendarRules::default();
    assert_eq!(rules.requirement(6, ShiftKind::Evening), 0);
    assert_eq!(rules.requirement(7, ShiftKind::Afternoon), 0);
    assert_eq!(rules.requirement(7, ShiftKind::Evening), 0);
}

#[test]
fn first_weekday_shifts_the_calendar() {
    let mut rules = CalendarRules::default();
    rules.first_weekday = 6; // le jour 1 est un dimanche
    assert_eq!(rules.requirement(1, ShiftKind::Morning), 2);
    assert_eq!(rules.requirement(1, ShiftKind::Afternoon), 0);
    assert_eq!(rules.requirement(1, ShiftKind::Evening), 0);
    // Le jour 2 est un lundi renforcé.
    assert_eq!(rules.requirement(2, ShiftKind::Morning), 3);
}

#[test]
fn total_demand_accumulates_over_weeks() {
    let rules = CalendarRules::default();
    assert_eq!(rules.total_demand(7), 31);
    assert_eq!(rules.total_demand(28), 122);
}

#[test]
fn rules_survive_a_json_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.json");

    let mut rules = CalendarRules::default();
    rules.tuesday_evening_count = 4;
    export_rules_json(&path, &rules).unwrap();

    let loaded = load_rules_from_file(&path).unwrap();
    assert_eq!(loaded.tuesday_evening_count, 4);
    assert_eq!(loaded.requirement(2, ShiftKind::Evening), 4);
}

#[test]
fn invalid_weekdays_are_rejected() {
    let mut rules = CalendarRules::default();
    rules.morning_high_days = vec![0, 7];
    assert!(rules.validate().is_err());

    let mut rules = CalendarRules::default();
    rules.unstaffed_slots.push((8, ShiftKind::Morning));
    assert!(rules.validate().is_err());

    let mut rules = CalendarRules::default();
    rules.first_weekday = 12;
    assert!(rules.validate().is_err());
}
