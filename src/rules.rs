use crate::model::ShiftKind;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Jours de semaine, 0 = lundi … 6 = dimanche.
pub const MONDAY: u8 = 0;
pub const TUESDAY: u8 = 1;
pub const WEDNESDAY: u8 = 2;
pub const THURSDAY: u8 = 3;
pub const FRIDAY: u8 = 4;
pub const SATURDAY: u8 = 5;
pub const SUNDAY: u8 = 6;

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Règles calendaires : effectif exigé par (jour de semaine, vacation, parité de semaine).
///
/// C'est de la donnée, pas du code : tout est surchargeable sans toucher au solveur.
/// Les valeurs par défaut reproduisent le barème clinique d'origine
/// (lun/mer/ven matin 3, samedi matin 3 une semaine sur deux, jeudi après-midi 2,
/// mardi soir 2, samedi soir et dimanche après-midi/soir fermés).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarRules {
    /// Jour de semaine du jour 1 de l'horizon (0 = lundi).
    pub first_weekday: u8,
    /// Matins à effectif renforcé.
    pub morning_high_days: Vec<u8>,
    pub morning_high_count: u32,
    /// Matin hors jours renforcés et hors samedi.
    pub morning_base_count: u32,
    /// Samedi matin, semaines impaires puis paires.
    pub saturday_odd_week_count: u32,
    pub saturday_even_week_count: u32,
    pub thursday_afternoon_count: u32,
    pub tuesday_evening_count: u32,
    /// Effectif de tout créneau non couvert par une règle ci-dessus.
    pub default_count: u32,
    /// Créneaux fermés (jour de semaine, vacation) → effectif 0.
    pub unstaffed_slots: Vec<(u8, ShiftKind)>,
}

impl Default for CalendarRules {
    fn default() -> Self {
        Self {
            first_weekday: MONDAY,
            morning_high_days: vec![MONDAY, WEDNESDAY, FRIDAY],
            morning_high_count: 3,
            morning_base_count: 2,
            saturday_odd_week_count: 3,
            saturday_even_week_count: 2,
            thursday_afternoon_count: 2,
            tuesday_evening_count: 2,
            default_count: 1,
            unstaffed_slots: vec![
                (SATURDAY, ShiftKind::Evening),
                (SUNDAY, ShiftKind::Afternoon),
                (SUNDAY, ShiftKind::Evening),
            ],
        }
    }
}

impl CalendarRules {
    /// Jour de semaine d'un jour de l'horizon (1..=H).
    pub fn weekday(&self, day: u32) -> u8 {
        ((u32::from(self.first_weekday) + day - 1) % 7) as u8
    }

    /// Numéro de semaine, 1-indexé : ⌈jour / 7⌉.
    pub fn week_number(&self, day: u32) -> u32 {
        (day - 1) / 7 + 1
    }

    /// Effectif exigé pour (jour, vacation). Pure et totale, aucun cas d'erreur.
    pub fn requirement(&self, day: u32, shift: ShiftKind) -> u32 {
        let weekday = self.weekday(day);
        if self.unstaffed_slots.contains(&(weekday, shift)) {
            return 0;
        }
        match shift {
            ShiftKind::Morning => {
                if self.morning_high_days.contains(&weekday) {
                    self.morning_high_count
                } else if weekday == SATURDAY {
                    if self.week_number(day) % 2 == 1 {
                        self.saturday_odd_week_count
                    } else {
                        self.saturday_even_week_count
                    }
                } else {
                    self.morning_base_count
                }
            }
            ShiftKind::Afternoon => {
                if weekday == THURSDAY {
                    self.thursday_afternoon_count
                } else {
                    self.default_count
                }
            }
            ShiftKind::Evening => {
                if weekday == TUESDAY {
                    self.tuesday_evening_count
                } else {
                    self.default_count
                }
            }
        }
    }

    /// Demande totale sur l'horizon.
    pub fn total_demand(&self, horizon: u32) -> u32 {
        (1..=horizon)
            .flat_map(|day| ShiftKind::ALL.iter().map(move |&s| self.requirement(day, s)))
            .sum()
    }

    /// Valide la cohérence des règles avant toute construction de réseau.
    pub fn validate(&self) -> Result<()> {
        if self.first_weekday > 6 {
            bail!("first_weekday must be in 0..=6, got {}", self.first_weekday);
        }
        for wd in &self.morning_high_days {
            if *wd > 6 {
                bail!("morning_high_days contains invalid weekday {wd}");
            }
        }
        for (wd, shift) in &self.unstaffed_slots {
            if *wd > 6 {
                bail!("unstaffed_slots contains invalid weekday {wd} for {shift}");
            }
        }
        Ok(())
    }
}

pub fn load_rules_from_file<P: AsRef<Path>>(path: P) -> Result<CalendarRules> {
    let data = fs::read(&path)?;
    let rules: CalendarRules = serde_json::from_slice(&data)?;
    rules.validate()?;
    Ok(rules)
}

pub fn export_rules_json<P: AsRef<Path>>(path: P, rules: &CalendarRules) -> Result<()> {
    let json = serde_json::to_string_pretty(rules)?;
    fs::write(path, json)?;
    Ok(())
}
