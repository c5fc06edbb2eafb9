use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Identifiant fort pour Person
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Personne (membre du tour de garde)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub handle: String,
    pub display_name: String,
}

impl Person {
    pub fn new<H: Into<String>, D: Into<String>>(handle: H, display_name: D) -> Self {
        Self {
            id: PersonId::random(),
            handle: handle.into(),
            display_name: display_name.into(),
        }
    }
}

/// Roster complet (lecture seule pendant un solve)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    pub people: Vec<Person>,
}

impl Roster {
    pub fn find_person_by_handle<'a>(&'a self, handle: &str) -> Option<&'a Person> {
        self.people.iter().find(|p| p.handle == handle)
    }
    pub fn find_person_by_id<'a>(&'a self, id: &PersonId) -> Option<&'a Person> {
        self.people.iter().find(|p| &p.id == id)
    }
    pub fn handle_of<'a>(&'a self, id: &PersonId) -> Option<&'a str> {
        self.find_person_by_id(id).map(|p| p.handle.as_str())
    }
}

/// Type de vacation. L'ordre n'a pas de sens, seule l'identité compte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftKind {
    Morning,
    Afternoon,
    Evening,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 3] = [ShiftKind::Morning, ShiftKind::Afternoon, ShiftKind::Evening];

    pub fn label(&self) -> &'static str {
        match self {
            ShiftKind::Morning => "morning",
            ShiftKind::Afternoon => "afternoon",
            ShiftKind::Evening => "evening",
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Créneau : un jour (1..=H) et un type de vacation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub day: u32,
    pub shift: ShiftKind,
}

impl Slot {
    pub fn new(day: u32, shift: ShiftKind) -> Self {
        Self { day, shift }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} {}", self.day, self.shift)
    }
}

/// Affectation d'un créneau : les personnes retenues (ordre sans signification).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub day: u32,
    pub shift: ShiftKind,
    pub required: u32,
    pub people: Vec<PersonId>,
}

/// Planning résolu : seule donnée qui survit au solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub horizon: u32,
    pub rows: Vec<SlotAssignment>,
}

impl Schedule {
    /// Lignes dans l'ordre (jour, vacation), prêtes pour un rendu tabulaire.
    pub fn rows(&self) -> &[SlotAssignment] {
        &self.rows
    }

    pub fn row(&self, day: u32, shift: ShiftKind) -> Option<&SlotAssignment> {
        self.rows.iter().find(|r| r.day == day && r.shift == shift)
    }

    /// Charge totale par personne, dérivée du planning (jamais stockée à part).
    pub fn workloads(&self) -> BTreeMap<PersonId, u32> {
        let mut out = BTreeMap::new();
        for row in &self.rows {
            for id in &row.people {
                *out.entry(id.clone()).or_insert(0) += 1;
            }
        }
        out
    }

    /// Écart max-min des charges sur l'ensemble du roster (les absents comptent 0).
    pub fn spread(&self, roster: &Roster) -> u32 {
        let loads = self.workloads();
        let mut min = u32::MAX;
        let mut max = 0u32;
        for p in &roster.people {
            let load = loads.get(&p.id).copied().unwrap_or(0);
            min = min.min(load);
            max = max.max(load);
        }
        if min == u32::MAX {
            return 0;
        }
        max - min
    }

    /// Nombre total d'unités affectées (== somme des effectifs exigés).
    pub fn total_assigned(&self) -> u32 {
        self.rows.iter().map(|r| r.people.len() as u32).sum()
    }
}
