#![forbid(unsafe_code)]
use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use planigarde::{
    io,
    model::Roster,
    rules::{load_rules_from_file, CalendarRules, WEEKDAY_LABELS},
    solver::{Planner, SolveError, SolveOptions},
    storage::{JsonStorage, Storage},
};
use std::time::Duration;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planning de garde (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de roster
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer des personnes depuis un CSV (`handle,display_name`)
    ImportPeople {
        #[arg(long)]
        csv: String,
    },

    /// Résoudre le planning sur un horizon donné
    Solve {
        /// Horizon en jours (jour 1 = premier jour des règles)
        #[arg(long, default_value_t = 28)]
        horizon: u32,
        /// Règles calendaires JSON (défaut : barème intégré)
        #[arg(long)]
        rules: Option<String>,
        /// Date calendaire du jour 1 (AAAA-MM-JJ), pour les exports
        #[arg(long)]
        start_date: Option<String>,
        /// Budget de temps du solveur, en secondes
        #[arg(long)]
        timeout_secs: Option<u64>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Afficher la table des effectifs exigés, sans résoudre
    Requirements {
        #[arg(long, default_value_t = 28)]
        horizon: u32,
        #[arg(long)]
        rules: Option<String>,
    },

    /// Écrire les règles par défaut en JSON (point de départ à éditer)
    ExportRules {
        #[arg(long)]
        out: String,
    },
}

fn load_rules(path: &Option<String>) -> Result<CalendarRules> {
    match path {
        Some(p) => load_rules_from_file(p),
        None => Ok(CalendarRules::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage: JsonStorage<Roster> = JsonStorage::open(&cli.roster)?;

    let code = match cli.cmd {
        Commands::ImportPeople { csv } => {
            let people = io::import_people_csv(csv)?;
            let mut roster = storage.load().unwrap_or_default();
            roster.people.extend(people);
            storage.save(&roster)?;
            println!("{} person(s) in roster", roster.people.len());
            0
        }
        Commands::Solve {
            horizon,
            rules,
            start_date,
            timeout_secs,
            out_json,
            out_csv,
        } => {
            let rules = load_rules(&rules)?;
            let roster = storage.load()?;
            let start = start_date
                .map(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d"))
                .transpose()?;
            let opts = SolveOptions {
                timeout: timeout_secs.map(Duration::from_secs),
                cancel: None,
            };

            let planner = Planner::new(roster.clone(), rules.clone(), horizon);
            match planner.solve(&opts) {
                Ok(schedule) => {
                    for row in schedule.rows() {
                        let assigned = row
                            .people
                            .iter()
                            .map(|id| roster.handle_of(id).unwrap_or("?"))
                            .collect::<Vec<_>>()
                            .join(", ");
                        println!(
                            "day {:>2} ({}) {:<9} | {} required | {}",
                            row.day,
                            WEEKDAY_LABELS[rules.weekday(row.day) as usize],
                            row.shift.label(),
                            row.required,
                            if assigned.is_empty() { "-" } else { assigned.as_str() }
                        );
                    }
                    let loads = schedule.workloads();
                    for p in &roster.people {
                        let load = loads.get(&p.id).copied().unwrap_or(0);
                        println!("{}: {} shift(s)", p.handle, load);
                    }
                    println!("spread: {}", schedule.spread(&roster));
                    if let Some(path) = out_json {
                        io::export_schedule_json(path, &schedule)?;
                    }
                    if let Some(path) = out_csv {
                        io::export_schedule_csv(path, &schedule, &roster, &rules, start)?;
                    }
                    0
                }
                Err(SolveError::Infeasible(report)) => {
                    eprintln!("infeasible: {report}");
                    // Code 2 = instance infaisable (ajuster roster ou règles)
                    2
                }
                Err(err @ (SolveError::TimedOut(_) | SolveError::Cancelled)) => {
                    eprintln!("{err}");
                    3
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Requirements { horizon, rules } => {
            let rules = load_rules(&rules)?;
            println!("day  wd   morning afternoon evening");
            for day in 1..=horizon {
                println!(
                    "{:>3}  {}  {:>7} {:>9} {:>7}",
                    day,
                    WEEKDAY_LABELS[rules.weekday(day) as usize],
                    rules.requirement(day, planigarde::ShiftKind::Morning),
                    rules.requirement(day, planigarde::ShiftKind::Afternoon),
                    rules.requirement(day, planigarde::ShiftKind::Evening),
                );
            }
            println!("total demand: {}", rules.total_demand(horizon));
            0
        }
        Commands::ExportRules { out } => {
            let rules = CalendarRules::default();
            rules.validate()?;
            planigarde::export_rules_json(&out, &rules)?;
            println!("rules written to {out}");
            0
        }
    };

    std::process::exit(code);
}
