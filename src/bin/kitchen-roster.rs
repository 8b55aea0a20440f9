#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use brigade::{
    calendar::{Day, YearMonth},
    command::{AutoLeaveCommand, Dispatcher, Target},
    model::{sort_staff, Shift, ShiftCode, Staff, StaffId},
    scheduler::{check_month, EngineOptions, LeaveEngine, LeaveTally, RuleViolation},
    storage::{JsonStorage, Storage},
};
use clap::{Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Planning de brigade : congés automatiques et contrôle des jours chômés
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de l'instantané
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// (Re)générer les congés automatiques d'un mois
    ///
    /// Par défaut, une case vide ne compte pas comme présente pour le minimum
    /// d'un groupe : un groupe sans postes saisis ne reçoit aucun congé.
    /// Utiliser `--count-unassigned` pour planifier sur un mois encore vide.
    Generate {
        /// YYYY-MM
        #[arg(long)]
        month: String,
        /// Identifiant ciblé (répétable) ; toute la brigade par défaut
        #[arg(long, conflicts_with = "group")]
        staff: Vec<String>,
        /// Membres d'un groupe
        #[arg(long)]
        group: Option<String>,
        /// Graine pour un tirage reproductible
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 6)]
        rest_after: u32,
        #[arg(long, default_value_t = 2)]
        max_auto_streak: u32,
        /// Compter les cases vides comme présentes pour la couverture de groupe
        /// (sinon un groupe encore vide ne reçoit aucun congé)
        #[arg(long)]
        count_unassigned: bool,
    },

    /// Saisie manuelle d'une case (valeur vide pour effacer)
    Set {
        #[arg(long)]
        month: String,
        #[arg(long)]
        staff: String,
        /// DD
        #[arg(long)]
        day: String,
        #[arg(long, default_value = "")]
        value: String,
    },

    /// Vérifier les jours chômés du mois
    Check {
        #[arg(long)]
        month: String,
        /// Export CSV des jours en échec (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Décompte des congés par personne
    Tally {
        #[arg(long)]
        month: String,
    },

    /// Recopier les quotas du mois précédent
    CopyConfig {
        #[arg(long)]
        month: String,
    },

    /// Ajouter une personne (identifiant généré)
    AddStaff {
        #[arg(long)]
        name: String,
        /// Code de poste (`Chef`, `Sous chef`, `CDP`, ...)
        #[arg(long)]
        title: String,
        /// Saisie manuelle uniquement
        #[arg(long)]
        no_auto: bool,
    },

    /// Retirer une personne et toutes ses cases
    RemoveStaff {
        #[arg(long)]
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let storage = JsonStorage::open(&cli.roster)?;
    let mut roster = storage.load_or_default()?;

    let code = match cli.cmd {
        Commands::Generate {
            month,
            staff,
            group,
            seed,
            rest_after,
            max_auto_streak,
            count_unassigned,
        } => {
            let month: YearMonth = month.parse()?;
            let target = match group {
                Some(g) => Target::Group(g),
                None if staff.is_empty() => Target::AllStaff,
                None => Target::Staff(staff.into_iter().map(StaffId::new).collect()),
            };
            let engine = match seed {
                Some(s) => LeaveEngine::seeded(s),
                None => LeaveEngine::new(),
            }
            .with_options(EngineOptions {
                rest_after_consecutive_days: rest_after,
                max_consecutive_auto_leave: max_auto_streak,
                count_unassigned_as_available: count_unassigned,
            });
            let mut dispatcher = Dispatcher::new(engine);
            roster = dispatcher.dispatch(&roster, &AutoLeaveCommand::new(month, target))?;
            storage.save(&roster)?;
            0
        }
        Commands::Set {
            month,
            staff,
            day,
            value,
        } => {
            let month: YearMonth = month.parse()?;
            let day: Day = day.parse()?;
            let id = StaffId::new(&staff);
            if roster.find_staff(&id).is_none() {
                bail!("unknown staff: {staff}");
            }
            if month.date_of(day).is_none() {
                bail!("day {day} does not exist in {month}");
            }
            match value.parse::<ShiftCode>()? {
                ShiftCode::Empty => {
                    roster.schedule.clear(month, &id, day);
                }
                code => roster.schedule.set(month, &id, day, Shift::manual(code)),
            }
            storage.save(&roster)?;
            0
        }
        Commands::Check { month, report } => {
            let month: YearMonth = month.parse()?;
            let findings = check_month(month, &roster.holidays, &roster.schedule, &roster.staff);
            if let Some(path) = report {
                let mut w = csv::Writer::from_path(&path)
                    .with_context(|| format!("creating report {path}"))?;
                w.write_record(["date", "reason"])?;
                for f in &findings {
                    w.write_record([f.date.to_string().as_str(), f.violation.code()])?;
                }
                w.flush()?;
            }
            if findings.is_empty() {
                println!("OK: all holidays covered");
                0
            } else {
                for f in &findings {
                    let msg = match f.violation {
                        RuleViolation::InsufficientStaff => "fewer than 2 on duty",
                        RuleViolation::NoSenior => "no chef on duty",
                    };
                    println!("{} | {} | {}", f.date, f.violation.code(), msg);
                }
                eprintln!("Found {} uncovered holiday(s)", findings.len());
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Tally { month } => {
            let month: YearMonth = month.parse()?;
            let config = roster.monthly_configs.for_month(month);
            for s in sort_staff(&roster.staff) {
                let t = LeaveTally::for_staff(&roster.schedule, month, &s.id);
                println!(
                    "{} | {} | 例 {}/{} 休 {}/{} 國 {}/{} | 早 {} 晚 {} 全 {}{}",
                    s.id,
                    s.name,
                    t.regular,
                    config.regular,
                    t.leave,
                    config.leave,
                    t.national,
                    config.national,
                    t.morning,
                    t.evening,
                    t.full,
                    if t.is_over(&config) { " | OVER" } else { "" }
                );
            }
            0
        }
        Commands::CopyConfig { month } => {
            let month: YearMonth = month.parse()?;
            let config = roster.monthly_configs.copy_previous(month)?;
            storage.save(&roster)?;
            println!(
                "{month}: regular {} leave {} national {} ({} days)",
                config.regular,
                config.leave,
                config.national,
                config.total_days()
            );
            0
        }
        Commands::AddStaff {
            name,
            title,
            no_auto,
        } => {
            let mut staff = Staff::new(name, title);
            staff.disable_auto = no_auto;
            println!("{}", staff.id);
            roster.staff.push(staff);
            storage.save(&roster)?;
            0
        }
        Commands::RemoveStaff { id } => {
            let sid = StaffId::new(&id);
            if roster.remove_staff(&sid).is_none() {
                bail!("unknown staff: {id}");
            }
            storage.save(&roster)?;
            0
        }
    };

    std::process::exit(code);
}
