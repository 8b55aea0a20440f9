//! Déclenchement explicite du moteur depuis l'application.
use crate::calendar::YearMonth;
use crate::model::{Roster, StaffId};
use crate::scheduler::{LeaveEngine, SchedError};
use rand::Rng;
use tracing::info;

/// Personnes visées par une génération.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    AllStaff,
    Staff(Vec<StaffId>),
    Group(String),
}

/// Demande de (re)génération des congés automatiques d'un mois.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoLeaveCommand {
    pub month: YearMonth,
    pub target: Target,
}

impl AutoLeaveCommand {
    pub fn new(month: YearMonth, target: Target) -> Self {
        Self { month, target }
    }

    /// Identifiants ciblés, dans l'ordre de la brigade ou du groupe.
    pub fn resolve_targets(&self, roster: &Roster) -> Result<Vec<StaffId>, SchedError> {
        match &self.target {
            Target::AllStaff => Ok(roster.staff.iter().map(|s| s.id.clone()).collect()),
            Target::Staff(ids) => Ok(ids.clone()),
            Target::Group(gid) => roster
                .find_group(gid)
                .map(|g| g.member_ids.clone())
                .ok_or_else(|| SchedError::UnknownGroup(gid.clone())),
        }
    }
}

/// Exécute les commandes contre un instantané et rend le suivant.
pub struct Dispatcher<R> {
    engine: LeaveEngine<R>,
}

impl<R: Rng> Dispatcher<R> {
    pub fn new(engine: LeaveEngine<R>) -> Self {
        Self { engine }
    }

    pub fn dispatch(&mut self, roster: &Roster, cmd: &AutoLeaveCommand) -> Result<Roster, SchedError> {
        let targets = cmd.resolve_targets(roster)?;
        let config = roster.monthly_configs.for_month(cmd.month);
        info!(month = %cmd.month, targets = targets.len(), "dispatching auto leave");

        let schedule = self.engine.generate(
            &roster.schedule,
            &roster.staff,
            &roster.groups,
            &config,
            &targets,
            cmd.month,
        );
        Ok(Roster {
            schedule,
            ..roster.clone()
        })
    }
}
