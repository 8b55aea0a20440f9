use super::rules::RuleViolation;
use crate::calendar::{Day, YearMonth};
use crate::model::{Group, Shift, ShiftCode, Staff, StaffId};
use crate::schedule::Schedule;

/// Effectif minimal exigé par la règle des jours chômés.
pub const MIN_HOLIDAY_STAFF: usize = 2;

/// Ce que « présent » veut dire selon la règle appliquée.
///
/// Les deux définitions coexistent : la couverture de groupe traite 國 comme
/// un congé, la règle des jours chômés le compte comme présent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Case renseignée et hors congé (例/休/國).
    Rostered,
    /// Tout sauf un congé, case vide comprise.
    Available,
    /// Case renseignée et ni 例 ni 休.
    HolidayDuty,
}

impl Presence {
    pub fn is_working(&self, shift: Option<&Shift>) -> bool {
        let value = shift.map(|s| s.value).unwrap_or(ShiftCode::Empty);
        match self {
            Presence::Rostered => value != ShiftCode::Empty && !value.is_leave(),
            Presence::Available => !value.is_leave(),
            Presence::HolidayDuty => {
                value != ShiftCode::Empty
                    && value != ShiftCode::Regular
                    && value != ShiftCode::Personal
            }
        }
    }
}

/// Périmètre sur lequel l'effectif est compté.
#[derive(Debug, Clone, Copy)]
pub enum CoverageScope<'a> {
    /// Personne sans groupe : aucune contrainte.
    Ungrouped,
    Group(&'a Group),
    /// Toute la brigade : au moins deux présents dont un encadrant.
    Roster(&'a [Staff]),
}

/// Identifiants présents ce jour-là parmi `candidates`, hors `exclude`.
pub fn working_ids<'a, I>(
    schedule: &Schedule,
    month: YearMonth,
    day: Day,
    candidates: I,
    exclude: Option<&StaffId>,
    presence: Presence,
) -> Vec<&'a StaffId>
where
    I: IntoIterator<Item = &'a StaffId>,
{
    candidates
        .into_iter()
        .filter(|id| Some(*id) != exclude)
        .filter(|id| presence.is_working(schedule.shift(month, id, day)))
        .collect()
}

/// Vérifie l'effectif du périmètre, la personne `exclude` étant considérée absente.
pub fn has_minimum_coverage(
    schedule: &Schedule,
    month: YearMonth,
    day: Day,
    exclude: Option<&StaffId>,
    scope: CoverageScope<'_>,
    presence: Presence,
) -> bool {
    match scope {
        CoverageScope::Ungrouped => true,
        CoverageScope::Group(group) => {
            if group.min_staff_count == 0 {
                return true;
            }
            let working = working_ids(schedule, month, day, &group.member_ids, exclude, presence);
            working.len() >= group.min_staff_count as usize
        }
        CoverageScope::Roster(staff) => {
            roster_shortfall(schedule, month, day, staff, exclude, presence).is_none()
        }
    }
}

/// Motif d'échec de la règle brigade entière, effectif d'abord.
pub fn roster_shortfall(
    schedule: &Schedule,
    month: YearMonth,
    day: Day,
    staff: &[Staff],
    exclude: Option<&StaffId>,
    presence: Presence,
) -> Option<RuleViolation> {
    let workers: Vec<&Staff> = staff
        .iter()
        .filter(|s| Some(&s.id) != exclude)
        .filter(|s| presence.is_working(schedule.shift(month, &s.id, day)))
        .collect();

    if workers.len() < MIN_HOLIDAY_STAFF {
        return Some(RuleViolation::InsufficientStaff);
    }
    if !workers.iter().any(|s| s.is_senior()) {
        return Some(RuleViolation::NoSenior);
    }
    None
}
