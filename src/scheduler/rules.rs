use super::coverage::{self, Presence};
use crate::calendar::{Day, YearMonth};
use crate::model::{Holiday, Staff};
use crate::schedule::Schedule;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    /// Moins de deux personnes présentes.
    InsufficientStaff,
    /// Aucun Chef / Sous chef présent.
    NoSenior,
}

impl RuleViolation {
    pub fn code(&self) -> &'static str {
        match self {
            RuleViolation::InsufficientStaff => "INSUFFICIENT_STAFF",
            RuleViolation::NoSenior => "NO_SENIOR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCheck {
    Pass,
    Fail(RuleViolation),
}

impl RuleCheck {
    pub fn is_pass(&self) -> bool {
        matches!(self, RuleCheck::Pass)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayFinding {
    pub date: NaiveDate,
    pub violation: RuleViolation,
}

/// Contrôle d'effectif d'un jour chômé (`isOff == "2"`) ; les autres jours passent.
pub fn check_holiday_coverage(
    date: NaiveDate,
    holidays: &[Holiday],
    schedule: &Schedule,
    staff: &[Staff],
) -> RuleCheck {
    let day_off = holidays.iter().any(|h| h.date == date && h.is_day_off());
    if !day_off {
        return RuleCheck::Pass;
    }
    let month = YearMonth::from(date);
    match coverage::roster_shortfall(
        schedule,
        month,
        Day::from(date),
        staff,
        None,
        Presence::HolidayDuty,
    ) {
        Some(violation) => RuleCheck::Fail(violation),
        None => RuleCheck::Pass,
    }
}

/// Tous les jours en échec du mois, dans l'ordre chronologique.
pub fn check_month(
    month: YearMonth,
    holidays: &[Holiday],
    schedule: &Schedule,
    staff: &[Staff],
) -> Vec<HolidayFinding> {
    month
        .days()
        .into_iter()
        .filter_map(|day| month.date_of(day))
        .filter_map(|date| match check_holiday_coverage(date, holidays, schedule, staff) {
            RuleCheck::Pass => None,
            RuleCheck::Fail(violation) => Some(HolidayFinding { date, violation }),
        })
        .collect()
}
