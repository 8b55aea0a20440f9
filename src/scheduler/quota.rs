use crate::calendar::YearMonth;
use crate::model::{LeaveKind, MonthConfig, ShiftCode, StaffId};
use crate::schedule::Schedule;

/// Solde restant par catégorie. Peut être négatif si la saisie manuelle dépasse le plafond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveQuota {
    pub regular: i64,
    pub leave: i64,
    pub national: i64,
}

impl LeaveQuota {
    pub fn get(&self, kind: LeaveKind) -> i64 {
        match kind {
            LeaveKind::Regular => self.regular,
            LeaveKind::Personal => self.leave,
            LeaveKind::National => self.national,
        }
    }

    pub fn has(&self, kind: LeaveKind) -> bool {
        self.get(kind) > 0
    }

    pub(crate) fn take(&mut self, kind: LeaveKind) {
        match kind {
            LeaveKind::Regular => self.regular -= 1,
            LeaveKind::Personal => self.leave -= 1,
            LeaveKind::National => self.national -= 1,
        }
    }
}

/// Plafond du mois moins les congés saisis manuellement.
pub fn remaining_quota(
    staff: &StaffId,
    month: YearMonth,
    schedule: &Schedule,
    config: &MonthConfig,
) -> LeaveQuota {
    let manual = |kind: LeaveKind| -> i64 {
        schedule
            .staff_month(month, staff)
            .map(|days| {
                days.values()
                    .filter(|s| s.is_manual && s.value == kind.code())
                    .count() as i64
            })
            .unwrap_or(0)
    };
    LeaveQuota {
        regular: i64::from(config.regular) - manual(LeaveKind::Regular),
        leave: i64::from(config.leave) - manual(LeaveKind::Personal),
        national: i64::from(config.national) - manual(LeaveKind::National),
    }
}

/// Décompte mensuel d'une personne, saisie manuelle et automatique confondues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaveTally {
    pub regular: u32,
    pub leave: u32,
    pub national: u32,
    pub morning: u32,
    pub evening: u32,
    pub full: u32,
}

impl LeaveTally {
    pub fn for_staff(schedule: &Schedule, month: YearMonth, staff: &StaffId) -> Self {
        let mut tally = Self::default();
        let Some(days) = schedule.staff_month(month, staff) else {
            return tally;
        };
        for shift in days.values() {
            match shift.value {
                ShiftCode::Regular => tally.regular += 1,
                ShiftCode::Personal => tally.leave += 1,
                ShiftCode::National => tally.national += 1,
                ShiftCode::Morning => tally.morning += 1,
                ShiftCode::Evening => tally.evening += 1,
                ShiftCode::FullDay => tally.full += 1,
                ShiftCode::Empty => {}
            }
        }
        tally
    }

    pub fn count(&self, kind: LeaveKind) -> u32 {
        match kind {
            LeaveKind::Regular => self.regular,
            LeaveKind::Personal => self.leave,
            LeaveKind::National => self.national,
        }
    }

    /// Au moins une catégorie dépasse son plafond.
    pub fn is_over(&self, config: &MonthConfig) -> bool {
        LeaveKind::PRIORITY
            .iter()
            .any(|k| self.count(*k) > config.max_for(*k))
    }
}
