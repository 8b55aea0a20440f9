use crate::calendar::{Day, YearMonth};
use crate::model::{Shift, StaffId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cases d'une personne pour un mois : jour -> Shift.
pub type StaffMonth = BTreeMap<Day, Shift>;

/// Planning : mois -> personne -> jour -> Shift. Case absente = non affectée.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule(BTreeMap<YearMonth, BTreeMap<StaffId, StaffMonth>>);

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift(&self, month: YearMonth, staff: &StaffId, day: Day) -> Option<&Shift> {
        self.staff_month(month, staff).and_then(|m| m.get(&day))
    }

    pub fn staff_month(&self, month: YearMonth, staff: &StaffId) -> Option<&StaffMonth> {
        self.0.get(&month).and_then(|m| m.get(staff))
    }

    pub(crate) fn staff_month_mut(&mut self, month: YearMonth, staff: &StaffId) -> &mut StaffMonth {
        self.0
            .entry(month)
            .or_default()
            .entry(staff.clone())
            .or_default()
    }

    pub fn set(&mut self, month: YearMonth, staff: &StaffId, day: Day, shift: Shift) {
        self.staff_month_mut(month, staff).insert(day, shift);
    }

    pub fn clear(&mut self, month: YearMonth, staff: &StaffId, day: Day) -> Option<Shift> {
        self.0
            .get_mut(&month)
            .and_then(|m| m.get_mut(staff))
            .and_then(|m| m.remove(&day))
    }

    /// Efface les cases automatiques d'une personne sur un mois. Retourne le nombre retiré.
    pub fn clear_auto(&mut self, month: YearMonth, staff: &StaffId) -> usize {
        let Some(days) = self.0.get_mut(&month).and_then(|m| m.get_mut(staff)) else {
            return 0;
        };
        let before = days.len();
        days.retain(|_, s| s.is_manual);
        before - days.len()
    }

    /// Retire une personne de tous les mois.
    pub fn remove_staff(&mut self, staff: &StaffId) {
        for month in self.0.values_mut() {
            month.remove(staff);
        }
    }
}
