#![forbid(unsafe_code)]
//! Brigade — moteur de congés automatiques pour plannings de cuisine.
//!
//! - Quotas mensuels 例 / 休 / 國, saisie manuelle toujours prioritaire.
//! - Repos forcé après six jours travaillés, puis répartition aléatoire.
//! - Couverture minimale par groupe, contrôle des jours chômés.
//! - Aucune E/S dans le moteur : instantané en entrée, instantané en sortie.

pub mod calendar;
pub mod command;
pub mod model;
pub mod schedule;
pub mod scheduler;
pub mod storage;

pub use calendar::{days_in_month, Day, YearMonth};
pub use command::{AutoLeaveCommand, Dispatcher, Target};
pub use model::{
    sort_staff, Group, Holiday, HolidayType, LeaveKind, MonthConfig, MonthlyConfigs, OffFlag,
    Roster, Shift, ShiftCode, Staff, StaffId,
};
pub use schedule::{Schedule, StaffMonth};
pub use scheduler::{
    check_holiday_coverage, check_month, generate_auto_leaves, has_minimum_coverage,
    remaining_quota, CoverageScope, EngineOptions, HolidayFinding, LeaveEngine, LeaveQuota,
    LeaveTally, Presence, RuleCheck, RuleViolation, SchedError,
};
pub use storage::{JsonStorage, Storage};
