use super::coverage::{self, CoverageScope, Presence};
use super::quota::{self, LeaveQuota};
use super::EngineOptions;
use crate::calendar::{Day, YearMonth};
use crate::model::{self, Group, LeaveKind, MonthConfig, Shift, Staff, StaffId};
use crate::schedule::Schedule;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

#[allow(clippy::too_many_arguments)]
pub(super) fn generate<R: Rng + ?Sized>(
    schedule: &Schedule,
    staff_list: &[Staff],
    groups: &[Group],
    config: &MonthConfig,
    targets: &[StaffId],
    month: YearMonth,
    opts: EngineOptions,
    rng: &mut R,
) -> Schedule {
    let mut out = schedule.clone();
    let days = month.days();

    let mut staff: Vec<&Staff> = Vec::with_capacity(targets.len());
    for id in targets {
        if staff.iter().any(|s| &s.id == id) {
            continue;
        }
        match staff_list.iter().find(|s| &s.id == id) {
            Some(s) => staff.push(s),
            None => warn!(staff = %id, "unknown target staff, skipped"),
        }
    }

    for s in &staff {
        let cleared = out.clear_auto(month, &s.id);
        debug!(staff = %s.id, %month, cleared, "auto leave reset");
    }

    let presence = if opts.count_unassigned_as_available {
        Presence::Available
    } else {
        Presence::Rostered
    };

    for s in staff {
        if s.disable_auto {
            debug!(staff = %s.id, "auto leave disabled, skipped");
            continue;
        }
        let mut planner = LeavePlanner {
            staff: &s.id,
            month,
            group: model::group_of(groups, &s.id),
            presence,
            quota: quota::remaining_quota(&s.id, month, &out, config),
        };
        let forced = planner.apply_mandatory_rest(&mut out, &days, opts.rest_after_consecutive_days);
        let filled = planner.fill_randomly(&mut out, &days, opts.max_consecutive_auto_leave, &mut *rng);
        info!(staff = %s.id, %month, forced, filled, "auto leave generated");
    }

    out
}

/// État de planification d'une personne pendant un passage du moteur.
struct LeavePlanner<'a> {
    staff: &'a StaffId,
    month: YearMonth,
    group: Option<&'a Group>,
    presence: Presence,
    quota: LeaveQuota,
}

impl LeavePlanner<'_> {
    /// Pose un congé sur une case vide si quota et couverture le permettent. Tout ou rien.
    fn try_assign(&mut self, schedule: &mut Schedule, day: Day) -> Option<LeaveKind> {
        if schedule.shift(self.month, self.staff, day).is_some() {
            return None;
        }
        let scope = self
            .group
            .map_or(CoverageScope::Ungrouped, CoverageScope::Group);
        if !coverage::has_minimum_coverage(
            schedule,
            self.month,
            day,
            Some(self.staff),
            scope,
            self.presence,
        ) {
            debug!(staff = %self.staff, %day, "coverage would drop below minimum");
            return None;
        }
        let kind = LeaveKind::PRIORITY
            .into_iter()
            .find(|k| self.quota.has(*k))?;
        schedule.set(self.month, self.staff, day, Shift::auto(kind.code()));
        self.quota.take(kind);
        debug!(staff = %self.staff, %day, leave = %kind.code(), "leave assigned");
        Some(kind)
    }

    /// Repos forcé le lendemain de `threshold` jours travaillés d'affilée.
    /// Un échec ne remet pas le compteur à zéro.
    fn apply_mandatory_rest(&mut self, schedule: &mut Schedule, days: &[Day], threshold: u32) -> usize {
        let mut assigned = 0;
        let mut streak = 0u32;
        for (idx, day) in days.iter().enumerate() {
            let working = schedule
                .shift(self.month, self.staff, *day)
                .map_or(true, |s| !s.value.is_leave());
            if working {
                streak += 1;
            } else {
                streak = 0;
            }

            if streak >= threshold {
                let Some(next) = days.get(idx + 1) else {
                    continue;
                };
                if self.try_assign(schedule, *next).is_some() {
                    assigned += 1;
                    streak = 0;
                }
            }
        }
        assigned
    }

    /// Répartit le quota restant sur les cases vides, dans un ordre aléatoire.
    /// Une pose qui formerait plus de `max_streak` congés automatiques contigus est sautée.
    fn fill_randomly<R: Rng + ?Sized>(
        &mut self,
        schedule: &mut Schedule,
        days: &[Day],
        max_streak: u32,
        rng: &mut R,
    ) -> usize {
        let mut open: Vec<Day> = days
            .iter()
            .copied()
            .filter(|d| schedule.shift(self.month, self.staff, *d).is_none())
            .collect();
        open.shuffle(rng);

        let mut assigned = 0;
        for day in open {
            let before = self.auto_leave_run(schedule, day, Day::pred);
            let after = self.auto_leave_run(schedule, day, Day::succ);
            if before + after + 1 > max_streak {
                continue;
            }
            if self.try_assign(schedule, day).is_some() {
                assigned += 1;
            }
        }
        assigned
    }

    /// Congés automatiques contigus à `day` dans une direction (calendrier, pas ordre de tirage).
    fn auto_leave_run(&self, schedule: &Schedule, day: Day, step: fn(&Day) -> Option<Day>) -> u32 {
        let mut run = 0;
        let mut cursor = step(&day);
        while let Some(d) = cursor {
            match schedule.shift(self.month, self.staff, d) {
                Some(s) if s.is_auto_leave() => {
                    run += 1;
                    cursor = step(&d);
                }
                _ => break,
            }
        }
        run
    }
}
