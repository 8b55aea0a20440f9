use crate::calendar::YearMonth;
use crate::schedule::Schedule;
use crate::scheduler::SchedError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Identifiant fort pour Staff
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(String);

impl StaffId {
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

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Membre de la brigade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    /// Code de poste (`Chef`, `Sous chef`, `CDP`, ...).
    pub title: String,
    /// Exclu du moteur automatique (saisie manuelle uniquement).
    #[serde(default)]
    pub disable_auto: bool,
}

impl Staff {
    pub fn new<N: Into<String>, T: Into<String>>(name: N, title: T) -> Self {
        Self {
            id: StaffId::random(),
            name: name.into(),
            title: title.into(),
            disable_auto: false,
        }
    }

    /// Poste d'encadrement : le titre contient `Chef` ou `Sous` (sensible à la casse).
    pub fn is_senior(&self) -> bool {
        self.title.contains("Chef") || self.title.contains("Sous")
    }

    fn title_weight(&self) -> u8 {
        match self.title.as_str() {
            "Chef" => 1,
            "Sous chef" => 2,
            "CDP" => 3,
            "Demi CDP" => 4,
            "Commis" => 5,
            "Inter" => 6,
            "PT" => 7,
            _ => 99,
        }
    }
}

/// Tri d'affichage : hiérarchie de poste, puis identifiant.
pub fn sort_staff(staff: &[Staff]) -> Vec<Staff> {
    let mut out = staff.to_vec();
    out.sort_by(|a, b| {
        a.title_weight()
            .cmp(&b.title_weight())
            .then_with(|| a.id.cmp(&b.id))
    });
    out
}

/// Groupe de couverture (poste, partie...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub member_ids: Vec<StaffId>,
    /// Effectif minimal présent ; 0 = pas de contrainte.
    #[serde(default)]
    pub min_staff_count: u32,
}

impl Group {
    pub fn contains(&self, id: &StaffId) -> bool {
        self.member_ids.iter().any(|m| m == id)
    }
}

/// Code de poste d'une journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShiftCode {
    #[default]
    #[serde(rename = "")]
    Empty,
    #[serde(rename = "早")]
    Morning,
    #[serde(rename = "晚")]
    Evening,
    #[serde(rename = "全")]
    FullDay,
    #[serde(rename = "例")]
    Regular,
    #[serde(rename = "休")]
    Personal,
    #[serde(rename = "國")]
    National,
}

impl ShiftCode {
    pub const ALL: [ShiftCode; 7] = [
        ShiftCode::Empty,
        ShiftCode::Morning,
        ShiftCode::Evening,
        ShiftCode::FullDay,
        ShiftCode::Regular,
        ShiftCode::Personal,
        ShiftCode::National,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftCode::Empty => "",
            ShiftCode::Morning => "早",
            ShiftCode::Evening => "晚",
            ShiftCode::FullDay => "全",
            ShiftCode::Regular => "例",
            ShiftCode::Personal => "休",
            ShiftCode::National => "國",
        }
    }

    pub fn leave_kind(&self) -> Option<LeaveKind> {
        match self {
            ShiftCode::Regular => Some(LeaveKind::Regular),
            ShiftCode::Personal => Some(LeaveKind::Personal),
            ShiftCode::National => Some(LeaveKind::National),
            _ => None,
        }
    }

    pub fn is_leave(&self) -> bool {
        self.leave_kind().is_some()
    }
}

impl fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShiftCode {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ShiftCode::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SchedError::InvalidShiftCode(s.to_string()))
    }
}

/// Catégorie de congé statutaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaveKind {
    /// 例
    Regular,
    /// 休
    Personal,
    /// 國
    National,
}

impl LeaveKind {
    /// Ordre d'essai fixe du moteur.
    pub const PRIORITY: [LeaveKind; 3] = [LeaveKind::Regular, LeaveKind::Personal, LeaveKind::National];

    pub fn code(&self) -> ShiftCode {
        match self {
            LeaveKind::Regular => ShiftCode::Regular,
            LeaveKind::Personal => ShiftCode::Personal,
            LeaveKind::National => ShiftCode::National,
        }
    }
}

/// Valeur d'une case du planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub value: ShiftCode,
    /// Saisie humaine : jamais modifiée ni supprimée par le moteur.
    pub is_manual: bool,
}

impl Shift {
    pub fn manual(value: ShiftCode) -> Self {
        Self { value, is_manual: true }
    }
    pub fn auto(value: ShiftCode) -> Self {
        Self { value, is_manual: false }
    }

    pub fn is_auto_leave(&self) -> bool {
        !self.is_manual && self.value.is_leave()
    }
}

/// Plafonds mensuels par catégorie de congé, pour une personne.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthConfig {
    pub regular: u32,
    pub leave: u32,
    pub national: u32,
}

impl Default for MonthConfig {
    fn default() -> Self {
        Self { regular: 8, leave: 2, national: 1 }
    }
}

impl MonthConfig {
    pub fn max_for(&self, kind: LeaveKind) -> u32 {
        match kind {
            LeaveKind::Regular => self.regular,
            LeaveKind::Personal => self.leave,
            LeaveKind::National => self.national,
        }
    }

    pub fn total_days(&self) -> u32 {
        self.regular + self.leave + self.national
    }
}

/// Réglages par mois, avec repli sur `MonthConfig::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthlyConfigs(BTreeMap<YearMonth, MonthConfig>);

impl MonthlyConfigs {
    pub fn for_month(&self, month: YearMonth) -> MonthConfig {
        self.0.get(&month).copied().unwrap_or_default()
    }

    pub fn get(&self, month: YearMonth) -> Option<&MonthConfig> {
        self.0.get(&month)
    }

    pub fn set(&mut self, month: YearMonth, config: MonthConfig) {
        self.0.insert(month, config);
    }

    /// Recopie la configuration du mois précédent.
    pub fn copy_previous(&mut self, month: YearMonth) -> Result<MonthConfig, SchedError> {
        let prev = month.pred();
        let config = *self
            .0
            .get(&prev)
            .ok_or_else(|| SchedError::MissingConfig(prev.to_string()))?;
        self.0.insert(month, config);
        Ok(config)
    }
}

/// `isOff` : "2" = jour chômé statutaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffFlag {
    #[serde(rename = "0")]
    Working,
    #[serde(rename = "2")]
    DayOff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HolidayType {
    National,
    Weekend,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub date: NaiveDate,
    #[serde(default)]
    pub name: String,
    pub is_off: OffFlag,
    #[serde(rename = "type")]
    pub kind: HolidayType,
}

impl Holiday {
    pub fn is_day_off(&self) -> bool {
        self.is_off == OffFlag::DayOff
    }
}

/// Instantané complet : brigade, groupes, planning, jours fériés, réglages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    #[serde(default)]
    pub staff: Vec<Staff>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub schedule: Schedule,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub monthly_configs: MonthlyConfigs,
}

impl Roster {
    pub fn find_staff(&self, id: &StaffId) -> Option<&Staff> {
        self.staff.iter().find(|s| &s.id == id)
    }
    pub fn find_group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }
    pub fn group_of(&self, id: &StaffId) -> Option<&Group> {
        group_of(&self.groups, id)
    }

    /// Supprime une personne et toutes ses cases, tous mois confondus.
    pub fn remove_staff(&mut self, id: &StaffId) -> Option<Staff> {
        let pos = self.staff.iter().position(|s| &s.id == id)?;
        let removed = self.staff.remove(pos);
        self.schedule.remove_staff(id);
        for g in &mut self.groups {
            g.member_ids.retain(|m| m != id);
        }
        Some(removed)
    }
}

/// Groupe d'appartenance (au plus un).
pub fn group_of<'a>(groups: &'a [Group], id: &StaffId) -> Option<&'a Group> {
    groups.iter().find(|g| g.contains(id))
}
