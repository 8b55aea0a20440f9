use thiserror::Error;

/// Options du moteur de congés
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    /// Nombre de jours travaillés consécutifs avant repos forcé.
    pub rest_after_consecutive_days: u32,
    /// Nombre maximal de congés automatiques consécutifs au tirage aléatoire.
    pub max_consecutive_auto_leave: u32,
    /// Compte une case vide comme présente pour la couverture de groupe.
    pub count_unassigned_as_available: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            rest_after_consecutive_days: 6,
            max_consecutive_auto_leave: 2,
            count_unassigned_as_available: false,
        }
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid month (expected YYYY-MM): {0}")]
    InvalidMonth(String),
    #[error("invalid day of month: {0}")]
    InvalidDay(String),
    #[error("invalid shift code: {0}")]
    InvalidShiftCode(String),
    #[error("unknown staff: {0}")]
    UnknownStaff(String),
    #[error("unknown group: {0}")]
    UnknownGroup(String),
    #[error("no leave configuration for {0}")]
    MissingConfig(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
