//! Character-level scalars that do not depend on abilities.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

/// Default armor class for a fresh character
pub const DEFAULT_ARMOR_CLASS: u32 = 10;

/// Default proficiency bonus for a fresh character
pub const DEFAULT_PROFICIENCY_BONUS: u32 = 2;

/// Default walking speed in feet
pub const DEFAULT_WALK_SPEED: u32 = 30;

/// Hit points.
///
/// # Invariants
///
/// - `current <= max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HitPoints {
    max: u32,
    current: u32,
    temporary: u32,
}

impl HitPoints {
    pub fn new(max: u32, current: u32, temporary: u32) -> Result<Self, DomainError> {
        if current > max {
            return Err(DomainError::validation(
                "hitPoints",
                format!("current ({}) cannot exceed max ({})", current, max),
            ));
        }
        Ok(Self {
            max,
            current,
            temporary,
        })
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn temporary(&self) -> u32 {
        self.temporary
    }
}

impl<'de> Deserialize<'de> for HitPoints {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            max: u32,
            current: u32,
            #[serde(default)]
            temporary: u32,
        }
        let raw = Raw::deserialize(deserializer)?;
        HitPoints::new(raw.max, raw.current, raw.temporary).map_err(serde::de::Error::custom)
    }
}

/// Movement speeds in feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speed {
    pub walk: u32,
    #[serde(default)]
    pub fly: u32,
    #[serde(default)]
    pub swim: u32,
    #[serde(default)]
    pub climb: u32,
    #[serde(default)]
    pub burrow: u32,
}

impl Default for Speed {
    fn default() -> Self {
        Self {
            walk: DEFAULT_WALK_SPEED,
            fly: 0,
            swim: 0,
            climb: 0,
            burrow: 0,
        }
    }
}

/// Hit points, armor class, proficiency bonus and speeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionParameters {
    hit_points: HitPoints,
    armor_class: u32,
    proficiency_bonus: u32,
    speed: Speed,
}

impl Default for ProgressionParameters {
    fn default() -> Self {
        Self {
            hit_points: HitPoints::default(),
            armor_class: DEFAULT_ARMOR_CLASS,
            proficiency_bonus: DEFAULT_PROFICIENCY_BONUS,
            speed: Speed::default(),
        }
    }
}

impl ProgressionParameters {
    pub fn hit_points(&self) -> HitPoints {
        self.hit_points
    }

    pub fn armor_class(&self) -> u32 {
        self.armor_class
    }

    pub fn proficiency_bonus(&self) -> u32 {
        self.proficiency_bonus
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub(crate) fn set_hit_points(&mut self, hit_points: HitPoints) {
        self.hit_points = hit_points;
    }

    pub(crate) fn set_armor_class(&mut self, armor_class: u32) {
        self.armor_class = armor_class;
    }

    pub(crate) fn set_proficiency_bonus(&mut self, bonus: u32) {
        self.proficiency_bonus = bonus;
    }

    pub(crate) fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }
}
