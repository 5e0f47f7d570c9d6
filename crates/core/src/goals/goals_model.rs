//! Goals domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::validation::QuantityInput;

/// Supply category a goal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalCategory {
    #[serde(alias = "Comida")]
    Food,
    #[serde(alias = "Bebidas")]
    Drinks,
    #[serde(alias = "Postres")]
    Desserts,
    #[serde(alias = "Desechables")]
    Disposables,
    #[serde(alias = "Decoración", alias = "Decoracion")]
    Decoration,
    #[default]
    #[serde(alias = "Otros")]
    Other,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 6] = [
        GoalCategory::Food,
        GoalCategory::Drinks,
        GoalCategory::Desserts,
        GoalCategory::Disposables,
        GoalCategory::Decoration,
        GoalCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalCategory::Food => "FOOD",
            GoalCategory::Drinks => "DRINKS",
            GoalCategory::Desserts => "DESSERTS",
            GoalCategory::Disposables => "DISPOSABLES",
            GoalCategory::Decoration => "DECORATION",
            GoalCategory::Other => "OTHER",
        }
    }

    /// Label shown to participants.
    pub fn label(&self) -> &'static str {
        match self {
            GoalCategory::Food => "Comida",
            GoalCategory::Drinks => "Bebidas",
            GoalCategory::Desserts => "Postres",
            GoalCategory::Disposables => "Desechables",
            GoalCategory::Decoration => "Decoración",
            GoalCategory::Other => "Otros",
        }
    }

    /// Parses a stored value. Unknown values fall back to `Other`.
    pub fn parse(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(raw) || c.label() == raw)
            .unwrap_or_default()
    }
}

/// How urgently a goal needs to be covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalPriority {
    #[serde(alias = "Urgente")]
    Urgent,
    #[default]
    Normal,
    #[serde(alias = "Opcional")]
    Optional,
}

impl GoalPriority {
    pub const ALL: [GoalPriority; 3] = [
        GoalPriority::Urgent,
        GoalPriority::Normal,
        GoalPriority::Optional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPriority::Urgent => "URGENT",
            GoalPriority::Normal => "NORMAL",
            GoalPriority::Optional => "OPTIONAL",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GoalPriority::Urgent => "Urgente",
            GoalPriority::Normal => "Normal",
            GoalPriority::Optional => "Opcional",
        }
    }

    /// Parses a stored value. Unknown values fall back to `Normal`.
    pub fn parse(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(raw) || p.label() == raw)
            .unwrap_or_default()
    }
}

/// Domain model representing a supply goal of an event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub event_id: String,
    pub name: String,
    /// Target quantity, always greater than zero
    pub target: i32,
    pub unit: String,
    pub category: GoalCategory,
    pub priority: GoalPriority,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    #[serde(default)]
    pub event_id: String,
    #[serde(default)]
    pub name: String,
    pub target: Option<QuantityInput>,
    pub unit: Option<String>,
    pub category: Option<GoalCategory>,
    pub priority: Option<GoalPriority>,
}

/// Validated goal ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct GoalRecord {
    pub event_id: String,
    pub name: String,
    pub target: i32,
    pub unit: String,
    pub category: GoalCategory,
    pub priority: GoalPriority,
}
