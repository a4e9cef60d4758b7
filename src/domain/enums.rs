use serde::{Deserialize, Serialize};

/// Task priority; drives the weight used for progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Progress weight: low=1, medium=2, high=3
    pub fn weight(&self) -> u32 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Parse from a user-supplied label like "high" or "H"
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "low" | "l" => Some(Self::Low),
            "medium" | "med" | "m" => Some(Self::Medium),
            "high" | "h" => Some(Self::High),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Next priority in the low -> medium -> high -> low cycle
    pub fn cycle(&self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Low,
        }
    }
}

/// Color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Accent color choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Blue,
    Purple,
    Green,
    Orange,
}

impl Accent {
    pub fn all() -> &'static [Accent] {
        &[Accent::Blue, Accent::Purple, Accent::Green, Accent::Orange]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Green => "green",
            Self::Orange => "orange",
        }
    }

    pub fn cycle(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|a| a == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

/// The fixed mood vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoodKind {
    #[default]
    Calm,
    Motivated,
    Tired,
    Focused,
    Stressed,
}

impl MoodKind {
    pub fn all() -> &'static [MoodKind] {
        &[
            MoodKind::Calm,
            MoodKind::Motivated,
            MoodKind::Tired,
            MoodKind::Focused,
            MoodKind::Stressed,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            MoodKind::Calm => "Calm",
            MoodKind::Motivated => "Motivated",
            MoodKind::Tired => "Tired",
            MoodKind::Focused => "Focused",
            MoodKind::Stressed => "Stressed",
        }
    }

    /// Get the emoji symbol for this mood
    pub fn symbol(&self) -> &'static str {
        match self {
            MoodKind::Calm => "😌",
            MoodKind::Motivated => "🔥",
            MoodKind::Tired => "😴",
            MoodKind::Focused => "🎯",
            MoodKind::Stressed => "😰",
        }
    }

    pub fn cycle(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|m| m == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    Searching,
    Settings,
    ImportPath,
    Confirm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_weight() {
        assert_eq!(Priority::Low.weight(), 1);
        assert_eq!(Priority::Medium.weight(), 2);
        assert_eq!(Priority::High.weight(), 3);
    }

    #[test]
    fn test_priority_from_label() {
        assert_eq!(Priority::from_label("high"), Some(Priority::High));
        assert_eq!(Priority::from_label(" LOW "), Some(Priority::Low));
        assert_eq!(Priority::from_label("m"), Some(Priority::Medium));
        assert_eq!(Priority::from_label("urgent"), None);
    }

    #[test]
    fn test_priority_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let p: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(p, Priority::Low);
    }

    #[test]
    fn test_cycles_wrap() {
        assert_eq!(Priority::High.cycle(), Priority::Low);
        assert_eq!(Accent::Orange.cycle(), Accent::Blue);
        assert_eq!(MoodKind::Stressed.cycle(), MoodKind::Calm);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }
}
