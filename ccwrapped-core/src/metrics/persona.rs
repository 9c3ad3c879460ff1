//! Coding persona classification
//!
//! Assigns a time-of-day archetype based on which window of the hour
//! histogram dominates.

use serde::{Deserialize, Serialize};

use crate::types::HourCounts;

/// Coding persona archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "PersonaCard", try_from = "PersonaCard")]
pub enum Persona {
    /// Most activity between 10pm and 5am
    NightOwl,
    /// Most activity between 5am and noon
    MorningArchitect,
    /// Most activity between noon and 6pm, and the fallback for ties
    AfternoonOptimizer,
}

impl Persona {
    pub const ALL: [Persona; 3] = [
        Persona::NightOwl,
        Persona::MorningArchitect,
        Persona::AfternoonOptimizer,
    ];

    /// Get the display name for this persona.
    pub fn name(&self) -> &'static str {
        match self {
            Persona::NightOwl => "Night Owl",
            Persona::MorningArchitect => "Morning Architect",
            Persona::AfternoonOptimizer => "Afternoon Optimizer",
        }
    }

    /// Get the one-line description for this persona.
    pub fn description(&self) -> &'static str {
        match self {
            Persona::NightOwl => "Peak productivity after dark",
            Persona::MorningArchitect => "Peak productivity in early hours",
            Persona::AfternoonOptimizer => "Peak productivity in afternoon",
        }
    }

    /// Get an emoji for this persona.
    pub fn emoji(&self) -> &'static str {
        match self {
            Persona::NightOwl => "🦉",
            Persona::MorningArchitect => "🌅",
            Persona::AfternoonOptimizer => "☀️",
        }
    }

    /// Classify an hour histogram.
    ///
    /// Evening hours (18-21) belong to no window and never affect the result.
    pub fn classify(hours: &HourCounts) -> Persona {
        let windows = HourWindows::from_histogram(hours);

        if windows.night > windows.morning && windows.night > windows.afternoon {
            Persona::NightOwl
        } else if windows.morning > windows.afternoon {
            Persona::MorningArchitect
        } else {
            Persona::AfternoonOptimizer
        }
    }
}

/// Activity summed per time-of-day window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HourWindows {
    /// 22:00-04:59
    night: u64,
    /// 05:00-11:59
    morning: u64,
    /// 12:00-17:59
    afternoon: u64,
}

impl HourWindows {
    fn from_histogram(hours: &HourCounts) -> Self {
        Self {
            night: hours.sum_where(|h| h >= 22 || h <= 4),
            morning: hours.sum_where(|h| (5..=11).contains(&h)),
            afternoon: hours.sum_where(|h| (12..=17).contains(&h)),
        }
    }
}

/// Serialized form: the persona's display fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersonaCard {
    name: String,
    emoji: String,
    description: String,
}

impl From<Persona> for PersonaCard {
    fn from(persona: Persona) -> Self {
        Self {
            name: persona.name().to_string(),
            emoji: persona.emoji().to_string(),
            description: persona.description().to_string(),
        }
    }
}

impl TryFrom<PersonaCard> for Persona {
    type Error = String;

    fn try_from(card: PersonaCard) -> Result<Self, Self::Error> {
        Persona::ALL
            .into_iter()
            .find(|persona| persona.name() == card.name)
            .ok_or_else(|| format!("unknown persona: {}", card.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(pairs: &[(u32, u64)]) -> HourCounts {
        HourCounts::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_night_owl_classification() {
        assert_eq!(
            Persona::classify(&hist(&[(23, 5), (3, 5), (9, 4), (14, 4)])),
            Persona::NightOwl
        );
    }

    #[test]
    fn test_morning_architect_classification() {
        assert_eq!(
            Persona::classify(&hist(&[(5, 6), (11, 1), (13, 6)])),
            Persona::MorningArchitect
        );
    }

    #[test]
    fn test_afternoon_is_the_default() {
        assert_eq!(Persona::classify(&HourCounts::default()), Persona::AfternoonOptimizer);
        assert_eq!(
            Persona::classify(&hist(&[(0, 0), (8, 0)])),
            Persona::AfternoonOptimizer
        );
        // Night ties morning: neither strictly wins, morning doesn't beat afternoon
        assert_eq!(
            Persona::classify(&hist(&[(1, 5), (6, 5), (12, 5)])),
            Persona::AfternoonOptimizer
        );
    }

    #[test]
    fn test_evening_hours_are_ignored() {
        assert_eq!(
            Persona::classify(&hist(&[(18, 1000), (19, 1000), (20, 1000), (21, 1000), (7, 1)])),
            Persona::MorningArchitect
        );
    }

    #[test]
    fn test_window_edges() {
        assert_eq!(Persona::classify(&hist(&[(4, 1)])), Persona::NightOwl);
        assert_eq!(Persona::classify(&hist(&[(22, 1)])), Persona::NightOwl);
        assert_eq!(Persona::classify(&hist(&[(5, 1)])), Persona::MorningArchitect);
        assert_eq!(Persona::classify(&hist(&[(17, 1)])), Persona::AfternoonOptimizer);
    }

    #[test]
    fn test_classification_is_total() {
        for hour in 0..24u32 {
            for count in [0u64, 1, 7] {
                let persona = Persona::classify(&hist(&[(hour, count)]));
                assert!(Persona::ALL.contains(&persona));
            }
        }
    }

    #[test]
    fn test_persona_display() {
        assert_eq!(Persona::NightOwl.name(), "Night Owl");
        assert_eq!(Persona::NightOwl.emoji(), "🦉");
        assert_eq!(
            Persona::MorningArchitect.description(),
            "Peak productivity in early hours"
        );
    }

    #[test]
    fn test_persona_serializes_as_card() {
        let json = serde_json::to_value(Persona::AfternoonOptimizer).unwrap();
        assert_eq!(json["name"], "Afternoon Optimizer");
        assert_eq!(json["description"], "Peak productivity in afternoon");

        let back: Persona = serde_json::from_value(json).unwrap();
        assert_eq!(back, Persona::AfternoonOptimizer);

        let unknown = serde_json::json!({"name": "Lunch Hero", "emoji": "", "description": ""});
        assert!(serde_json::from_value::<Persona>(unknown).is_err());
    }
}
