use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A mood check-in offered next to the input box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Feeling good.
    Happy,
    /// Neither up nor down.
    Neutral,
    /// Feeling low.
    Sad,
    /// Frustrated or angry.
    Angry,
    /// Worried or on edge.
    Anxious,
}

impl Mood {
    /// Every mood, in picker order.
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Neutral,
        Mood::Sad,
        Mood::Angry,
        Mood::Anxious,
    ];

    /// The picker label.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
            Mood::Anxious => "Anxious",
        }
    }

    /// The picker glyph.
    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "\u{1F60A}",
            Mood::Neutral => "\u{1F610}",
            Mood::Sad => "\u{1F614}",
            Mood::Angry => "\u{1F621}",
            Mood::Anxious => "\u{1F630}",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.label())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.label().eq_ignore_ascii_case(wanted) || mood.emoji() == wanted)
            .ok_or_else(|| format!("unknown mood: {wanted}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_emoji() {
        assert_eq!("sad".parse::<Mood>(), Ok(Mood::Sad));
        assert_eq!(" Anxious ".parse::<Mood>(), Ok(Mood::Anxious));
        assert_eq!("\u{1F60A}".parse::<Mood>(), Ok(Mood::Happy));
        assert!("sleepy".parse::<Mood>().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Mood::Neutral.to_string(), "\u{1F610} Neutral");
    }
}
