use serde::{Deserialize, Serialize};

/// The family of note layouts a timeline belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ruleset {
    /// A single 2D cursor with circles and sliders. Always one channel.
    Cursor,
    /// `count` independent 1D lanes with tap and hold notes.
    Lanes { count: usize },
}

impl Ruleset {
    /// Number of independent channels in this ruleset.
    pub fn channel_count(self) -> usize {
        match self {
            Self::Cursor => 1,
            Self::Lanes { count } => count,
        }
    }

    /// Whether notes of this ruleset carry a target position.
    pub fn has_position(self) -> bool {
        matches!(self, Self::Cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_has_one_positional_channel() {
        assert_eq!(Ruleset::Cursor.channel_count(), 1);
        assert!(Ruleset::Cursor.has_position());
    }

    #[test]
    fn lanes_channel_count() {
        let r = Ruleset::Lanes { count: 7 };
        assert_eq!(r.channel_count(), 7);
        assert!(!r.has_position());
    }

    #[test]
    fn serde_tagged_representation() {
        let json = serde_json::to_string(&Ruleset::Lanes { count: 4 }).unwrap();
        assert_eq!(json, r#"{"kind":"lanes","count":4}"#);
        let back: Ruleset = serde_json::from_str(r#"{"kind":"cursor"}"#).unwrap();
        assert_eq!(back, Ruleset::Cursor);
    }
}
