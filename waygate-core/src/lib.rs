use std::fmt;
use serde::{Deserialize, Serialize};

/// Location key of a room (ie: "entry_hall").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomKey(pub String);


impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}


impl RoomKey {
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() { return None; }
        if !s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')) {
            return None;
        }
        Some(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}


/// A normalized (trimmed, lowercase) keyword. Items are matched against door keys with these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Keyword(String);


impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}


impl Keyword {
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() { return None; }
        Some(Self(s.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against raw user input
    pub fn matches(&self, s: &str) -> bool {
        self.0 == s.trim().to_lowercase()
    }
}

impl TryFrom<String> for Keyword {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Keyword::parse(&s).ok_or_else(|| "keyword must not be empty".to_string())
    }
}

impl From<Keyword> for String {
    fn from(k: Keyword) -> Self {
        k.0
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_key_rejects_blank_and_spaces() {
        assert_eq!(RoomKey::parse("  entry_hall "), Some(RoomKey("entry_hall".into())));
        assert!(RoomKey::parse("   ").is_none());
        assert!(RoomKey::parse("entry hall").is_none());
    }

    #[test]
    fn keyword_is_normalized() {
        let k = Keyword::parse("  Brass ").unwrap();
        assert_eq!(k.as_str(), "brass");
        assert!(k.matches("BRASS"));
        assert!(!k.matches("brass key"));
        assert!(Keyword::parse("").is_none());
    }

    #[test]
    fn keyword_deserialize_rejects_empty() {
        let k: Result<Keyword, _> = Keyword::try_from(String::from(" "));
        assert!(k.is_err());
    }
}
