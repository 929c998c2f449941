use serde::{Deserialize, Serialize};
use waygate_core::Keyword;

/// Door attached to an exit. An exit without a door is a plain passageway.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    #[serde(default)]
    pub open: bool,             // Door stands open
    #[serde(default)]
    pub locked: bool,           // Door is locked; blocks players and NPCs
    #[serde(default)]
    pub mob_locked: bool,       // Blocks NPCs only
    #[serde(default)]
    pub key: Option<Keyword>,   // Keyword an item must carry to (un)lock this door
}

impl Door {
    pub fn closed() -> Self {
        Self::default()
    }

    pub fn opened() -> Self {
        Self { open: true, ..Self::default() }
    }

    pub fn locked_with(key: Keyword) -> Self {
        Self { locked: true, key: Some(key), ..Self::default() }
    }

    /// An open door cannot be locked at the same time.
    pub fn is_consistent(&self) -> bool {
        !(self.open && self.locked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        let d = Door::closed();
        assert!(!d.open && !d.locked && !d.mob_locked && d.key.is_none());
        assert!(Door::opened().open);

        let d = Door::locked_with(Keyword::parse("test").unwrap());
        assert!(d.locked);
        assert!(!d.open);
        assert_eq!(d.key.as_ref().map(|k| k.as_str()), Some("test"));
    }

    #[test]
    fn open_and_locked_is_inconsistent() {
        let d = Door { open: true, locked: true, ..Door::default() };
        assert!(!d.is_consistent());
        let d = Door { open: true, mob_locked: true, ..Door::default() };
        assert!(d.is_consistent(), "mob lock is orthogonal to open");
    }

    #[test]
    fn missing_fields_default_to_false() {
        let d: Door = serde_json::from_str(r#"{"key":"Brass"}"#).unwrap();
        assert_eq!(d, Door { key: Keyword::parse("brass"), ..Door::default() });
    }
}
