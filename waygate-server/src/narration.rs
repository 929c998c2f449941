//! Message catalog and template expansion for narrated door and movement events.
//!
//! Every narrated event is a set of (first-party, third-party) pairs. One pair is picked per
//! event and used for both the actor and the bystanders, so the two always describe the same
//! thing.
//!
//! Templates understand `{actor}`, `{dir}` and `{room}`. Anything else between braces is left
//! as written.

use crate::services::outcome::Denial;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Narration of one event from both viewpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePair {
    /// Sent to the actor
    pub first: String,
    /// Sent to everybody else in the room
    pub third: String,
}

impl MessagePair {
    pub fn new(first: impl Into<String>, third: impl Into<String>) -> Self {
        Self { first: first.into(), third: third.into() }
    }
}

/// Ordered phrasing variants of one event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessagePairSet(pub Vec<MessagePair>);

impl MessagePairSet {
    pub fn single(first: impl Into<String>, third: impl Into<String>) -> Self {
        Self(vec![MessagePair::new(first, third)])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&MessagePair> {
        self.0.get(idx)
    }
}

/// Values substituted into templates
#[derive(Debug, Clone, Default)]
pub struct NarrationVars {
    pub actor: String,
    pub dir: String,
    pub room: String,
}

impl NarrationVars {
    pub fn new(actor: impl Into<String>, dir: impl Into<String>, room: impl Into<String>) -> Self {
        Self { actor: actor.into(), dir: dir.into(), room: room.into() }
    }
}

static VAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{(?P<name>[a-z_]+)\}").expect("valid regex")
});

pub fn render(template: &str, vars: &NarrationVars) -> String {
    VAR_RE.replace_all(template, |caps: &regex::Captures| {
        match &caps["name"] {
            "actor" => vars.actor.clone(),
            "dir" => vars.dir.clone(),
            "room" => vars.room.clone(),
            _ => caps[0].to_string(),
        }
    }).into_owned()
}

/// Texts for refused actions. Only the actor sees these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DenialMessages {
    pub no_direction: String,
    pub no_exit: String,
    pub no_door: String,
    pub door_locked: String,
    pub door_open: String,
    pub door_closed: String,
    pub no_lock: String,
    pub no_key: String,
    pub in_combat: String,
}

impl Default for DenialMessages {
    fn default() -> Self {
        Self {
            no_direction: "Which way?".into(),
            no_exit: "You see no exit {dir}.".into(),
            no_door: "There is no door {dir}.".into(),
            door_locked: "The door {dir} is locked.".into(),
            door_open: "You have to close the door {dir} first.".into(),
            door_closed: "The door {dir} is closed.".into(),
            no_lock: "The door {dir} has no lock.".into(),
            no_key: "You don't have the key for the door {dir}.".into(),
            in_combat: "You are too busy fighting!".into(),
        }
    }
}

impl DenialMessages {
    pub fn for_denial(&self, denial: Denial) -> &str {
        match denial {
            Denial::NoDirection => &self.no_direction,
            Denial::NoSuchExit => &self.no_exit,
            Denial::NoDoor => &self.no_door,
            Denial::DoorLocked => &self.door_locked,
            Denial::DoorOpen => &self.door_open,
            Denial::DoorClosed => &self.door_closed,
            Denial::NoLock => &self.no_lock,
            Denial::NoKey => &self.no_key,
        }
    }
}

/// Complete message catalog. Can be overridden from the `[messages]` table of the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorMessages {
    pub open: MessagePairSet,
    pub close: MessagePairSet,
    pub lock: MessagePairSet,
    pub unlock: MessagePairSet,
    /// Departure; third party goes to the room being left
    pub leave: MessagePairSet,
    /// Arrival; only the third party is used, in the room being entered
    pub arrive: MessagePairSet,
    pub denials: DenialMessages,
}

impl DoorMessages {
    /// Name of the first event that has no message variants, if any.
    pub fn first_empty(&self) -> Option<&'static str> {
        [
            ("open", &self.open),
            ("close", &self.close),
            ("lock", &self.lock),
            ("unlock", &self.unlock),
            ("leave", &self.leave),
            ("arrive", &self.arrive),
        ]
        .into_iter()
        .find(|(_, set)| set.is_empty())
        .map(|(name, _)| name)
    }
}

impl Default for DoorMessages {
    fn default() -> Self {
        Self {
            open: MessagePairSet(vec![
                MessagePair::new("You open the door {dir}.", "{actor} opens the door {dir}."),
                MessagePair::new("You push the door {dir} open.", "{actor} pushes the door {dir} open."),
            ]),
            close: MessagePairSet(vec![
                MessagePair::new("You close the door {dir}.", "{actor} closes the door {dir}."),
                MessagePair::new("You pull the door {dir} shut.", "{actor} pulls the door {dir} shut."),
            ]),
            lock: MessagePairSet::single(
                "*click* You lock the door {dir}.",
                "{actor} locks the door {dir}.",
            ),
            unlock: MessagePairSet::single(
                "*click* You unlock the door {dir}.",
                "{actor} unlocks the door {dir}.",
            ),
            leave: MessagePairSet::single("You go {dir}.", "{actor} leaves {dir}."),
            arrive: MessagePairSet::single("You arrive in {room}.", "{actor} arrives."),
            denials: DenialMessages::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_known_and_unknown_tokens() {
        let vars = NarrationVars::new("Ada", "north", "Entry Hall");
        assert_eq!(render("{actor} goes {dir}.", &vars), "Ada goes north.");
        assert_eq!(render("In {room}: {mood}", &vars), "In Entry Hall: {mood}");
        assert_eq!(render("no tokens", &vars), "no tokens");
    }

    #[test]
    fn defaults_have_variants_for_every_event() {
        let m = DoorMessages::default();
        for set in [&m.open, &m.close, &m.lock, &m.unlock, &m.leave, &m.arrive] {
            assert!(!set.is_empty());
        }
        assert_eq!(m.open.len(), 2);
    }

    #[test]
    fn partial_override_from_toml_keeps_defaults() {
        let m: DoorMessages = toml::from_str(r#"
            [[open]]
            first = "You heave the gate {dir} open."
            third = "{actor} heaves the gate {dir} open."

            [denials]
            no_key = "Locked tight."
        "#).unwrap();

        assert_eq!(m.open.len(), 1);
        assert_eq!(m.open.get(0).unwrap().first, "You heave the gate {dir} open.");
        assert_eq!(m.denials.no_key, "Locked tight.");
        assert_eq!(m.denials.no_door, DenialMessages::default().no_door);
        assert_eq!(m.close, DoorMessages::default().close);
    }

    #[test]
    fn denial_lookup() {
        let d = DenialMessages::default();
        assert_eq!(d.for_denial(Denial::NoDirection), "Which way?");
        assert_eq!(d.for_denial(Denial::NoKey), d.no_key.as_str());
    }
}
