use serde::Serialize;
use waygate_core::RoomKey;

/// Player-facing door actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DoorAction {
    Open,
    Close,
    Lock,
    Unlock,
}

impl DoorAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoorAction::Open => "open",
            DoorAction::Close => "close",
            DoorAction::Lock => "lock",
            DoorAction::Unlock => "unlock",
        }
    }
}

/// Why an action was refused. The actor is told, nobody else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Denial {
    /// No direction given
    NoDirection,
    /// Nothing in that direction
    NoSuchExit,
    /// A passageway, there is nothing to open or lock
    NoDoor,
    /// Door is locked, can't open or close it
    DoorLocked,
    /// Door is open, close it before locking
    DoorOpen,
    /// Door is closed, can't walk through
    DoorClosed,
    /// Door has no lock
    NoLock,
    /// Actor does not carry the key
    NoKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DoorOutcome {
    Opened,
    Closed,
    Locked,
    Unlocked,
    Denied(Denial),
}

impl DoorOutcome {
    pub fn is_denied(&self) -> bool {
        matches!(self, DoorOutcome::Denied(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MoveOutcome {
    Moved { from: RoomKey, to: RoomKey },
    Denied(Denial),
}
