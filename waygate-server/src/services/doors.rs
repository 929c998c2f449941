use crate::broadcast::Broadcast;
use crate::capabilities::{Actor, OccupantIterator, RoomLookup};
use crate::error::{AppResult, DomainError};
use crate::narration::{DoorMessages, MessagePairSet, NarrationVars, render};
use crate::services::exits;
use crate::services::locks;
use crate::services::outcome::{Denial, DoorAction, DoorOutcome};
use std::sync::Arc;
use tracing::{debug, trace, warn};
use waygate_core::RoomKey;

/// Player-facing door actions: open, close, lock and unlock.
///
/// Refusals are told to the actor only and change nothing. Successful actions are narrated
/// to the actor and to everybody else in the room. Opening and closing is mirrored onto the
/// door on the other side of the passage, when there is one.
pub struct DoorService {
    broadcast: Arc<Broadcast>,
    messages: Arc<DoorMessages>,
}

impl DoorService {
    pub fn new(broadcast: Arc<Broadcast>, messages: Arc<DoorMessages>) -> Self {
        Self { broadcast, messages }
    }

    pub fn messages(&self) -> &DoorMessages {
        &self.messages
    }

    pub fn perform(
        &self,
        action: DoorAction,
        dir: &str,
        actor: &dyn Actor,
        players: &dyn OccupantIterator,
        rooms: &mut dyn RoomLookup,
    ) -> AppResult<DoorOutcome> {
        let outcome = match action {
            DoorAction::Open => self.set_open(true, dir, actor, players, rooms),
            DoorAction::Close => self.set_open(false, dir, actor, players, rooms),
            DoorAction::Lock => self.turn_key(true, dir, actor, players, rooms),
            DoorAction::Unlock => self.turn_key(false, dir, actor, players, rooms),
        }?;

        debug!(
            actor=%actor.name(),
            locale=%actor.locale(),
            room=%actor.location(),
            action=action.as_str(),
            dir=dir.trim(),
            ?outcome,
            "door action"
        );
        Ok(outcome)
    }

    pub fn open_door(
        &self,
        dir: &str,
        actor: &dyn Actor,
        players: &dyn OccupantIterator,
        rooms: &mut dyn RoomLookup,
    ) -> AppResult<DoorOutcome> {
        self.perform(DoorAction::Open, dir, actor, players, rooms)
    }

    pub fn close_door(
        &self,
        dir: &str,
        actor: &dyn Actor,
        players: &dyn OccupantIterator,
        rooms: &mut dyn RoomLookup,
    ) -> AppResult<DoorOutcome> {
        self.perform(DoorAction::Close, dir, actor, players, rooms)
    }

    pub fn use_key_to_lock(
        &self,
        dir: &str,
        actor: &dyn Actor,
        players: &dyn OccupantIterator,
        rooms: &mut dyn RoomLookup,
    ) -> AppResult<DoorOutcome> {
        self.perform(DoorAction::Lock, dir, actor, players, rooms)
    }

    pub fn use_key_to_unlock(
        &self,
        dir: &str,
        actor: &dyn Actor,
        players: &dyn OccupantIterator,
        rooms: &mut dyn RoomLookup,
    ) -> AppResult<DoorOutcome> {
        self.perform(DoorAction::Unlock, dir, actor, players, rooms)
    }

    fn set_open(
        &self,
        open: bool,
        dir: &str,
        actor: &dyn Actor,
        players: &dyn OccupantIterator,
        rooms: &mut dyn RoomLookup,
    ) -> AppResult<DoorOutcome> {
        let dir = dir.trim();
        if dir.is_empty() {
            return Ok(self.deny(actor, Denial::NoDirection, dir));
        }

        let here = actor.location().clone();
        let room = rooms.get_at_mut(&here).ok_or(DomainError::NoCurrentRoom)?;
        let Some(exit) = exits::find_exit_mut(room, dir).into_iter().next() else {
            return Ok(self.deny(actor, Denial::NoSuchExit, dir));
        };

        let label = exit.direction.to_string();
        let Some(door) = exit.door.as_mut() else {
            return Ok(self.deny(actor, Denial::NoDoor, &label));
        };
        if door.locked {
            return Ok(self.deny(actor, Denial::DoorLocked, &label));
        }

        door.open = open;
        let to_room = exit.to_room.clone();

        let set = if open { &self.messages.open } else { &self.messages.close };
        self.narrate(set, &here, &label, actor, players, &*rooms)?;

        self.propagate(open, &here, &to_room, rooms);

        Ok(if open { DoorOutcome::Opened } else { DoorOutcome::Closed })
    }

    fn turn_key(
        &self,
        lock: bool,
        dir: &str,
        actor: &dyn Actor,
        players: &dyn OccupantIterator,
        rooms: &mut dyn RoomLookup,
    ) -> AppResult<DoorOutcome> {
        let dir = dir.trim();
        if dir.is_empty() {
            return Ok(self.deny(actor, Denial::NoDirection, dir));
        }

        let here = actor.location().clone();
        let room = rooms.get_at_mut(&here).ok_or(DomainError::NoCurrentRoom)?;
        let Some(exit) = exits::find_exit_mut(room, dir).into_iter().next() else {
            return Ok(self.deny(actor, Denial::NoSuchExit, dir));
        };

        let label = exit.direction.to_string();
        if let Err(denial) = locks::turn_key(exit, actor.inventory(), lock) {
            return Ok(self.deny(actor, denial, &label));
        }

        let set = if lock { &self.messages.lock } else { &self.messages.unlock };
        self.narrate(set, &here, &label, actor, players, &*rooms)?;

        Ok(if lock { DoorOutcome::Locked } else { DoorOutcome::Unlocked })
    }

    /// Mirrors the open state onto the exit in `to_room` that leads back to `here`.
    fn propagate(&self, open: bool, here: &RoomKey, to_room: &RoomKey, rooms: &mut dyn RoomLookup) {
        let Some(destination) = rooms.get_at_mut(to_room) else {
            warn!(from=%here, to=%to_room, "exit leads to an unknown room, nothing to propagate");
            return;
        };

        let found = exits::update_destination(here, destination, |reverse| {
            match reverse.door.as_mut() {
                None => trace!(room=%to_room, "way back has no door"),
                Some(door) if open && door.locked => {
                    warn!(room=%to_room, dir=%reverse.direction, "way back is locked, not opening it");
                }
                Some(door) => door.open = open,
            }
        });
        if !found {
            trace!(from=%here, to=%to_room, "one-way passage, nothing to propagate");
        }
    }

    fn narrate(
        &self,
        set: &MessagePairSet,
        here: &RoomKey,
        dir: &str,
        actor: &dyn Actor,
        players: &dyn OccupantIterator,
        rooms: &dyn RoomLookup,
    ) -> AppResult<()> {
        let room = rooms.get_at(here).ok_or(DomainError::NoCurrentRoom)?;
        let vars = NarrationVars::new(actor.name(), dir, room.title());
        let actor_id = actor.id();

        self.broadcast
            .to_room(room, actor, move |p| p.id() == actor_id, players)
            .send(set, &vars);
        Ok(())
    }

    fn deny(&self, actor: &dyn Actor, denial: Denial, dir: &str) -> DoorOutcome {
        let vars = NarrationVars::new(actor.name(), dir, "");
        actor.say(&render(self.messages.denials.for_denial(denial), &vars));
        DoorOutcome::Denied(denial)
    }
}
