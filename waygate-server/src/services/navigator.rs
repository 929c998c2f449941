use crate::broadcast::Broadcast;
use crate::capabilities::{Actor, OccupantIterator, RoomLookup};
use crate::error::{AppResult, DomainError};
use crate::models::room::Exit;
use crate::narration::{DoorMessages, NarrationVars, render};
use crate::services::exits;
use crate::services::locks;
use crate::services::outcome::{Denial, MoveOutcome};
use std::sync::Arc;
use waygate_core::RoomKey;

#[derive(Clone)]
struct ResolvedExit {
    label: String,
    to_room: RoomKey,
}

/// Walks actors through exits. Players are stopped by any closed door; they have to open
/// it first. The caller is responsible for storing the new location.
pub struct NavigatorService {
    broadcast: Arc<Broadcast>,
    messages: Arc<DoorMessages>,
}

impl NavigatorService {
    pub fn new(broadcast: Arc<Broadcast>, messages: Arc<DoorMessages>) -> Self {
        Self { broadcast, messages }
    }

    pub fn go(
        &self,
        dir: &str,
        actor: &dyn Actor,
        players: &dyn OccupantIterator,
        rooms: &dyn RoomLookup,
    ) -> AppResult<MoveOutcome> {
        let from = actor.location().clone();
        let exit = match self.resolve_exit_checked(dir, &from, rooms)? {
            Ok(exit) => exit,
            Err((denial, label)) => {
                let vars = NarrationVars::new(actor.name(), label, "");
                actor.say(&render(self.messages.denials.for_denial(denial), &vars));
                return Ok(MoveOutcome::Denied(denial));
            }
        };

        let origin = rooms.get_at(&from).ok_or(DomainError::NoCurrentRoom)?;
        let destination = rooms
            .get_at(&exit.to_room)
            .ok_or_else(|| DomainError::UnknownRoom(exit.to_room.clone()))?;

        let actor_id = actor.id();
        self.broadcast
            .to_room(origin, actor, move |p| p.id() == actor_id, players)
            .send(&self.messages.leave, &NarrationVars::new(actor.name(), &exit.label, origin.title()));
        self.broadcast
            .to_room(destination, actor, move |p| p.id() == actor_id, players)
            .send_third(&self.messages.arrive, &NarrationVars::new(actor.name(), &exit.label, destination.title()));

        tracing::debug!(actor=%actor.name(), %from, to=%exit.to_room, "moved");
        Ok(MoveOutcome::Moved { from, to: exit.to_room })
    }

    /// Whether an NPC standing in `room` could walk `dir`. NPCs open unlocked doors
    /// themselves, so only locks and mob-locks hold them back.
    pub fn npc_can_pass(&self, room: &RoomKey, dir: &str, rooms: &dyn RoomLookup) -> bool {
        let Some(here) = rooms.get_at(room) else {
            return false;
        };
        exits::find_exit(here, dir)
            .first()
            .is_some_and(|exit| locks::is_npc_passable(exit) && rooms.get_at(&exit.to_room).is_some())
    }

    /// Outer error: broken world. Inner error: the actor is refused, with the label to
    /// report it under.
    fn resolve_exit_checked(
        &self,
        dir: &str,
        from: &RoomKey,
        rooms: &dyn RoomLookup,
    ) -> AppResult<Result<ResolvedExit, (Denial, String)>> {
        let dir = dir.trim();
        if dir.is_empty() {
            return Ok(Err((Denial::NoDirection, String::new())));
        }

        let room = rooms.get_at(from).ok_or(DomainError::NoCurrentRoom)?;
        let Some(exit) = exits::find_exit(room, dir).first().copied() else {
            return Ok(Err((Denial::NoSuchExit, dir.to_string())));
        };

        Ok(check_passable(exit))
    }
}

fn check_passable(exit: &Exit) -> Result<ResolvedExit, (Denial, String)> {
    let label = exit.direction.to_string();
    if locks::is_locked(exit) {
        return Err((Denial::DoorLocked, label));
    }
    if !locks::is_open(exit) {
        return Err((Denial::DoorClosed, label));
    }
    Ok(ResolvedExit { label, to_room: exit.to_room.clone() })
}
