use crate::models::room::{Exit, Room};
use crate::models::types::Direction;
use waygate_core::RoomKey;

/// Finds the exits of `room` labelled with `dir`. Normally zero or one; more than one
/// only happens with sloppy world data, which we log but tolerate.
pub fn find_exit<'a>(room: &'a Room, dir: &str) -> Vec<&'a Exit> {
    let Some(wanted) = Direction::from_token(dir) else {
        return Vec::new();
    };

    let found: Vec<&Exit> = room.exits().iter().filter(|e| e.direction == wanted).collect();
    if found.len() > 1 {
        tracing::warn!(room=%room.key, dir=%wanted, count=found.len(), "duplicate exits for direction");
    }
    found
}

/// Mutable variant of `find_exit`.
pub fn find_exit_mut<'a>(room: &'a mut Room, dir: &str) -> Vec<&'a mut Exit> {
    let Some(wanted) = Direction::from_token(dir) else {
        return Vec::new();
    };

    room.exits_mut().iter_mut().filter(|e| e.direction == wanted).collect()
}

/// Finds the exit in `destination` that leads back to `current` and hands it to `on_found`.
/// The callback runs at most once. One-way passages simply have no way back.
pub fn update_destination<F>(current: &RoomKey, destination: &mut Room, on_found: F) -> bool
where
    F: FnOnce(&mut Exit),
{
    match destination.exits_mut().iter_mut().find(|e| &e.to_room == current) {
        Some(reverse) => {
            on_found(reverse);
            true
        }
        None => false,
    }
}
