//! Predicates and mutators over the door of a single exit. An exit without a door is a
//! passageway: always open, never locked, passable by anyone. None of these fail on it.

use crate::capabilities::Keyworded;
use crate::models::room::Exit;
use crate::services::outcome::Denial;

pub fn is_door(exit: &Exit) -> bool {
    exit.door.is_some()
}

pub fn is_open(exit: &Exit) -> bool {
    exit.door.as_ref().is_none_or(|d| d.open)
}

pub fn is_locked(exit: &Exit) -> bool {
    exit.door.as_ref().is_some_and(|d| d.locked)
}

pub fn is_mob_locked(exit: &Exit) -> bool {
    exit.door.as_ref().is_some_and(|d| d.mob_locked)
}

/// NPCs can pass when there is no door, or when the door is neither locked nor mob-locked.
/// NPCs open unlocked doors by themselves.
pub fn is_npc_passable(exit: &Exit) -> bool {
    exit.door.as_ref().is_none_or(|d| !d.locked && !d.mob_locked)
}

pub fn lock_door(exit: &mut Exit) {
    if let Some(door) = exit.door.as_mut() {
        door.locked = true;
    }
}

pub fn unlock_door(exit: &mut Exit) {
    if let Some(door) = exit.door.as_mut() {
        door.locked = false;
    }
}

/// True when any of the items answers to `key`.
pub fn holds_key<K: Keyworded>(inventory: &[K], key: &str) -> bool {
    inventory.iter().any(|item| item.has_keyword(key))
}

/// Locks (`lock = true`) or unlocks the door of `exit` with a key from `inventory`.
/// Nothing changes unless the door has a key configured and the inventory holds it.
pub fn turn_key<K: Keyworded>(exit: &mut Exit, inventory: &[K], lock: bool) -> Result<(), Denial> {
    let Some(door) = exit.door.as_mut() else {
        return Err(Denial::NoDoor);
    };
    let Some(key) = door.key.as_ref() else {
        return Err(Denial::NoLock);
    };
    if lock && door.open {
        return Err(Denial::DoorOpen);
    }
    if !holds_key(inventory, key.as_str()) {
        return Err(Denial::NoKey);
    }

    door.locked = lock;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::door::Door;
    use crate::models::item::Item;
    use crate::models::types::Direction;
    use waygate_core::Keyword;

    fn passage() -> Exit {
        Exit::new(Direction::Out, "hallway")
    }

    fn door(open: bool, locked: bool, mob_locked: bool) -> Exit {
        passage().with_door(Door { open, locked, mob_locked, key: Keyword::parse("test") })
    }

    // ---------- predicates ----------
    #[test]
    fn passageway_is_always_open_and_passable() {
        let e = passage();
        assert!(!is_door(&e));
        assert!(is_open(&e));
        assert!(!is_locked(&e));
        assert!(!is_mob_locked(&e));
        assert!(is_npc_passable(&e));
    }

    #[test]
    fn npc_passable_matrix() {
        for open in [false, true] {
            for locked in [false, true] {
                for mob_locked in [false, true] {
                    let e = door(open, locked, mob_locked);
                    assert!(is_door(&e));
                    assert_eq!(is_open(&e), open);
                    assert_eq!(
                        is_npc_passable(&e),
                        !is_locked(&e) && !is_mob_locked(&e),
                        "open={open} locked={locked} mob_locked={mob_locked}"
                    );
                }
            }
        }
    }

    // ---------- lock_door() / unlock_door() ----------
    #[test]
    fn lock_and_unlock_are_idempotent() {
        let mut e = door(false, false, false);
        lock_door(&mut e);
        assert!(is_locked(&e));
        lock_door(&mut e);
        assert!(is_locked(&e));

        unlock_door(&mut e);
        assert!(!is_locked(&e));
        unlock_door(&mut e);
        assert!(!is_locked(&e));
    }

    #[test]
    fn lock_on_passageway_is_noop() {
        let mut e = passage();
        lock_door(&mut e);
        assert!(!is_door(&e));
        assert!(!is_locked(&e));
        unlock_door(&mut e);
        assert_eq!(e, passage());
    }

    #[test]
    fn lock_leaves_mob_lock_alone() {
        let mut e = door(false, false, true);
        unlock_door(&mut e);
        assert!(is_mob_locked(&e));
        assert!(!is_npc_passable(&e));
    }

    // ---------- turn_key() ----------
    #[test]
    fn turn_key_with_matching_item() {
        let inv = vec![Item::new("a test key", &["test", "key"])];

        let mut e = door(false, true, false);
        assert_eq!(turn_key(&mut e, &inv, false), Ok(()));
        assert!(!is_locked(&e));

        assert_eq!(turn_key(&mut e, &inv, true), Ok(()));
        assert!(is_locked(&e));
    }

    #[test]
    fn turn_key_without_key_changes_nothing() {
        let inv = vec![Item::new("a rusty key", &["rusty", "key"])];
        let mut e = door(false, true, false);
        let before = e.clone();
        assert_eq!(turn_key(&mut e, &inv, false), Err(Denial::NoKey));
        assert_eq!(e, before);

        let empty: Vec<Item> = vec![];
        assert_eq!(turn_key(&mut e, &empty, false), Err(Denial::NoKey));
        assert_eq!(e, before);
    }

    #[test]
    fn turn_key_denials() {
        let inv = vec![Item::new("a test key", &["test"])];

        let mut e = passage();
        assert_eq!(turn_key(&mut e, &inv, true), Err(Denial::NoDoor));

        let mut e = passage().with_door(Door::closed());
        assert_eq!(turn_key(&mut e, &inv, true), Err(Denial::NoLock));
        assert!(!is_locked(&e));

        let mut e = door(true, false, false);
        assert_eq!(turn_key(&mut e, &inv, true), Err(Denial::DoorOpen));
        assert!(!is_locked(&e), "an open door is never locked");
    }
}
