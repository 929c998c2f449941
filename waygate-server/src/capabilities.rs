//! Contracts the door and navigation services depend on.
//!
//! The services never touch the registry, the world or a session directly. They only see
//! these capabilities, so tests can hand in small doubles.

use crate::models::item::Item;
use crate::models::room::Room;
use crate::models::types::PlayerId;
use waygate_core::RoomKey;

/// Lookup of rooms by location key.
pub trait RoomLookup {
    fn get_at(&self, key: &RoomKey) -> Option<&Room>;
    fn get_at_mut(&mut self, key: &RoomKey) -> Option<&mut Room>;
}

/// Something that can be matched by keyword (items, mostly).
pub trait Keyworded {
    fn has_keyword(&self, keyword: &str) -> bool;
}

/// A player-like actor issuing commands or witnessing them.
pub trait Actor {
    fn id(&self) -> PlayerId;
    fn name(&self) -> &str;
    fn locale(&self) -> &str;
    fn location(&self) -> &RoomKey;
    fn inventory(&self) -> &[Item];
    fn is_in_combat(&self) -> bool;
    /// Sends text to this actor only. Fire-and-forget.
    fn say(&self, text: &str);
}

/// Iterates the actors that are online.
pub trait OccupantIterator {
    /// Calls `f` for every actor for which `predicate` holds.
    fn each_if(&self, predicate: &dyn Fn(&dyn Actor) -> bool, f: &mut dyn FnMut(&dyn Actor));
}
