pub mod worker;

use crate::capabilities::RoomLookup;
use crate::models::room::Room;
use std::collections::HashMap;
use waygate_core::RoomKey;

/// In-memory registry of all rooms and their exits.
#[derive(Debug, Clone, Default)]
pub struct World {
    rooms: HashMap<RoomKey, Room>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room. A room with the same key is replaced and returned.
    pub fn insert(&mut self, room: Room) -> Option<Room> {
        self.rooms.insert(room.key.clone(), room)
    }

    pub fn with_room(mut self, room: Room) -> Self {
        self.insert(room);
        self
    }

    pub fn contains(&self, key: &RoomKey) -> bool {
        self.rooms.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }
}

impl RoomLookup for World {
    fn get_at(&self, key: &RoomKey) -> Option<&Room> {
        self.rooms.get(key)
    }

    fn get_at_mut(&mut self, key: &RoomKey) -> Option<&mut Room> {
        self.rooms.get_mut(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_key() {
        let mut world = World::new().with_room(Room::new("hall", "Hall"));
        assert!(world.get_at(&RoomKey::from("hall")).is_some());
        assert!(world.get_at(&RoomKey::from("attic")).is_none());

        world.get_at_mut(&RoomKey::from("hall")).unwrap().title = "Great Hall".into();
        assert_eq!(world.get_at(&RoomKey::from("hall")).unwrap().title(), "Great Hall");
    }

    #[test]
    fn insert_replaces_same_key() {
        let mut world = World::new();
        assert!(world.insert(Room::new("hall", "Hall")).is_none());
        let old = world.insert(Room::new("hall", "Other Hall"));
        assert_eq!(old.map(|r| r.title), Some("Hall".to_string()));
        assert_eq!(world.len(), 1);
    }
}
