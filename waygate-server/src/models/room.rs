use crate::models::door::Door;
use crate::models::types::Direction;
use serde::{Deserialize, Serialize};
use waygate_core::RoomKey;

/// Exit model. Note these are not reciprocal; each exit is one-way and the way back
/// is a separate exit in the destination room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    /// Direction (or keyword) to go to
    pub direction: Direction,
    /// To Room Key
    pub to_room: RoomKey,
    /// Description of the exit
    pub description: Option<String>,
    /// Optional door. No door means an always open passageway
    pub door: Option<Door>,
}

impl Exit {
    pub fn new(direction: Direction, to_room: impl Into<RoomKey>) -> Self {
        Self {
            direction,
            to_room: to_room.into(),
            description: None,
            door: None,
        }
    }

    pub fn with_door(mut self, door: Door) -> Self {
        self.door = Some(door);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Room in the world graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub key: RoomKey,
    pub title: String,
    pub description: Option<String>,
    pub exits: Vec<Exit>,
}

impl Room {
    pub fn new(key: impl Into<RoomKey>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            description: None,
            exits: Vec::new(),
        }
    }

    pub fn key(&self) -> &RoomKey {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn exits(&self) -> &[Exit] {
        &self.exits
    }

    pub fn exits_mut(&mut self) -> &mut [Exit] {
        &mut self.exits
    }

    /// Exits can be added after creation (ie: a scripted event opens a passage)
    pub fn add_exit(&mut self, exit: Exit) {
        self.exits.push(exit);
    }

    /// Builder-style variant of `add_exit`
    pub fn with_exit(mut self, exit: Exit) -> Self {
        self.exits.push(exit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exits_keep_insertion_order() {
        let mut room = Room::new("hall", "Hall")
            .with_exit(Exit::new(Direction::North, "yard"))
            .with_exit(Exit::new(Direction::Out, "street").with_door(Door::closed()));
        room.add_exit(Exit::new(Direction::Custom("hatch".into()), "cellar"));

        let dirs: Vec<&str> = room.exits().iter().map(|e| e.direction.as_str()).collect();
        assert_eq!(dirs, vec!["north", "out", "hatch"]);
        assert_eq!(room.title(), "Hall");
        assert_eq!(room.key().as_str(), "hall");
    }
}
