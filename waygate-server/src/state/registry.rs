use crate::capabilities::{Actor, OccupantIterator};
use crate::models::player::Player;
use crate::models::types::PlayerId;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use waygate_core::RoomKey;

/// Everybody that is online, and where they are.
#[derive(Debug, Default)]
pub struct Registry {
    players: DashMap<PlayerId, Arc<RwLock<Player>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self { players: DashMap::new() }
    }

    pub fn insert(&self, player: Player) -> Arc<RwLock<Player>> {
        let id = player.id;
        let handle = Arc::new(RwLock::new(player));
        self.players.insert(id, handle.clone());
        handle
    }

    pub fn remove(&self, id: PlayerId) -> Option<Arc<RwLock<Player>>> {
        self.players.remove(&id).map(|(_, p)| p)
    }

    pub fn get(&self, id: PlayerId) -> Option<Arc<RwLock<Player>>> {
        self.players.get(&id).map(|p| p.value().clone())
    }

    /// Copy of the player as it is right now
    pub fn snapshot(&self, id: PlayerId) -> Option<Player> {
        self.get(id).map(|p| p.read().clone())
    }

    pub fn set_location(&self, id: PlayerId, to: RoomKey) -> bool {
        let Some(p) = self.get(id) else {
            return false;
        };
        p.write().location = to;
        true
    }

    pub fn set_in_combat(&self, id: PlayerId, in_combat: bool) -> bool {
        let Some(p) = self.get(id) else {
            return false;
        };
        p.write().in_combat = in_combat;
        true
    }

    /// Names of everybody online, sorted
    pub fn who(&self) -> Vec<String> {
        let mut names: Vec<String> = self.players.iter().map(|p| p.value().read().name.clone()).collect();
        names.sort();
        names
    }

    /// Names of everybody in `room`, sorted
    pub fn names_in(&self, room: &RoomKey) -> Vec<String> {
        let mut names = Vec::new();
        self.each_if(&|p: &dyn Actor| p.location() == room, &mut |p: &dyn Actor| names.push(p.name().to_string()));
        names.sort();
        names
    }
}

impl OccupantIterator for Registry {
    fn each_if(&self, predicate: &dyn Fn(&dyn Actor) -> bool, f: &mut dyn FnMut(&dyn Actor)) {
        for entry in self.players.iter() {
            let p = entry.value().read();
            if predicate(&*p) {
                f(&*p);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::output::OutputHandle;

    fn mk_player(name: &str, room: &str) -> Player {
        let (out, _rx) = OutputHandle::channel();
        Player::new(name, RoomKey::from(room), out)
    }

    #[test]
    fn who_and_names_in_room() {
        let reg = Registry::new();
        reg.insert(mk_player("Zed", "hall"));
        reg.insert(mk_player("Ada", "hall"));
        reg.insert(mk_player("Bob", "yard"));

        assert_eq!(reg.who(), vec!["Ada", "Bob", "Zed"]);
        assert_eq!(reg.names_in(&RoomKey::from("hall")), vec!["Ada", "Zed"]);
        assert!(reg.names_in(&RoomKey::from("attic")).is_empty());
    }

    #[test]
    fn set_location_and_combat() {
        let reg = Registry::new();
        let p = mk_player("Ada", "hall");
        let id = p.id;
        reg.insert(p);

        assert!(reg.set_location(id, RoomKey::from("yard")));
        assert!(reg.set_in_combat(id, true));
        let snap = reg.snapshot(id).unwrap();
        assert_eq!(snap.location.as_str(), "yard");
        assert!(snap.in_combat);

        assert!(reg.remove(id).is_some());
        assert!(!reg.set_location(id, RoomKey::from("hall")));
        assert!(reg.snapshot(id).is_none());
    }
}
