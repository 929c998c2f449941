use crate::capabilities::{Actor, OccupantIterator};
use crate::models::room::Room;
use crate::narration::{MessagePairSet, NarrationVars, render};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use waygate_core::RoomKey;

/// Delivers narration to an actor and the bystanders in a room.
pub struct Broadcast {
    rng: Mutex<StdRng>,
}

impl Default for Broadcast {
    fn default() -> Self {
        Self::new()
    }
}

impl Broadcast {
    pub fn new() -> Self {
        Self { rng: Mutex::new(StdRng::from_os_rng()) }
    }

    /// Deterministic variant selection
    pub fn seeded(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }

    fn pick(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.lock().random_range(0..len)
    }

    /// Prepares delivery into `room`. Occupants matching `exclude` are skipped for the
    /// third-party message (normally the actor itself).
    pub fn to_room<'a>(
        &'a self,
        room: &'a Room,
        actor: &'a dyn Actor,
        exclude: impl Fn(&dyn Actor) -> bool + 'a,
        players: &'a dyn OccupantIterator,
    ) -> RoomSender<'a> {
        RoomSender {
            broadcast: self,
            room: room.key(),
            actor,
            exclude: Box::new(exclude),
            players,
        }
    }
}

pub struct RoomSender<'a> {
    broadcast: &'a Broadcast,
    room: &'a RoomKey,
    actor: &'a dyn Actor,
    exclude: Box<dyn Fn(&dyn Actor) -> bool + 'a>,
    players: &'a dyn OccupantIterator,
}

impl RoomSender<'_> {
    /// Picks one variant and sends its first-party text to the actor and its third-party
    /// text to the others. Returns the variant index used.
    pub fn send(&self, pairs: &MessagePairSet, vars: &NarrationVars) -> Option<usize> {
        let idx = self.broadcast.pick(pairs.len());
        let Some(pair) = pairs.get(idx) else {
            tracing::warn!(room=%self.room, "empty message set, nothing narrated");
            return None;
        };

        self.actor.say(&render(&pair.first, vars));
        self.to_others(&render(&pair.third, vars));
        Some(idx)
    }

    /// Sends the third-party text of one variant only (ie: arrivals)
    pub fn send_third(&self, pairs: &MessagePairSet, vars: &NarrationVars) -> Option<usize> {
        let idx = self.broadcast.pick(pairs.len());
        let pair = pairs.get(idx)?;
        self.to_others(&render(&pair.third, vars));
        Some(idx)
    }

    /// Sends already rendered text to everybody in the room except the excluded. Returns
    /// how many received it.
    pub fn to_others(&self, text: &str) -> usize {
        let mut n = 0;
        self.players.each_if(
            &|p: &dyn Actor| p.location() == self.room && !(self.exclude)(p),
            &mut |p: &dyn Actor| {
                p.say(text);
                n += 1;
            },
        );
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::Player;
    use crate::narration::MessagePair;
    use crate::net::output::{OutputHandle, drain_text};

    struct Crowd(Vec<Player>);

    impl OccupantIterator for Crowd {
        fn each_if(&self, predicate: &dyn Fn(&dyn Actor) -> bool, f: &mut dyn FnMut(&dyn Actor)) {
            for p in &self.0 {
                if predicate(p) {
                    f(p);
                }
            }
        }
    }

    #[test]
    fn same_variant_for_both_sides() {
        let room = Room::new("hall", "Hall");
        let (out_a, mut rx_a) = OutputHandle::channel();
        let (out_b, mut rx_b) = OutputHandle::channel();
        let (out_c, mut rx_c) = OutputHandle::channel();
        let actor = Player::new("Ada", "hall".into(), out_a);
        let crowd = Crowd(vec![
            actor.clone(),
            Player::new("Bob", "hall".into(), out_b),
            Player::new("Cid", "yard".into(), out_c),
        ]);

        let pairs = MessagePairSet(
            (0..5).map(|i| MessagePair::new(format!("first {i}"), format!("third {i}"))).collect(),
        );
        let bc = Broadcast::seeded(7);
        let actor_id = actor.id;
        for _ in 0..20 {
            let idx = bc
                .to_room(&room, &actor, move |p| p.id() == actor_id, &crowd)
                .send(&pairs, &NarrationVars::default())
                .unwrap();

            assert_eq!(drain_text(&mut rx_a), vec![format!("first {idx}")]);
            assert_eq!(drain_text(&mut rx_b), vec![format!("third {idx}")]);
        }
        assert!(drain_text(&mut rx_c).is_empty(), "other rooms hear nothing");
    }

    #[test]
    fn seeded_broadcasts_pick_the_same_sequence() {
        let a = Broadcast::seeded(42);
        let b = Broadcast::seeded(42);
        let sa: Vec<usize> = (0..10).map(|_| a.pick(4)).collect();
        let sb: Vec<usize> = (0..10).map(|_| b.pick(4)).collect();
        assert_eq!(sa, sb);
        assert!(sa.iter().all(|i| *i < 4));
    }

    #[test]
    fn empty_set_says_nothing() {
        let room = Room::new("hall", "Hall");
        let (out, mut rx) = OutputHandle::channel();
        let actor = Player::new("Ada", "hall".into(), out);
        let crowd = Crowd(vec![actor.clone()]);

        let sent = Broadcast::seeded(1)
            .to_room(&room, &actor, |_| false, &crowd)
            .send(&MessagePairSet::default(), &NarrationVars::default());
        assert_eq!(sent, None);
        assert!(drain_text(&mut rx).is_empty());
    }
}
