use crate::capabilities::RoomLookup;
use crate::error::{AppResult, DomainError};
use crate::models::room::{Exit, Room};
use crate::models::types::PlayerId;
use crate::services::exits;
use crate::services::outcome::{DoorAction, DoorOutcome, MoveOutcome};
use crate::services::{DoorService, NavigatorService};
use crate::state::registry::Registry;
use crate::world::World;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use waygate_core::RoomKey;

pub enum WorldJob {
    /// Open, close, lock or unlock a door on behalf of a player
    Door {
        player: PlayerId,
        action: DoorAction,
        dir: String,
        reply: oneshot::Sender<AppResult<DoorOutcome>>,
    },
    /// Walk a player through an exit
    Go {
        player: PlayerId,
        dir: String,
        reply: oneshot::Sender<AppResult<MoveOutcome>>,
    },
    /// Copy of a room, for rendering
    Look {
        room: RoomKey,
        reply: oneshot::Sender<Option<Room>>,
    },
    /// Copy of the first exit in `dir`
    Inspect {
        room: RoomKey,
        dir: String,
        reply: oneshot::Sender<Option<Exit>>,
    },
    NpcPassable {
        room: RoomKey,
        dir: String,
        reply: oneshot::Sender<bool>,
    },
    /// Attach an exit to a room at runtime
    AddExit {
        room: RoomKey,
        exit: Exit,
        reply: oneshot::Sender<AppResult<()>>,
    },
}

/// Starts the task that owns the world. Jobs are handled one at a time in arrival order, so
/// a door action and its propagation are never interleaved with another job.
pub fn start_world_worker(
    mut world: World,
    registry: Arc<Registry>,
    doors: DoorService,
    navigator: NavigatorService,
    depth: usize,
) -> WorldHandle {
    let (tx, mut rx) = mpsc::channel::<WorldJob>(depth.max(1));

    tokio::spawn(async move {
        debug!(rooms = world.len(), "world worker started");
        while let Some(job) = rx.recv().await {
            handle_job(&mut world, &registry, &doors, &navigator, job);
        }
        debug!("world worker stopped");
    });

    WorldHandle { tx }
}

fn handle_job(world: &mut World, registry: &Registry, doors: &DoorService, navigator: &NavigatorService, job: WorldJob) {
    match job {
        WorldJob::Door { player, action, dir, reply } => {
            let res = match registry.snapshot(player) {
                Some(actor) => doors.perform(action, &dir, &actor, registry, world),
                None => Err(DomainError::NotFound),
            };
            let _ = reply.send(res);
        }

        WorldJob::Go { player, dir, reply } => {
            let res = match registry.snapshot(player) {
                Some(actor) => navigator.go(&dir, &actor, registry, &*world),
                None => Err(DomainError::NotFound),
            };
            if let Ok(MoveOutcome::Moved { to, .. }) = &res {
                registry.set_location(player, to.clone());
            }
            let _ = reply.send(res);
        }

        WorldJob::Look { room, reply } => {
            let _ = reply.send(world.get_at(&room).cloned());
        }

        WorldJob::Inspect { room, dir, reply } => {
            let exit = world
                .get_at(&room)
                .and_then(|r| exits::find_exit(r, &dir).first().map(|e| (*e).clone()));
            let _ = reply.send(exit);
        }

        WorldJob::NpcPassable { room, dir, reply } => {
            let _ = reply.send(navigator.npc_can_pass(&room, &dir, &*world));
        }

        WorldJob::AddExit { room, exit, reply } => {
            let _ = reply.send(add_exit(world, &room, exit));
        }
    }
}

fn add_exit(world: &mut World, room: &RoomKey, exit: Exit) -> AppResult<()> {
    if exit.door.as_ref().is_some_and(|d| !d.is_consistent()) {
        return Err(DomainError::Validation {
            field: "door",
            message: "a door cannot be open and locked at the same time".into(),
        });
    }
    if !world.contains(&exit.to_room) {
        warn!(from=%room, to=%exit.to_room, "exit leads to an unknown room");
    }

    let target = world.get_at_mut(room).ok_or_else(|| DomainError::UnknownRoom(room.clone()))?;
    target.add_exit(exit);
    Ok(())
}

/// Cheap, cloneable front of the world worker.
#[derive(Clone)]
pub struct WorldHandle {
    tx: mpsc::Sender<WorldJob>,
}

impl WorldHandle {
    pub async fn door(&self, player: PlayerId, action: DoorAction, dir: &str) -> AppResult<DoorOutcome> {
        let (reply, rx) = oneshot::channel();
        self.submit(WorldJob::Door { player, action, dir: dir.to_string(), reply }).await?;
        rx.await.map_err(|_| closed())?
    }

    pub async fn go(&self, player: PlayerId, dir: &str) -> AppResult<MoveOutcome> {
        let (reply, rx) = oneshot::channel();
        self.submit(WorldJob::Go { player, dir: dir.to_string(), reply }).await?;
        rx.await.map_err(|_| closed())?
    }

    pub async fn look(&self, room: &RoomKey) -> AppResult<Option<Room>> {
        let (reply, rx) = oneshot::channel();
        self.submit(WorldJob::Look { room: room.clone(), reply }).await?;
        rx.await.map_err(|_| closed())
    }

    pub async fn inspect_exit(&self, room: &RoomKey, dir: &str) -> AppResult<Option<Exit>> {
        let (reply, rx) = oneshot::channel();
        self.submit(WorldJob::Inspect { room: room.clone(), dir: dir.to_string(), reply }).await?;
        rx.await.map_err(|_| closed())
    }

    pub async fn npc_can_pass(&self, room: &RoomKey, dir: &str) -> AppResult<bool> {
        let (reply, rx) = oneshot::channel();
        self.submit(WorldJob::NpcPassable { room: room.clone(), dir: dir.to_string(), reply }).await?;
        rx.await.map_err(|_| closed())
    }

    pub async fn add_exit(&self, room: &RoomKey, exit: Exit) -> AppResult<()> {
        let (reply, rx) = oneshot::channel();
        self.submit(WorldJob::AddExit { room: room.clone(), exit, reply }).await?;
        rx.await.map_err(|_| closed())?
    }

    async fn submit(&self, job: WorldJob) -> AppResult<()> {
        self.tx.send(job).await.map_err(|_| closed())
    }
}

fn closed() -> DomainError {
    DomainError::InternalError("world worker closed".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcast::Broadcast;
    use crate::models::door::Door;
    use crate::models::player::Player;
    use crate::models::types::Direction;
    use crate::narration::DoorMessages;
    use crate::net::output::OutputHandle;
    use crate::services::locks;

    fn mk_world() -> World {
        World::new()
            .with_room(Room::new("fake", "Fake Room").with_exit(Exit::new(Direction::Out, "hallway").with_door(Door::closed())))
            .with_room(Room::new("hallway", "Hallway").with_exit(Exit::new(Direction::In, "fake").with_door(Door::closed())))
    }

    fn start(registry: Arc<Registry>) -> WorldHandle {
        let broadcast = Arc::new(Broadcast::seeded(5));
        let messages = Arc::new(DoorMessages::default());
        start_world_worker(
            mk_world(),
            registry,
            DoorService::new(broadcast.clone(), messages.clone()),
            NavigatorService::new(broadcast, messages),
            16,
        )
    }

    fn join(registry: &Registry, name: &str, room: &str) -> PlayerId {
        let (out, _rx) = OutputHandle::channel();
        let p = Player::new(name, room.into(), out);
        let id = p.id;
        registry.insert(p);
        id
    }

    #[tokio::test]
    async fn open_then_walk_updates_location() {
        let registry = Arc::new(Registry::new());
        let world = start(registry.clone());
        let ada = join(&registry, "Ada", "fake");

        assert_eq!(world.go(ada, "out").await.unwrap(), MoveOutcome::Denied(crate::services::Denial::DoorClosed));
        assert_eq!(world.door(ada, DoorAction::Open, "out").await.unwrap(), DoorOutcome::Opened);
        assert!(matches!(world.go(ada, "out").await.unwrap(), MoveOutcome::Moved { .. }));
        assert_eq!(registry.snapshot(ada).unwrap().location.as_str(), "hallway");

        // the way back was opened along with it
        let back = world.inspect_exit(&"hallway".into(), "in").await.unwrap().unwrap();
        assert!(locks::is_open(&back));
    }

    #[tokio::test]
    async fn concurrent_door_jobs_keep_both_sides_in_step() {
        let registry = Arc::new(Registry::new());
        let world = start(registry.clone());

        let mut tasks = Vec::new();
        for i in 0..20 {
            let id = join(&registry, &format!("p{i}"), if i % 2 == 0 { "fake" } else { "hallway" });
            let world = world.clone();
            let (action, dir) = match i % 4 {
                0 => (DoorAction::Open, "out"),
                1 => (DoorAction::Close, "in"),
                2 => (DoorAction::Close, "out"),
                _ => (DoorAction::Open, "in"),
            };
            tasks.push(tokio::spawn(async move { world.door(id, action, dir).await }));
        }
        for t in tasks {
            assert!(!t.await.unwrap().unwrap().is_denied());
        }

        let here = world.inspect_exit(&"fake".into(), "out").await.unwrap().unwrap();
        let back = world.inspect_exit(&"hallway".into(), "in").await.unwrap().unwrap();
        assert_eq!(locks::is_open(&here), locks::is_open(&back));
    }

    #[tokio::test]
    async fn unknown_player_and_room() {
        let registry = Arc::new(Registry::new());
        let world = start(registry);

        let err = world.door(PlayerId::new(), DoorAction::Open, "out").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound));

        assert!(world.look(&"attic".into()).await.unwrap().is_none());
        let err = world.add_exit(&"attic".into(), Exit::new(Direction::Up, "fake")).await.unwrap_err();
        assert!(matches!(err, DomainError::UnknownRoom(_)));
    }

    #[tokio::test]
    async fn add_exit_at_runtime() {
        let registry = Arc::new(Registry::new());
        let world = start(registry);

        let bad = Door { open: true, locked: true, ..Door::default() };
        let err = world
            .add_exit(&"fake".into(), Exit::new(Direction::Down, "hallway").with_door(bad))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "door", .. }));

        world.add_exit(&"fake".into(), Exit::new(Direction::Down, "hallway")).await.unwrap();
        assert!(world.npc_can_pass(&"fake".into(), "down").await.unwrap());
        assert_eq!(world.look(&"fake".into()).await.unwrap().unwrap().exits().len(), 2);
    }
}
