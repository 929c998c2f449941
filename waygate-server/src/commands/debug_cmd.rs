use crate::commands::{CmdCtx, CommandError, CommandResult};
use crate::input::parser::Intent;
use std::sync::Arc;

const USAGE: &str = "@debug where | @debug exit <dir> | @debug npc <dir>";

pub async fn debug_cmd(ctx: Arc<CmdCtx>, intent: Intent) -> CommandResult {
    let sub = intent.args.first().map(String::as_str).unwrap_or("");
    let dir = intent.args.get(1..).map(|a| a.join(" ")).unwrap_or_default();

    match sub {
        "where" => {
            let me = ctx.player()?;
            let title = ctx.world.look(&me.location).await?.map(|r| r.title).unwrap_or_else(|| "<unknown>".into());
            ctx.output.system(format!(
                "[debug] player={} locale={} room={} ({}) in_combat={} items={}",
                me.name,
                me.locale,
                me.location,
                title,
                me.in_combat,
                me.inventory.len(),
            ));
        }
        "exit" if !dir.is_empty() => {
            let me = ctx.player()?;
            match ctx.world.inspect_exit(&me.location, &dir).await? {
                Some(exit) => ctx.output.system(serde_json::to_string_pretty(&exit)?),
                None => ctx.output.system(format!("[debug] no exit '{dir}' in {}", me.location)),
            }
        }
        "npc" if !dir.is_empty() => {
            let me = ctx.player()?;
            let passable = ctx.world.npc_can_pass(&me.location, &dir).await?;
            ctx.output.system(format!("[debug] npc can pass {dir}: {passable}"));
        }
        _ => return Err(CommandError::Usage(USAGE.into())),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcast::Broadcast;
    use crate::commands::{Flow, process_command};
    use crate::models::door::Door;
    use crate::models::player::Player;
    use crate::models::room::{Exit, Room};
    use crate::models::types::Direction;
    use crate::narration::DoorMessages;
    use crate::net::output::{OutputHandle, drain_text};
    use crate::services::{DoorService, NavigatorService};
    use crate::state::registry::Registry;
    use crate::world::World;
    use crate::world::worker::start_world_worker;
    use waygate_core::RoomKey;

    #[tokio::test]
    async fn exit_dump_is_json() {
        let registry = Arc::new(Registry::new());
        let broadcast = Arc::new(Broadcast::seeded(1));
        let messages = Arc::new(DoorMessages::default());
        let world = World::new().with_room(
            Room::new("fake", "Fake Room").with_exit(Exit::new(Direction::Out, "hallway").with_door(Door::closed())),
        );
        let world = start_world_worker(
            world,
            registry.clone(),
            DoorService::new(broadcast.clone(), messages.clone()),
            NavigatorService::new(broadcast, messages.clone()),
            4,
        );
        let (output, mut rx) = OutputHandle::channel();
        let p = Player::new("Ada", RoomKey::from("fake"), output.clone());
        let ctx = Arc::new(CmdCtx { registry: registry.clone(), world, player_id: p.id, output, messages });
        registry.insert(p);

        assert_eq!(process_command("@debug exit out", ctx.clone()).await.unwrap(), Flow::Continue);
        let text = drain_text(&mut rx);
        let v: serde_json::Value = serde_json::from_str(&text[0]).unwrap();
        assert_eq!(v["direction"], "out");
        assert_eq!(v["to_room"], "hallway");
        assert_eq!(v["door"]["open"], false);

        process_command("@debug npc out", ctx.clone()).await.unwrap();
        assert_eq!(drain_text(&mut rx), vec!["[debug] npc can pass out: true".to_string()]);

        process_command("@debug exit", ctx.clone()).await.unwrap();
        assert_eq!(drain_text(&mut rx), vec![format!("Usage: {USAGE}")]);
    }
}
