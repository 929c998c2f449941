use crate::commands::{CmdCtx, CommandResult};
use crate::input::parser::Intent;
use crate::services::DoorAction;
use std::sync::Arc;

/// open / close / lock / unlock <dir>. The door service tells the player (and the room)
/// what happened, so there is nothing left to print here.
pub async fn door(ctx: Arc<CmdCtx>, intent: Intent, action: DoorAction) -> CommandResult {
    if ctx.vetoed_by_combat()? {
        return Ok(());
    }

    ctx.world.door(ctx.player_id, action, &intent.dir_arg()).await?;
    Ok(())
}
