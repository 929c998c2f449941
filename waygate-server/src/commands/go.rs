use crate::commands::look::show_room;
use crate::commands::{CmdCtx, CommandResult};
use crate::input::parser::Intent;
use crate::services::MoveOutcome;
use std::sync::Arc;

pub async fn go(ctx: Arc<CmdCtx>, intent: Intent) -> CommandResult {
    if ctx.vetoed_by_combat()? {
        return Ok(());
    }

    // A refusal has already been told to the player
    if let MoveOutcome::Moved { to, .. } = ctx.world.go(ctx.player_id, &intent.dir_arg()).await? {
        show_room(&ctx, &to).await?;
    }
    Ok(())
}
