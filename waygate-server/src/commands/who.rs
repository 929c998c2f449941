use crate::commands::{CmdCtx, CommandResult};
use std::sync::Arc;

pub async fn who(ctx: Arc<CmdCtx>) -> CommandResult {
    let list = ctx.registry.who();
    if list.is_empty() {
        ctx.output.line("No one is online.");
    } else {
        ctx.output.line(format!("Online ({}): {}", list.len(), list.join(", ")));
    }
    Ok(())
}
