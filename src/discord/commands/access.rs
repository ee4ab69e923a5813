// Operator restriction for mutating commands, plus the framework error hook
// that turns a failed check into a private rejection.

use crate::discord::{Context, Data, Error};

pub const UNAUTHORIZED_REPLY: &str = "You are not authorized to use this command.";

/// Command check: passes for everyone unless an operator id is configured.
pub async fn operator_only(ctx: Context<'_>) -> Result<bool, Error> {
    Ok(ctx.data().operator.permits(ctx.author().id.get()))
}

/// Reply to the invoker only. Prefix commands can't be ephemeral and get a normal reply.
pub async fn reply_private(ctx: Context<'_>, text: impl Into<String>) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(text.into())
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::CommandCheckFailed { ctx, .. } => {
            tracing::debug!(
                user_id = ctx.author().id.get(),
                command = %ctx.command().name,
                "Rejected command from non-operator"
            );
            if let Err(e) = reply_private(ctx, UNAUTHORIZED_REPLY).await {
                tracing::warn!("Failed to send authorization rejection: {}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!("Error while handling framework error: {}", e);
            }
        }
    }
}
