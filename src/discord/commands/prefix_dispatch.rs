// `!` command dispatch that waits for the link filter.
//
// poise runs its own prefix dispatch before it calls the event handler. The
// prefix is therefore only recognized for messages the event handler has
// already screened, and the handler dispatches those itself afterwards.

use crate::discord::commands::access;
use crate::discord::{Data, Error};
use dashmap::DashSet;
use poise::serenity_prelude as serenity;

pub const COMMAND_PREFIX: &str = "!";

/// Ids of messages that went through moderation and may now run as commands.
#[derive(Debug, Default)]
pub struct ScreenedMessages {
    ids: DashSet<u64>,
}

impl ScreenedMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self, message_id: u64) {
        self.ids.insert(message_id);
    }

    pub fn release(&self, message_id: u64) {
        self.ids.remove(&message_id);
    }

    pub fn is_screened(&self, message_id: u64) -> bool {
        self.ids.contains(&message_id)
    }
}

/// Split the command prefix off `content`, but only for a screened message.
pub fn strip_command_prefix(content: &str, screened: bool) -> Option<(&str, &str)> {
    if !screened {
        return None;
    }
    content
        .strip_prefix(COMMAND_PREFIX)
        .map(|rest| (COMMAND_PREFIX, rest))
}

/// Prefix hook for the framework's `stripped_dynamic_prefix` option.
pub fn screened_prefix<'a>(
    _ctx: &'a serenity::Context,
    message: &'a serenity::Message,
    data: &'a Data,
) -> poise::BoxFuture<'a, Result<Option<(&'a str, &'a str)>, Error>> {
    Box::pin(async move {
        let screened = data.screened.is_screened(message.id.get());
        Ok(strip_command_prefix(&message.content, screened))
    })
}

/// Run a message that has already been through moderation as a prefix command.
pub async fn dispatch_screened(
    ctx: &serenity::Context,
    framework: poise::FrameworkContext<'_, Data, Error>,
    message: &serenity::Message,
    data: &Data,
) {
    let message_id = message.id.get();
    data.screened.mark(message_id);

    let invocation_data =
        tokio::sync::Mutex::new(Box::new(()) as Box<dyn std::any::Any + Send + Sync>);
    let mut parent_commands = Vec::new();
    let result = poise::dispatch_message(
        framework,
        ctx,
        message,
        poise::MessageDispatchTrigger::MessageCreate,
        &invocation_data,
        &mut parent_commands,
    )
    .await;

    data.screened.release(message_id);
    if let Err(error) = result {
        access::on_error(error).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_ignored_until_screened() {
        assert_eq!(strip_command_prefix("!adddomain x.com", false), None);
        assert_eq!(
            strip_command_prefix("!adddomain x.com", true),
            Some(("!", "adddomain x.com"))
        );
        assert_eq!(strip_command_prefix("adddomain x.com", true), None);
    }

    #[test]
    fn test_release_clears_screened_mark() {
        let screened = ScreenedMessages::new();
        assert!(!screened.is_screened(7));

        screened.mark(7);
        assert!(screened.is_screened(7));
        assert!(!screened.is_screened(8));

        screened.release(7);
        assert!(!screened.is_screened(7));
    }
}
