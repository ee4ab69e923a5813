// Bot presence - Discord-layer glue only, no core involvement.

use poise::serenity_prelude as serenity;

/// Show what the bot is doing in the member list.
pub fn on_ready(ctx: &serenity::Context) {
    let activity = serenity::ActivityData::watching("for blacklisted links");
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}
