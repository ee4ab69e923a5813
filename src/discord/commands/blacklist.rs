// Blacklist and warning text commands.
//
// Same pattern as every other command file:
// 1. Pull primitives out of the invocation
// 2. Call the core settings service
// 3. Reply privately and mirror the action to the audit channel

use crate::core::settings::{normalize_domain_input, DomainChange, SettingsError};
use crate::discord::audit::command_log::log_command;
use crate::discord::commands::access::{operator_only, reply_private};
use crate::discord::{Context, Error};

const EMPTY_DOMAIN_REPLY: &str = "Please provide a domain, e.g. `example.com`.";

/// Add a domain to the blacklist.
#[poise::command(slash_command, prefix_command, check = "operator_only")]
pub async fn adddomain(
    ctx: Context<'_>,
    #[description = "Domain to blacklist, e.g. example.com"] domain: String,
) -> Result<(), Error> {
    let reply = match ctx.data().settings.add_domain(&domain).await {
        Ok(change) => domain_change_reply(&change),
        Err(SettingsError::EmptyDomain) => EMPTY_DOMAIN_REPLY.to_string(),
    };

    reply_private(ctx, reply).await?;
    let normalized = normalize_domain_input(&domain).unwrap_or_default();
    log_command(ctx, "adddomain", format!("Domain: {}", normalized)).await;
    Ok(())
}

/// Remove a domain from the blacklist.
#[poise::command(slash_command, prefix_command, check = "operator_only")]
pub async fn removedomain(
    ctx: Context<'_>,
    #[description = "Domain to remove"] domain: String,
) -> Result<(), Error> {
    let reply = match ctx.data().settings.remove_domain(&domain).await {
        Ok(change) => domain_change_reply(&change),
        Err(SettingsError::EmptyDomain) => EMPTY_DOMAIN_REPLY.to_string(),
    };

    reply_private(ctx, reply).await?;
    let normalized = normalize_domain_input(&domain).unwrap_or_default();
    log_command(ctx, "removedomain", format!("Domain: {}", normalized)).await;
    Ok(())
}

/// List all blacklisted domains.
#[poise::command(slash_command, prefix_command)]
pub async fn listdomains(ctx: Context<'_>) -> Result<(), Error> {
    let domains = ctx.data().settings.list_domains().await?;
    let joined = join_domains(&domains);

    reply_private(ctx, format!("Blacklisted domains: {}", joined)).await?;
    log_command(ctx, "listdomains", format!("Domains: {}", joined)).await;
    Ok(())
}

/// Set a new warning message.
#[poise::command(slash_command, prefix_command, check = "operator_only")]
pub async fn setwarning(
    ctx: Context<'_>,
    #[description = "Text shown to users whose link was removed"]
    #[rest]
    message: String,
) -> Result<(), Error> {
    ctx.data().settings.set_warning_message(&message).await?;

    reply_private(ctx, format!("Warning message updated to: {}", message)).await?;
    log_command(ctx, "setwarning", format!("New warning: {}", message)).await;
    Ok(())
}

pub fn domain_change_reply(change: &DomainChange) -> String {
    match change {
        DomainChange::Added(domain) => format!("Domain '{}' added to the blacklist.", domain),
        DomainChange::AlreadyPresent(domain) => {
            format!("Domain '{}' is already blacklisted.", domain)
        }
        DomainChange::Removed(domain) => format!("Domain '{}' removed from the blacklist.", domain),
        DomainChange::NotFound(domain) => {
            format!("Domain '{}' was not found in the blacklist.", domain)
        }
    }
}

pub fn join_domains(domains: &[String]) -> String {
    if domains.is_empty() {
        "No domains are blacklisted.".to_string()
    } else {
        domains.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_replies_are_distinct() {
        let added = domain_change_reply(&DomainChange::Added("x.com".into()));
        let present = domain_change_reply(&DomainChange::AlreadyPresent("x.com".into()));
        let removed = domain_change_reply(&DomainChange::Removed("x.com".into()));
        let missing = domain_change_reply(&DomainChange::NotFound("x.com".into()));

        assert_ne!(added, present);
        assert_ne!(removed, missing);
        assert_eq!(present, "Domain 'x.com' is already blacklisted.");
        assert_eq!(missing, "Domain 'x.com' was not found in the blacklist.");
    }

    #[test]
    fn test_join_domains() {
        assert_eq!(join_domains(&[]), "No domains are blacklisted.");
        assert_eq!(
            join_domains(&["x.com".to_string(), "twitter.com".to_string()]),
            "x.com, twitter.com"
        );
    }
}
