// Discord commands module.
// Each feature gets its own command file.

pub mod access;

pub mod audit_log;

pub mod blacklist;

pub mod prefix_dispatch;

pub mod presence;

pub mod status;

use crate::discord::{Data, Error};

/// Every command the bot registers.
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        blacklist::adddomain(),
        blacklist::removedomain(),
        blacklist::listdomains(),
        blacklist::setwarning(),
        audit_log::setlogchannel(),
        audit_log::togglelogging(),
        status::status(),
        status::help(),
    ]
}
