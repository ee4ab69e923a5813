// Audit channel output - embed formatting and command records.

pub mod command_log;
pub mod formatter;
