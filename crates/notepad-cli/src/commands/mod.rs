pub mod add;
pub mod category;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod pin;
pub mod quick;
pub mod reminders;
pub mod search;
pub mod share;
pub mod show;
pub mod stats;
pub mod tags;
pub mod watch;
