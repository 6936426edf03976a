//! Watches a Twitch channel and announces on Discord when it goes live.
pub mod auth;
pub mod bot;
pub mod cli;
pub mod clock;
pub mod notify;
pub mod options;
pub mod poll;
pub mod status;
pub mod twitch;
