//! Discord gateway integration.
//!
//! The bot is the command/event surface in front of the giveaway service:
//! slash commands and buttons map 1:1 onto service operations, and the
//! `ready` event registers commands and rebuilds giveaway timers from the
//! store. The gateway client runs in its own tokio task; the service talks
//! to Discord through the shared `Arc<Http>` it was constructed with.

pub mod commands;
pub mod handler;
pub mod start;
