// Library exports for the Battlesnake bot
// This allows the replay tool and the integration tests to use the core bot logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod decision;
pub mod replay;
pub mod safety;
pub mod types;
