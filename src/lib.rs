// Library exports for the BumbleBee Battlesnake
// The server binary, the replay tool and the integration tests all go through here

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod engine;
pub mod replay;
pub mod safety;
pub mod targeting;
pub mod types;

pub use engine::decide;
