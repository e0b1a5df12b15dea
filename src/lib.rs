// Library exports for the cardinal-snake decision engine
// This allows the replay tool and the integration tests to use the core
// logic without going through the HTTP server.

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod flood;
pub mod grid;
pub mod handler;
pub mod pathfind;
pub mod policy;
pub mod profiler;
pub mod replay;
pub mod safety;
pub mod sim;
pub mod types;
