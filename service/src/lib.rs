#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod attendance;
pub mod batch;
pub mod config;
pub mod error;
pub mod europarl;
pub mod events;
pub mod export;
pub mod members;
pub mod pipeline;
pub mod term;
