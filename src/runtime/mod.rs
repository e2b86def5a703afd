//! Single-writer async session loop and event stream APIs.

/// Event stream types emitted by the session loop.
pub mod events;
/// Handle and command loop implementation.
pub mod handle;
