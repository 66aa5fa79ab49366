//! A Sokoban board engine: layered grid cells, push-chain movement, and
//! victory detection, plus level-set loading and a play-session context.
//! Rendering and input handling are left to the caller; see `src/main.rs`
//! for a minimal terminal front-end.

pub mod board;
pub mod levels;
pub mod session;
pub mod tile;
