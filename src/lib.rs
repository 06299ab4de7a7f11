//! Two-player local top-down shooter for the terminal.
//!
//! `entities` and `compute` hold the gameplay core; everything that touches
//! the terminal, the clock or the sound asset sits behind the traits in
//! `display`, `input`, `audio` and `game_loop`.

pub mod audio;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod game_loop;
pub mod input;
