//! The crossterm boundary: raw mode, key decoding and painting frames.
pub mod input;
pub mod screen;
