//! One editing session: the document, its row index, the cursor and the
//! undo history, driven by decoded key events.
//!
//! The terminal front end feeds [`key::KeyEvent`]s into
//! [`session::Session::dispatch`] and paints the [`frame::Frame`] returned
//! by [`session::Session::frame`]. Nothing here touches the terminal.
pub mod config;
pub mod errors;
pub mod frame;
pub mod key;
pub mod session;
