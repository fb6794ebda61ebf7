//! Terminal dashboard.
//!
//! The refresh loop in [`App`] samples a snapshot, lets [`Layout`] paint it
//! onto a [`Surface`], presents the frame and waits for the next tick.

mod app;
mod event;
pub mod fmt;
mod layout;
pub mod style;
mod surface;
mod terminal;

pub use app::{App, AppError};
pub use event::{Pacer, Shutdown, SleepPacer, TerminalPacer};
pub use layout::{Branding, Layout};
pub use style::StyleToken;
pub use surface::{GridSurface, Surface};
pub use terminal::TerminalSurface;
