//! Load a photo, apply a classic color filter, export it as PNG.
//!
//! The flow is "load → filter → display/save":
//!
//! ```no_run
//! use photo_filter::{FilterKind, Session, Settings};
//! use std::path::Path;
//!
//! let mut session = Session::open(Path::new("holiday.jpg"), Settings::default())?;
//! session.apply(FilterKind::Sepia);
//! let saved = session.save()?;
//! println!("saved to {}", saved.display());
//! # Ok::<(), photo_filter::Error>(())
//! ```
//!
//! Everything is synchronous and single-threaded. The crate logs through
//! the `log` facade and leaves logger setup to the host application.

pub mod color;
pub mod error;
pub mod export;
pub mod filter;
pub mod state;

pub use color::ColorMatrix;
pub use error::{Error, Result};
pub use filter::FilterKind;
pub use state::session::Session;
pub use state::settings::{Falloff, GreyscaleMode, Settings, VignetteParams};
