//! Units - Dimension parsing and image sizing
//!
//! This crate handles length units used by office document formats:
//! parsing dimension strings ("12pt", "3.5cm"), converting between
//! unit systems (dxa, points, pixels, inches, centimeters, EMU),
//! probing image headers for intrinsic pixel sizes, and computing
//! aspect-ratio-preserving placement geometry.

mod dimension;
mod error;
mod probe;
mod resize;

pub use dimension::*;
pub use error::*;
pub use probe::*;
pub use resize::*;
