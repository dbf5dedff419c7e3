//! Domain models
//!
//! This module contains the domain models shared by services and handlers.

pub mod beatmap;
pub mod calculation;
pub mod gamemode;
pub mod score;

pub use beatmap::*;
pub use calculation::*;
pub use gamemode::*;
pub use score::*;
