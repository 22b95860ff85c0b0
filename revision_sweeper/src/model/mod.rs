//!
//! The sweep data model.
//!

pub mod record;
pub mod sample;
pub mod state;
