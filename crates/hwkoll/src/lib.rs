//! Library part of the `hwkoll` command line tool
//!
//! Split out from the binary so the collectors and output code can be tested.

pub mod cli;
pub mod lookup;
pub mod probe;
pub mod render;
