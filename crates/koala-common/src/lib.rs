//! Common utilities for the Koala style core.
//!
//! This crate provides shared infrastructure used by the DOM and CSS crates:
//! - **Warning System** - colored terminal output for dropped declarations
//!   and unsupported features

pub mod warning;
