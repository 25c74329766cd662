//! Commands Layer
//!
//! Command handlers that bridge the front-end to the repositories.

mod wanted_cmd;

pub use wanted_cmd::*;
