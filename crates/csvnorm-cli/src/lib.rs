//! Library components of the CSV normalizer CLI.

pub mod logging;
pub mod pipeline;
