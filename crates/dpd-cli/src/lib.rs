//! Front end for the DPD builder: configuration, logging, the pipeline
//! driver and the interactive menu.

pub mod config;
pub mod logging;
pub mod menu;
pub mod pipeline;
pub mod progress;
pub mod summary;
pub mod types;
