//! Tuning module - numeric controller configuration loaded from RON.

mod data;
mod error;
mod plugin;

pub use data::{ControllerTuning, FirstPersonTuning, TopDownTuning, TUNING_PATH};
pub use error::TuningError;
pub use plugin::TuningPlugin;
