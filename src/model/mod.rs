//! Domain model for intervention data.

mod record;

pub use record::{Evaluation, InterventionRecord};
