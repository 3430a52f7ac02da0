mod domain_types;
mod query;

pub use domain_types::*;
pub use query::*;
