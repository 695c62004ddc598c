pub mod error;
pub mod exclusion;
pub mod normalize;
pub mod table;

pub use error::PipelineError;
pub use exclusion::{compute_exclusions, ExclusionPass};
pub use normalize::normalize_rows;
pub use table::{read_table, write_table};
