pub mod frecency;
pub mod record;
pub mod score;
pub mod temporal;

pub use record::{Record, RootPath, TodoState};
pub use score::Score;
pub use temporal::TemporalInfo;
