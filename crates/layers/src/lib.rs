pub mod loader;
pub mod replicate;
pub mod split;

pub use loader::{LoadError, load_all, load_expedition};
pub use replicate::{WORLD_COPY_OFFSETS, replicate_expedition};
pub use split::{SplitError, split_route};
