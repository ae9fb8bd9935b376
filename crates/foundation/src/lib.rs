pub mod assets;
pub mod geo;
pub mod ids;
pub mod ordinal;
pub mod palette;
pub mod sequence;

// Foundation crate: small, well-tested primitives only.
pub use assets::*;
pub use geo::*;
pub use ids::*;
pub use ordinal::*;
pub use palette::*;
pub use sequence::*;
