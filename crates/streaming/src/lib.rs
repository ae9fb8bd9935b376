pub mod http;
pub mod protocol;
pub mod save;
pub mod source;

pub use http::HttpSource;
pub use protocol::{DecodeError, ImageRecord, MarkerRecord, RoutePointRecord};
pub use save::{ExpeditionDraft, ExpeditionEdit, MarkerDraft, MarkerEdit, SaveError, SaveWorkflow};
pub use source::{ApiError, BoxFuture, ExpeditionSource, MarkerWrite, PlaceWrite};
