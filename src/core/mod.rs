pub mod clock;
pub mod ids;
pub mod report;
pub mod seed;
pub mod stats;
pub mod store;

pub use clock::{Clock, FixedClock, ManualClock};
pub use ids::{IdSource, SessionIds};
pub use store::{PresenceStore, Snapshot, StoredState, Transition};
