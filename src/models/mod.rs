pub mod absence;
pub mod team;
pub mod worker;

pub use absence::AbsenceLog;
pub use team::Team;
pub use worker::{Presence, Status, Worker, WorkerId};
