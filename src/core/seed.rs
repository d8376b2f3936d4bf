//! Initial roster used when nothing has been stored yet.

use crate::models::{Team, Worker, WorkerId};

/// Default roster size (three teams of 22).
pub const DEFAULT_ROSTER_SIZE: usize = 66;

/// Build `size` workers `worker-1..`, on terminals `PC-01..`, split in
/// three equal-ish blocks over teams A, B and C.
pub fn seed_roster(size: usize) -> Vec<Worker> {
    (0..size)
        .map(|i| {
            let team = match i * 3 / size {
                0 => Team::A,
                1 => Team::B,
                _ => Team::C,
            };
            let n = i + 1;

            Worker::new(
                WorkerId::from(format!("worker-{n}")),
                &format!("Worker {n}"),
                &format!("PC-{n:02}"),
                team,
            )
        })
        .collect()
}
