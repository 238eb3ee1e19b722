mod clock;
mod duration;

pub use clock::{CycleClock, DEFAULT_CYCLE_SECS};
pub use duration::{CycleDuration, SECS_PER_DAY, SECS_PER_HOUR, SECS_PER_MINUTE};
