mod gate;
mod present;

pub use gate::{RevealGate, RevealPolicy};
pub use present::{present, MASKED_NAME};
