pub mod session;

pub use session::{RoundClock, SessionStats};
