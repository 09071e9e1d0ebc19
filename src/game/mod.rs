//! Light-cycle round simulation and the loop that drives it

pub mod actor;
pub mod ai;
pub mod camera;
pub mod collision;
pub mod grid;
pub mod port;
pub mod render;
pub mod round;
pub mod session;
pub mod spawn;

pub use round::{RoundResult, RoundState, Timings};
pub use session::{run, SessionOptions};
