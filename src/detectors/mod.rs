//! The four independent pattern detectors (spec §4.2-4.5).
//!
//! Each detector reads the graph only; none mutate shared state, so under
//! the `parallel` feature [`crate::detect`] can run them concurrently and
//! still hand the [`crate::scoring::RingAssembler`] results in the fixed
//! cycles → fan-in → fan-out → shell order the ring-id allocation requires.

pub mod cycle;
pub mod fan;
pub mod shell;

pub use cycle::CycleMatch;
pub use fan::FanMatch;
pub use shell::ShellMatch;
