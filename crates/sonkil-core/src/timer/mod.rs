mod analysis;
mod driver;
mod engine;
mod ticks;

pub use analysis::{AnalysisProgress, AnalysisSettings, PRESSURE_TIPS};
pub use driver::TimerDriver;
pub use engine::{PressureTimer, Tick, TickEpoch, TimerState};
pub use ticks::{IntervalTicks, ManualTicks, TickSource};
