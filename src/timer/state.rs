#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TimerState {
    Playing,  // Loop running, scenes advance on the clock
    Finished, // Last scene completed, loop stopped, progress pinned at 100%
}
