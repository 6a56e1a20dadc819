/// Simulation ticks per second.
pub const TICK_RATE: f32 = 60.0;

/// Fixed simulation step in seconds.
pub const TICK: f32 = 1.0 / TICK_RATE;

/// Converts irregular wall-clock frame times into fixed simulation ticks.
///
/// A slow frame yields several catch-up ticks, a fast one may yield none;
/// leftover time carries into the next frame so simulated time tracks wall
/// time without drift. Catch-up is deliberately uncapped: a long host stall
/// plays back as a visible burst of ticks, not as lost time.
#[derive(Debug, Default)]
pub struct FixedTimestep {
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self { accumulator: 0.0 }
    }

    /// Feeds elapsed wall-clock seconds and returns how many fixed ticks are
    /// now due.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed;
        let mut ticks = 0;
        while self.accumulator >= TICK {
            self.accumulator -= TICK;
            ticks += 1;
        }
        ticks
    }
}
