/// Paces enemy arrivals with a plain accumulate-and-trigger timer.
///
/// The difficulty curve lives with the orchestrator, which hands in the
/// current interval every tick; the spawner only decides when that interval
/// has elapsed.
#[derive(Debug)]
pub struct EnemySpawner {
    since_spawn: f32,
}

impl EnemySpawner {
    /// Starts primed so a fresh session spawns its first enemy on the very
    /// first tick.
    pub fn new(interval: f32) -> Self {
        Self {
            since_spawn: interval,
        }
    }

    /// Returns true when it is time to spawn one enemy.
    pub fn update(&mut self, dt: f32, interval: f32) -> bool {
        self.since_spawn += dt;
        if self.since_spawn >= interval {
            self.since_spawn = 0.0;
            true
        } else {
            false
        }
    }
}
