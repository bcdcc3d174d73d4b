/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !(frame_dt.is_finite() && frame_dt > 0.0) {
            return 0;
        }
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        let cap = self.dt * 10.0;
        if self.accumulator > cap {
            log::debug!("frame backlog of {:.3}s dropped", self.accumulator - cap);
            self.accumulator = cap;
        }
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Scalable simulation clock.
///
/// Simulation time is independent of wall-clock time: each tick adds
/// `frame_dt * speed_factor`, so a factor of 0.1 gives slow motion and 0.0
/// freezes the simulation. The clock never runs backwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimClock {
    elapsed: f64,
    speed_factor: f32,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            speed_factor: 1.0,
        }
    }

    /// Advance by one frame. Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, frame_dt: f32) {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.elapsed += frame_dt as f64 * self.speed_factor as f64;
        }
    }

    /// Set the time scale. NaN and negative values clamp to 0.0; infinity is rejected.
    pub fn set_speed_factor(&mut self, factor: f32) {
        if factor.is_nan() {
            self.speed_factor = 0.0;
        } else if factor.is_finite() {
            self.speed_factor = factor.max(0.0);
        }
    }

    pub fn speed_factor(&self) -> f32 {
        self.speed_factor
    }

    /// Accumulated simulation seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Simulation seconds narrowed to f32 for per-frame math.
    pub fn elapsed_f32(&self) -> f32 {
        self.elapsed as f32
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}
