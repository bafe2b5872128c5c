use crate::ScrollPosition;

/// A plain-data scroll container.
///
/// Hosts that own their scroll physics implement [`ScrollPosition`] directly; headless hosts,
/// simulations and tests can use this type instead. `velocity` is signed (row units per second)
/// and only [`ScrollState::advance`] integrates it.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub row_offset: f32,
    pub content_row_size: f32,
    pub viewport_row_size: f32,
    pub content_column_size: f32,
    pub velocity: f32,
    /// Fraction of the velocity left after one second of free motion.
    pub deceleration_rate: f32,
    pub elastic: bool,
    pub active: bool,
}

impl ScrollState {
    pub fn new(viewport_row_size: f32, content_column_size: f32) -> Self {
        Self {
            row_offset: 0.0,
            content_row_size: 0.0,
            viewport_row_size,
            content_column_size,
            velocity: 0.0,
            deceleration_rate: 0.135,
            elastic: false,
            active: true,
        }
    }

    pub fn with_elastic(mut self, elastic: bool) -> Self {
        self.elastic = elastic;
        self
    }

    /// Starts free motion (e.g. at the end of a touch drag).
    pub fn fling(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    /// Integrates momentum over `elapsed_ms` and returns whether the offset moved.
    pub fn advance(&mut self, elapsed_ms: u64) -> bool {
        if self.velocity == 0.0 || elapsed_ms == 0 {
            return false;
        }
        let dt = elapsed_ms as f32 / 1000.0;
        self.row_offset += self.velocity * dt;
        self.velocity *= self.deceleration_rate.powf(dt);
        if self.velocity.abs() < 1.0 {
            self.velocity = 0.0;
        }
        true
    }
}

impl ScrollPosition for ScrollState {
    fn row_offset(&self) -> f32 {
        self.row_offset
    }

    fn set_row_offset(&mut self, offset: f32) {
        self.row_offset = offset;
    }

    fn content_row_size(&self) -> f32 {
        self.content_row_size
    }

    fn set_content_row_size(&mut self, size: f32) {
        self.content_row_size = size;
    }

    fn viewport_row_size(&self) -> f32 {
        self.viewport_row_size
    }

    fn content_column_size(&self) -> f32 {
        self.content_column_size
    }

    fn velocity(&self) -> f32 {
        self.velocity.abs()
    }

    fn stop_momentum(&mut self) {
        self.velocity = 0.0;
    }

    fn is_elastic(&self) -> bool {
        self.elastic
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
