//! Tunables for transport updates.

/// Default interval between pose pushes while moving (and grid checks while stopped).
pub const POSITION_UPDATE_DELAY_MS: u32 = 200;

/// Default clamp on a single tick's elapsed time.
///
/// A stalled map would otherwise advance every transport across several keyframes at once.
pub const MAX_TICK_DIFF_MS: u32 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransportSettings {
    pub position_update_delay_ms: u32,
    pub max_tick_diff_ms: u32,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            position_update_delay_ms: POSITION_UPDATE_DELAY_MS,
            max_tick_diff_ms: MAX_TICK_DIFF_MS,
        }
    }
}

impl TransportSettings {
    /// Elapsed time a tick is allowed to apply.
    #[inline]
    pub fn clamp_diff(&self, diff_ms: u32) -> u32 {
        diff_ms.min(self.max_tick_diff_ms)
    }
}
