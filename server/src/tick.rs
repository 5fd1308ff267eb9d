//! Tick driver: advances every in-world transport of one map by one simulation step.
//!
//! Responsibilities
//! - Clamp the elapsed time (`TransportSettings::max_tick_diff_ms`) so a stalled map cannot
//!   push a transport across several keyframes in one step.
//! - Call [`Transport::update`] once per in-world transport, in the order given.
//!
//! The caller owns the transports and guarantees nothing else mutates them during the call.

use crate::{settings::TransportSettings, transport::Transport, world::TransportContext};

/// Advance `transports` by `diff_ms`. Returns the elapsed time actually applied.
pub fn tick_transports<'t>(
    ctx: &mut TransportContext<'_>,
    settings: &TransportSettings,
    transports: impl IntoIterator<Item = &'t mut Transport>,
    diff_ms: u32,
) -> u32 {
    let diff = settings.clamp_diff(diff_ms);
    if diff < diff_ms {
        log::warn!("Transport tick of {diff_ms} ms clamped to {diff} ms");
    }

    for transport in transports {
        if transport.is_in_world() {
            transport.update(ctx, diff);
        }
    }
    diff
}
