//! Collision rules between the character and the world
//!
//! Platforms use two rule sets evaluated in order. The horizontal span is
//! deliberately asymmetric (half a body width of slack on the left, a third
//! on the right) so landings are more forgiving from one side.

use super::state::{Checkpoint, MovingBody, Platform};

/// Outcome of resolving the character against one platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformContact {
    None,
    /// Resting on top and about to sink: the fall was cancelled
    Standing,
    /// Overlapping the platform: pushed to one body height below its top
    /// and the fall re-armed
    Landed,
}

#[inline]
fn within_span(body: &MovingBody, platform: &Platform) -> bool {
    let x = body.position.x;
    x >= platform.position.x - body.width() / 2.0
        && x <= platform.position.x + platform.width() - body.width() / 3.0
}

/// Apply the standing rule, then the landing rule, against one platform
pub fn resolve_platform(body: &mut MovingBody, platform: &Platform, gravity: f32) -> PlatformContact {
    let bottom = body.position.y + body.height();
    let top = platform.position.y;

    if bottom <= top && bottom + body.velocity.y >= top && within_span(body, platform) {
        body.velocity.y = 0.0;
        return PlatformContact::Standing;
    }

    if within_span(body, platform)
        && bottom >= top
        && body.position.y <= top + platform.height()
    {
        body.position.y = top + body.height();
        body.velocity.y = gravity;
        return PlatformContact::Landed;
    }

    PlatformContact::None
}

/// Geometric claim test for one checkpoint (ordering is checked by the caller)
///
/// A claimed checkpoint sits at y = +inf with zero extent, so the vertical
/// tests can never pass against it.
pub fn checkpoint_reached(body: &MovingBody, checkpoint: &Checkpoint, gate_active: bool) -> bool {
    let p = body.position;
    let c = checkpoint.position;
    gate_active
        && p.x >= c.x
        && p.y >= c.y
        && p.y + body.height() <= c.y + checkpoint.height()
        && p.x - body.width() <= c.x - checkpoint.width() + body.width() * 0.9
}
