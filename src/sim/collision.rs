//! Collision detection and response
//!
//! All tests are discrete, evaluated once per tick. A fast ball can tunnel
//! through a thin obstacle between two ticks; nothing here sweeps.

use glam::Vec2;

use super::entity::{Agent, Obstacle, Pickup};
use super::rect::Rect;

/// True if `a`, `b`, `c` wind counter-clockwise (in screen coordinates)
#[inline]
fn ccw(a: Vec2, b: Vec2, c: Vec2) -> bool {
    (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
}

/// Orientation-based segment intersection test
///
/// Collinear overlaps are not reported.
pub fn segments_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    ccw(a, c, d) != ccw(b, c, d) && ccw(a, b, c) != ccw(a, b, d)
}

/// Check whether segment `a`-`b` crosses a rectangle
///
/// Tests the four edges, plus containment so a segment lying fully inside
/// also counts.
pub fn segment_intersects_rect(a: Vec2, b: Vec2, rect: &Rect) -> bool {
    if rect.contains_point(a) || rect.contains_point(b) {
        return true;
    }
    let corners = rect.corners();
    (0..4).any(|i| segments_intersect(a, b, corners[i], corners[(i + 1) % 4]))
}

/// No obstacle crosses the segment `from`-`to`
pub fn has_line_of_sight(from: Vec2, to: Vec2, obstacles: &[Obstacle]) -> bool {
    !obstacles
        .iter()
        .any(|o| segment_intersects_rect(from, to, &o.rect))
}

/// Bounce an agent off one obstacle if its enclosing square overlaps it
///
/// The horizontal component flips when the centre is outside the obstacle's
/// horizontal span, the vertical one when outside the vertical span; a corner
/// hit flips both. Velocity is pointed away from the obstacle rather than
/// negated blindly, so a ball still overlapping on the next tick does not
/// flip back into it.
pub fn bounce_off_obstacle(agent: &mut Agent, rect: &Rect) -> bool {
    if !agent.bounds().overlaps(rect) {
        return false;
    }

    let c = agent.pos;
    if c.x < rect.left() {
        agent.vel.x = -agent.vel.x.abs();
    } else if c.x > rect.right() {
        agent.vel.x = agent.vel.x.abs();
    }
    if c.y < rect.top() {
        agent.vel.y = -agent.vel.y.abs();
    } else if c.y > rect.bottom() {
        agent.vel.y = agent.vel.y.abs();
    }
    true
}

/// Resolve every obstacle against a moving agent; returns the number hit
pub fn resolve_obstacles(agent: &mut Agent, obstacles: &[Obstacle]) -> usize {
    obstacles
        .iter()
        .filter(|o| bounce_off_obstacle(agent, &o.rect))
        .count()
}

/// Two agents overlap (centre distance below the sum of radii)
pub fn agents_touching(a: &Agent, b: &Agent) -> bool {
    a.pos.distance(b.pos) < a.radius + b.radius
}

/// An agent overlaps an uncollected pickup
pub fn agent_touches_pickup(agent: &Agent, pickup: &Pickup) -> bool {
    !pickup.is_collected() && agent.pos.distance(pickup.pos) < agent.radius + pickup.radius
}
