//! Physics substrate - resting-position simulation for free cards.
//!
//! The core's field model only says *which* slots feel the force and what
//! vector applies; integrating motion is the renderer's job. Free cards
//! accelerate along the field direction with drag, collide with the table
//! bounds, and push each other apart. Revealed and matched cards leave the
//! field and ease back to their home grid positions.

use tui_pairs_core::Intent;
use tui_pairs_types::Vec2;

/// Acceleration per unit of field direction, in cells/s^2.
const FIELD_ACCEL: f32 = 40.0;

/// Velocity retained per step.
const DRAG: f32 = 0.92;

/// Per-second easing rate toward home for non-free cards.
const HOME_EASE: f32 = 8.0;

/// Collision radius between free cards, in cells.
const CARD_RADIUS: f32 = 3.0;

/// Table region the cards may occupy, in cell coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy)]
struct CardBody {
    pos: Vec2,
    vel: Vec2,
    home: Vec2,
    free: bool,
}

/// Per-slot positions under the field force.
#[derive(Debug, Clone)]
pub struct FieldSubstrate {
    bodies: Vec<CardBody>,
    direction: Vec2,
    magnitude: f32,
    bounds: Bounds,
}

impl FieldSubstrate {
    /// Build a substrate with one body per slot at its home position.
    pub fn new(homes: Vec<Vec2>, bounds: Bounds) -> Self {
        let bodies = homes
            .into_iter()
            .map(|home| CardBody {
                pos: home,
                vel: Vec2::ZERO,
                home,
                free: false,
            })
            .collect();

        Self {
            bodies,
            direction: Vec2::ZERO,
            magnitude: 0.0,
            bounds,
        }
    }

    /// Consume one render intent; non-field intents are ignored here.
    pub fn apply_intent(&mut self, intent: &Intent) {
        match *intent {
            Intent::AdmitToField { slot } => {
                if let Some(body) = self.bodies.get_mut(slot) {
                    body.free = true;
                }
            }
            Intent::EvictFromField { slot } => {
                if let Some(body) = self.bodies.get_mut(slot) {
                    body.free = false;
                    body.vel = Vec2::ZERO;
                }
            }
            Intent::SetFieldDirection { direction } => self.direction = direction,
            Intent::SetFieldMagnitude { value } => self.magnitude = value,
            _ => {}
        }
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        for body in &mut self.bodies {
            if body.free {
                body.vel.x += self.direction.x * self.magnitude * FIELD_ACCEL * dt;
                body.vel.y += self.direction.y * self.magnitude * FIELD_ACCEL * dt;
                body.vel.x *= DRAG;
                body.vel.y *= DRAG;
                body.pos.x += body.vel.x * dt;
                body.pos.y += body.vel.y * dt;
            } else {
                // Ease back to the home grid position.
                let k = (HOME_EASE * dt).min(1.0);
                body.pos.x += (body.home.x - body.pos.x) * k;
                body.pos.y += (body.home.y - body.pos.y) * k;
                body.vel = Vec2::ZERO;
            }
        }

        self.separate_free_bodies();
        self.clamp_to_bounds();
    }

    /// Push overlapping free cards apart by half the overlap each.
    fn separate_free_bodies(&mut self) {
        let count = self.bodies.len();
        for i in 0..count {
            for j in (i + 1)..count {
                if !self.bodies[i].free || !self.bodies[j].free {
                    continue;
                }

                let dx = self.bodies[j].pos.x - self.bodies[i].pos.x;
                let dy = self.bodies[j].pos.y - self.bodies[i].pos.y;
                let dist_sq = dx * dx + dy * dy;
                let min_dist = CARD_RADIUS * 2.0;
                if dist_sq >= min_dist * min_dist {
                    continue;
                }

                let dist = dist_sq.sqrt();
                let (nx, ny) = if dist < 0.001 {
                    // Same position: push apart along x arbitrarily.
                    (1.0, 0.0)
                } else {
                    (dx / dist, dy / dist)
                };
                let push = (min_dist - dist) / 2.0;

                self.bodies[i].pos.x -= nx * push;
                self.bodies[i].pos.y -= ny * push;
                self.bodies[j].pos.x += nx * push;
                self.bodies[j].pos.y += ny * push;
            }
        }
    }

    fn clamp_to_bounds(&mut self) {
        for body in &mut self.bodies {
            if body.pos.x < 0.0 {
                body.pos.x = 0.0;
                body.vel.x = 0.0;
            }
            if body.pos.y < 0.0 {
                body.pos.y = 0.0;
                body.vel.y = 0.0;
            }
            if body.pos.x > self.bounds.width {
                body.pos.x = self.bounds.width;
                body.vel.x = 0.0;
            }
            if body.pos.y > self.bounds.height {
                body.pos.y = self.bounds.height;
                body.vel.y = 0.0;
            }
        }
    }

    pub fn position(&self, slot: usize) -> Option<Vec2> {
        self.bodies.get(slot).map(|b| b.pos)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
