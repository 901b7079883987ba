//! Player kinematics and the tether swing
//!
//! One call to [`step`] advances the player by a single tick. The order of the
//! sub-steps matters: the ground clamp looks ahead using the gravity-updated
//! velocity before anything is integrated, and damping applies to the final
//! velocity whether or not the player is tethered.

use super::state::{Attachment, Dot, DotId, Level, Player};
use super::tick::TickInput;
use crate::consts::GROUND_Y;
use crate::tuning::Tuning;
use crate::{Positioned, direction, distance, wrap_angle_delta};

/// Advance the player by one tick.
///
/// Returns the dot whose tether snapped this tick, if any. A snap clears the
/// attachment without the ejection impulse of [`detach`].
pub fn step(player: &mut Player, level: &Level, input: &TickInput, t: &Tuning) -> Option<DotId> {
    // Horizontal input is live in the air and on the tether too
    if input.left && player.vel.x > -t.max_speed {
        player.vel.x -= t.acc;
    }
    if input.right && player.vel.x < t.max_speed {
        player.vel.x += t.acc;
    }

    player.vel.y += t.gravity;

    if player.pos.y + player.vel.y > GROUND_Y {
        player.pos.y = GROUND_Y;
        player.vel.y = 0.0;
        player.on_ground = true;
    }

    if player.on_ground && !input.left && !input.right {
        player.vel.x *= t.ground_friction;
    }

    let snapped = break_overstretched(player, level, t);

    if let Some(attachment) = player.attachment
        && let Some(dot) = level.dot(attachment.dot)
    {
        player.attachment = Some(swing(player, attachment, dot, input, t));
    }

    player.vel *= t.damping;
    player.pos += player.vel;

    snapped
}

/// Clear a tether that is longer than `attach_length` (or whose dot is gone)
fn break_overstretched(player: &mut Player, level: &Level, t: &Tuning) -> Option<DotId> {
    let attachment = player.attachment?;
    let intact = level
        .dot(attachment.dot)
        .is_some_and(|dot| distance(player, dot) <= t.attach_length);
    if intact {
        return None;
    }

    player.attachment = None;
    log::debug!("Tether to dot {} snapped", attachment.dot.0);
    Some(attachment.dot)
}

/// Spring force, climb/descend input and boost bookkeeping for one tick
fn swing(
    player: &mut Player,
    mut attachment: Attachment,
    dot: &Dot,
    input: &TickInput,
    t: &Tuning,
) -> Attachment {
    let stretch = distance(player, dot) - t.attach_rest_length;
    player.vel -= (player.pos - dot.pos()) * t.spring_constant * stretch;

    if input.up && player.vel.y > -t.max_speed {
        player.vel.y -= t.acc;
    }
    if input.down && player.vel.y < t.max_speed {
        player.vel.y += t.acc;
    }

    let new_direction = direction(player, dot);
    let delta = wrap_angle_delta(attachment.last_direction - new_direction);
    attachment.boost = accumulate_boost(attachment.boost, delta, t);
    attachment.last_direction = new_direction;
    attachment
}

/// Add a swing delta to the boost, clamp it, then decay it
#[inline]
pub fn accumulate_boost(boost: f32, delta: f32, t: &Tuning) -> f32 {
    (boost + delta * t.boost_coefficient).clamp(-t.boost_limit, t.boost_limit) * t.boost_decay
}

/// Tether the player to `dot` with no stored boost
pub fn attach(player: &mut Player, id: DotId, dot: &Dot) {
    player.attachment = Some(Attachment {
        dot: id,
        boost: 0.0,
        last_direction: direction(player, dot),
    });
    log::debug!("Attached to dot {}", id.0);
}

/// Attach to the nearest dot if it is strictly closer than `attach_length`
pub fn attach_nearest(player: &mut Player, level: &Level, t: &Tuning) -> Option<DotId> {
    let id = level.nearest_dot(player.pos)?;
    let dot = level.dot(id)?;
    if distance(player, dot) < t.attach_length {
        attach(player, id, dot);
        Some(id)
    } else {
        None
    }
}

/// Player-triggered release: scales velocity by the stored boost.
///
/// Returns the released attachment, or `None` if the player was free.
pub fn detach(player: &mut Player, t: &Tuning) -> Option<Attachment> {
    let attachment = player.attachment.take()?;
    player.vel *= attachment.boost.abs() * t.ejection_coefficient;
    log::debug!(
        "Released dot {} with boost {:.1}",
        attachment.dot.0,
        attachment.boost
    );
    Some(attachment)
}

/// Jump if standing on the ground
pub fn jump(player: &mut Player, t: &Tuning) -> bool {
    if !player.on_ground {
        return false;
    }
    player.vel.y = -t.jump_speed;
    player.on_ground = false;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelSpec;
    use glam::Vec2;
    use proptest::prelude::*;

    fn level_with_dot(pos: Vec2) -> Level {
        Level::from_spec(
            0,
            &LevelSpec {
                dots: vec![pos],
                ..Default::default()
            },
        )
    }

    fn airborne(pos: Vec2, vel: Vec2) -> Player {
        Player {
            pos,
            vel,
            on_ground: false,
            attachment: None,
        }
    }

    #[test]
    fn test_horizontal_input_respects_cap() {
        let t = Tuning::default();
        let level = Level::default();
        let mut p = airborne(Vec2::new(0.0, -1000.0), Vec2::new(t.max_speed, 0.0));
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        step(&mut p, &level, &input, &t);
        // At the cap no acceleration is added, only damping
        assert_eq!(p.vel.x, t.max_speed * t.damping);
    }

    #[test]
    fn test_ground_friction_only_without_input() {
        let t = Tuning::default();
        let level = Level::default();
        let mut p = Player {
            vel: Vec2::new(4.0, 0.0),
            ..Default::default()
        };
        step(&mut p, &level, &TickInput::default(), &t);
        assert_eq!(p.vel.x, 4.0 * t.ground_friction * t.damping);
        assert_eq!(p.pos.y, 0.0);
        assert!(p.on_ground);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let t = Tuning::default();
        let mut p = Player::default();
        assert!(jump(&mut p, &t));
        assert_eq!(p.vel.y, -t.jump_speed);
        assert!(!p.on_ground);
        assert!(!jump(&mut p, &t));
    }

    #[test]
    fn test_attach_nearest_requires_range() {
        let t = Tuning::default();
        let level = level_with_dot(Vec2::new(100.0, 0.0));

        let mut near = airborne(Vec2::new(0.0, -50.0), Vec2::ZERO);
        assert_eq!(attach_nearest(&mut near, &level, &t), Some(DotId(0)));
        let a = near.attachment.unwrap();
        assert_eq!(a.boost, 0.0);
        assert!((a.last_direction - (-50.0f32).atan2(-100.0)).abs() < 1e-6);

        let mut far = airborne(Vec2::new(400.0, 0.0), Vec2::ZERO);
        assert_eq!(attach_nearest(&mut far, &level, &t), None);
        assert!(!far.is_attached());
    }

    #[test]
    fn test_spring_pulls_toward_rest_length() {
        let t = Tuning::default();
        let level = level_with_dot(Vec2::new(0.0, -500.0));
        // 150 units right of the dot: stretched past rest length
        let mut p = airborne(Vec2::new(150.0, -500.0), Vec2::ZERO);
        attach(&mut p, DotId(0), &level.dots[0]);
        step(&mut p, &level, &TickInput::default(), &t);
        assert!(p.vel.x < 0.0);
        assert!(p.is_attached());
    }

    #[test]
    fn test_vertical_input_only_while_attached() {
        let t = Tuning::default();
        let level = level_with_dot(Vec2::new(0.0, -500.0));
        let up = TickInput {
            up: true,
            ..Default::default()
        };

        let mut free = airborne(Vec2::new(0.0, -400.0), Vec2::ZERO);
        step(&mut free, &level, &up, &t);
        assert_eq!(free.vel.y, t.gravity * t.damping);

        // At rest length straight below the dot the spring is silent
        let mut tethered = airborne(Vec2::new(0.0, -500.0 + t.attach_rest_length), Vec2::ZERO);
        attach(&mut tethered, DotId(0), &level.dots[0]);
        step(&mut tethered, &level, &up, &t);
        assert!(tethered.vel.y < 0.0);
    }

    #[test]
    fn test_sustained_swing_builds_boost() {
        let t = Tuning::default();
        let mut boost = 0.0;
        for _ in 0..50 {
            boost = accumulate_boost(boost, 0.1, &t);
        }
        let mut wobble = 0.0;
        for i in 0..50 {
            let d = if i % 2 == 0 { 0.1 } else { -0.1 };
            wobble = accumulate_boost(wobble, d, &t);
        }
        assert!(boost > 10.0);
        assert!(wobble.abs() < 1.0);
    }

    #[test]
    fn test_auto_break_applies_no_impulse() {
        let t = Tuning::default();
        let level = level_with_dot(Vec2::new(0.0, -500.0));
        let start = airborne(Vec2::new(250.0, -500.0), Vec2::new(3.0, -2.0));

        let mut tethered = start.clone();
        tethered.attachment = Some(Attachment {
            dot: DotId(0),
            boost: 80.0,
            last_direction: 0.0,
        });
        let snapped = step(&mut tethered, &level, &TickInput::default(), &t);
        assert_eq!(snapped, Some(DotId(0)));
        assert!(!tethered.is_attached());

        let mut free = start;
        step(&mut free, &level, &TickInput::default(), &t);
        assert_eq!(tethered.vel, free.vel);
        assert_eq!(tethered.pos, free.pos);
    }

    #[test]
    fn test_explicit_detach_applies_impulse() {
        let t = Tuning::default();
        let mut p = airborne(Vec2::new(10.0, -100.0), Vec2::new(3.0, -2.0));
        p.attachment = Some(Attachment {
            dot: DotId(0),
            boost: -40.0,
            last_direction: 1.0,
        });
        let released = detach(&mut p, &t).unwrap();
        assert_eq!(released.boost, -40.0);
        assert!(!p.is_attached());
        assert!((p.vel.x - 12.0).abs() < 1e-5);
        assert!((p.vel.y + 8.0).abs() < 1e-5);
        assert!(detach(&mut p, &t).is_none());
    }

    #[test]
    fn test_missing_dot_breaks_tether() {
        let t = Tuning::default();
        let mut p = airborne(Vec2::new(0.0, -100.0), Vec2::ZERO);
        p.attachment = Some(Attachment {
            dot: DotId(3),
            boost: 0.0,
            last_direction: 0.0,
        });
        let snapped = step(&mut p, &Level::default(), &TickInput::default(), &t);
        assert_eq!(snapped, Some(DotId(3)));
        assert!(!p.is_attached());
    }

    proptest! {
        #[test]
        fn prop_gravity_before_damping(vx in -20.0f32..20.0, vy in -50.0f32..50.0) {
            let t = Tuning::default();
            let mut p = airborne(Vec2::new(0.0, -10_000.0), Vec2::new(vx, vy));
            step(&mut p, &Level::default(), &TickInput::default(), &t);
            prop_assert_eq!(p.vel.y, (vy + t.gravity) * t.damping);
            prop_assert!(!p.on_ground);
        }

        #[test]
        fn prop_ground_clamp(y in -100.0f32..=0.0, vy in -20.0f32..20.0, vx in -10.0f32..10.0) {
            let t = Tuning::default();
            let mut p = airborne(Vec2::new(0.0, y), Vec2::new(vx, vy));
            let lands = y + (vy + t.gravity) > GROUND_Y;
            step(&mut p, &Level::default(), &TickInput::default(), &t);
            if lands {
                prop_assert_eq!(p.pos.y, 0.0);
                prop_assert_eq!(p.vel.y, 0.0);
                prop_assert!(p.on_ground);
            }
        }

        #[test]
        fn prop_boost_stays_bounded(deltas in proptest::collection::vec(-6.3f32..6.3, 1..300)) {
            let t = Tuning::default();
            let mut boost = 0.0;
            for d in deltas {
                boost = accumulate_boost(boost, wrap_angle_delta(d), &t);
                prop_assert!(boost.abs() <= t.boost_limit);
            }
        }

        #[test]
        fn prop_detach_scales_velocity(
            vx in -30.0f32..30.0,
            vy in -30.0f32..30.0,
            boost in -100.0f32..=100.0,
        ) {
            let t = Tuning::default();
            let mut p = airborne(Vec2::new(0.0, -100.0), Vec2::new(vx, vy));
            p.attachment = Some(Attachment { dot: DotId(0), boost, last_direction: 0.0 });
            detach(&mut p, &t);
            let scale = boost.abs() * t.ejection_coefficient;
            prop_assert_eq!(p.vel, Vec2::new(vx, vy) * scale);
        }
    }
}
