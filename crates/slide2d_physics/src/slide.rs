//! Sweep-and-slide contact resolution
//!
//! [`SlideResolver::resolve`] moves a shape through one simulation step:
//! it sweeps along the current velocity, snaps to the first surface that
//! opposes the motion, nudges the velocity away from that surface and
//! sweeps again, until the travel budget is spent, the body stalls, or the
//! slide cap is reached.
//!
//! The resolver never integrates the unobstructed remainder of the step.
//! Callers move the body `distance_remaining` further along the returned
//! velocity themselves (see [`KinematicBody`](crate::KinematicBody)).

use crate::collision::SweepContact;
use crate::query::ShapeQuery;
use crate::shapes::Collider;
use slide2d_math::Vec2;

/// Default maximum number of slides per step
pub const DEFAULT_MAX_SLIDES: u32 = 10;

/// Default travel budget below which no further sweeps are made
pub const DEFAULT_MIN_DISTANCE: f32 = 0.002;

/// Default speed below which no further sweeps are made
pub const DEFAULT_MIN_SPEED: f32 = 0.001;

/// Thresholds that control when the resolver slides and when it stops
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideConfig {
    /// Anti-thrash cap; reaching it stops the body outright
    ///
    /// A cap of 0 is reached before the first sweep, so every step stops the body.
    pub max_slides: u32,
    /// Remaining distance at or below which the step is considered spent
    pub min_distance: f32,
    /// Speed at or below which the body is considered stalled
    pub min_speed: f32,
    /// A contact is effective when `dot(velocity_dir, normal)` is below this
    pub opposing_dot: f32,
    /// Final speeds below this are snapped to zero
    pub velocity_snap: f32,
    /// The result is vetoed when `dot(intent_dir, velocity_dir)` is below this
    pub backward_dot: f32,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            max_slides: DEFAULT_MAX_SLIDES,
            min_distance: DEFAULT_MIN_DISTANCE,
            min_speed: DEFAULT_MIN_SPEED,
            opposing_dot: -0.0001,
            velocity_snap: 0.0001,
            backward_dot: -0.0001,
        }
    }
}

/// Working state of one resolution, replaced after every slide
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionState {
    /// Travel budget left for this step, in length units
    pub distance_remaining: f32,
    pub velocity: Vec2,
    pub position: Vec2,
}

impl MotionState {
    /// Initial state: the budget is the distance `velocity` covers in `delta_time`
    pub fn new(delta_time: f32, velocity: Vec2, position: Vec2) -> Self {
        Self {
            distance_remaining: velocity.length() * delta_time,
            velocity,
            position,
        }
    }
}

/// Why a resolution stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The last sweep found nothing in the way
    Unobstructed,
    /// Every contact on the last sweep was parallel to or behind the motion
    Grazing,
    /// The travel budget ran out
    BudgetExhausted,
    /// The velocity shrank to (almost) nothing
    Stalled,
    /// The slide cap was reached; the body was stopped
    SlideCap,
    /// The resolved velocity pointed against the intended direction; the body was stopped
    BackwardIntent,
}

/// Outcome of one resolution step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideResult {
    /// Distance the body may still travel this step along `velocity`
    pub distance_remaining: f32,
    /// Velocity after sliding
    pub velocity: Vec2,
    /// Position of the last contact, or the initial position if nothing was hit
    pub position: Vec2,
    /// Number of slides performed
    pub slide_count: u32,
    pub stop_reason: StopReason,
}

/// Result of a single sweep iteration
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlideStep {
    /// An effective contact was applied
    Slid(MotionState),
    /// The sweep found no contacts
    Clear,
    /// The sweep only found contacts that do not oppose the motion
    Grazing,
}

/// First contact, in provider order, whose normal opposes `velocity`
///
/// Returns the contact together with its alignment `dot(normalize(velocity), normal)`.
pub fn find_effective_contact(
    velocity: Vec2,
    contacts: &[SweepContact],
    opposing_dot: f32,
) -> Option<(SweepContact, f32)> {
    let direction = velocity.normalized();
    contacts
        .iter()
        .map(|contact| (*contact, direction.dot(contact.normal)))
        .find(|(_, dot)| *dot < opposing_dot)
}

/// Push `velocity` off a surface
///
/// Adds the normal scaled by the current speed and by how directly the
/// motion opposed the surface. For an opposing contact (`dot < 0`) with a
/// unit normal this removes exactly the into-surface component.
pub fn redirect_velocity(velocity: Vec2, normal: Vec2, dot: f32) -> Vec2 {
    velocity + normal * velocity.length() * dot.abs()
}

/// Stateless sweep-and-slide resolver
#[derive(Clone, Copy, Debug, Default)]
pub struct SlideResolver {
    pub config: SlideConfig,
}

impl SlideResolver {
    pub fn new(config: SlideConfig) -> Self {
        Self { config }
    }

    /// Resolve one step of motion against the obstacles `query` can see
    ///
    /// `shape` is re-centered on the current position before every sweep, so
    /// only its extent matters. `intended_direction` need not be normalized;
    /// a zero intent disables the backward-intent veto.
    pub fn resolve<Q: ShapeQuery + ?Sized>(
        &self,
        delta_time: f32,
        initial_velocity: Vec2,
        initial_position: Vec2,
        intended_direction: Vec2,
        shape: &Collider,
        query: &Q,
    ) -> SlideResult {
        let config = &self.config;

        let delta_time = if delta_time.is_finite() && delta_time >= 0.0 {
            delta_time
        } else {
            log::warn!("Invalid delta time {}, resolving as a zero-length step", delta_time);
            0.0
        };
        let initial_velocity = if initial_velocity.is_finite() {
            initial_velocity
        } else {
            log::warn!("Non-finite velocity {:?}, treating body as stopped", initial_velocity);
            Vec2::ZERO
        };

        let mut state = MotionState::new(delta_time, initial_velocity, initial_position);
        let mut slide_count = 0;

        let mut stop_reason = loop {
            if slide_count >= config.max_slides {
                break StopReason::SlideCap;
            }
            if state.distance_remaining <= config.min_distance {
                break StopReason::BudgetExhausted;
            }
            if state.velocity.length() <= config.min_speed {
                break StopReason::Stalled;
            }

            match self.slide_once(state, delta_time, shape, query) {
                SlideStep::Slid(next) => {
                    slide_count += 1;
                    log::trace!(
                        "slide {}: position {:?}, velocity {:?} -> {:?}, remaining {:.4}",
                        slide_count,
                        next.position,
                        state.velocity,
                        next.velocity,
                        next.distance_remaining
                    );
                    state = next;
                }
                SlideStep::Clear => break StopReason::Unobstructed,
                SlideStep::Grazing => break StopReason::Grazing,
            }
        };

        if state.velocity.length() < config.velocity_snap {
            state.velocity = Vec2::ZERO;
        }
        if state.distance_remaining <= config.min_distance {
            state.distance_remaining = 0.0;
        }

        if slide_count == config.max_slides {
            log::debug!("Slide cap of {} reached, stopping body", config.max_slides);
            state.distance_remaining = 0.0;
            state.velocity = Vec2::ZERO;
            stop_reason = StopReason::SlideCap;
        }

        if intended_direction.normalized().dot(state.velocity.normalized()) < config.backward_dot {
            log::debug!(
                "Resolved velocity {:?} opposes intended direction {:?}, stopping body",
                state.velocity, intended_direction
            );
            state.velocity = Vec2::ZERO;
            state.distance_remaining = 0.0;
            stop_reason = StopReason::BackwardIntent;
        }

        SlideResult {
            distance_remaining: state.distance_remaining,
            velocity: state.velocity,
            position: state.position,
            slide_count,
            stop_reason,
        }
    }

    /// Perform one sweep from `state` and apply the effective contact, if any
    pub fn slide_once<Q: ShapeQuery + ?Sized>(
        &self,
        state: MotionState,
        delta_time: f32,
        shape: &Collider,
        query: &Q,
    ) -> SlideStep {
        let swept = shape.with_center(state.position);
        let contacts = query.sweep(&swept, state.velocity, state.distance_remaining);
        if contacts.is_empty() {
            return SlideStep::Clear;
        }

        let Some((contact, dot)) = find_effective_contact(state.velocity, &contacts, self.config.opposing_dot)
        else {
            return SlideStep::Grazing;
        };

        let old_speed_distance = state.velocity.length() * delta_time;
        let velocity = redirect_velocity(state.velocity, contact.normal, dot);
        let speed_loss = (old_speed_distance - velocity.length() * delta_time).abs();
        let distance_remaining = (state.distance_remaining - contact.travel_distance - speed_loss).max(0.0);

        SlideStep::Slid(MotionState {
            distance_remaining,
            velocity,
            position: contact.contact_point,
        })
    }
}

/// Resolve one step with the default thresholds
pub fn resolve<Q: ShapeQuery + ?Sized>(
    delta_time: f32,
    initial_velocity: Vec2,
    initial_position: Vec2,
    intended_direction: Vec2,
    shape: &Collider,
    query: &Q,
) -> SlideResult {
    SlideResolver::default().resolve(
        delta_time,
        initial_velocity,
        initial_position,
        intended_direction,
        shape,
        query,
    )
}
