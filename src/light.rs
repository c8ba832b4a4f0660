use crate::phases::PhaseTable;
use crate::SignId;
use smallvec::SmallVec;
use std::cell::Cell;

/// A traffic light controller which cycles through the phases of a junction.
pub struct TrafficLight {
    /// The movements, one per sign.
    movements: Vec<Movement>,
    /// The movements which are active in each phase.
    phases: Vec<SmallVec<[usize; 8]>>,
    /// The conflicts between the movements.
    conflicts: Vec<Conflict>,
    /// The index of the current phase.
    phase: usize,
    /// The minimum time each movement of a phase is green, in s.
    green_time: f64,
}

/// The timing attributes of a traffic light.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficLightAttributes {
    /// The time every movement of a phase is green before the next phase starts, in s.
    pub green_time: f64,
    /// The duration of the amber phase in s.
    pub amber_time: f64,
    /// The time a conflicting movement must be red before a movement may turn green, in s.
    pub clearance_time: f64,
}

/// A single traffic light movement.
struct Movement {
    /// The sign controlled by the movement.
    sign: SignId,
    /// The current state.
    state: LightState,
    /// The next state.
    next_state: Cell<LightState>,
    /// Whether the target state is green.
    active: bool,
    /// The time since the current state was entered, in s.
    since: f64,
    /// The duration of the amber phase in s.
    amber_time: f64,
}

/// Represents one traffic light movement's conflict with another.
struct Conflict {
    /// The movement which is the subject of the conflict.
    subject: usize,
    /// The movement which conflicts with the subject.
    other: usize,
    /// The time in s that the conflicting movement must be red
    /// before the subject movement is allowed to turn green.
    wait: f64,
}

/// The state of a traffic light movement.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LightState {
    Red,
    Amber,
    Green,
}

impl TrafficLight {
    /// Creates a traffic light which cycles through the phases of the table in order,
    /// starting with the first.
    pub fn new(table: &PhaseTable, attribs: &TrafficLightAttributes) -> Self {
        let signs = table.signs();
        let index_of = |sign: &SignId| signs.iter().position(|s| s == sign).unwrap_or_default();

        let movements = signs
            .iter()
            .map(|sign| Movement {
                sign: *sign,
                state: LightState::Red,
                next_state: Cell::new(LightState::Red),
                active: false,
                since: attribs.clearance_time,
                amber_time: attribs.amber_time,
            })
            .collect();

        let phases = table
            .iter()
            .map(|phase| phase.signs().iter().map(|sign| index_of(sign)).collect())
            .collect();

        let mut conflicts = vec![];
        for (subject, a) in signs.iter().enumerate() {
            for (other, b) in signs.iter().enumerate() {
                if subject != other && !table.compatible(*a, *b) {
                    conflicts.push(Conflict {
                        subject,
                        other,
                        wait: attribs.clearance_time,
                    });
                }
            }
        }

        let mut light = Self {
            movements,
            phases,
            conflicts,
            phase: 0,
            green_time: attribs.green_time,
        };
        light.activate_phase(0);
        light
    }

    /// Advances the traffic light timing by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if self.phases.len() > 1 && self.phase_served() {
            self.activate_phase((self.phase + 1) % self.phases.len());
        }

        for (idx, movement) in self.movements.iter().enumerate() {
            use LightState::*;
            let next = match (movement.active, movement.state) {
                (false, Green) => Amber,
                (_, Amber) if movement.since >= movement.amber_time => Red,
                (true, Red) if self.can_turn_green(idx) => Green,
                (_, state) => state,
            };
            movement.next_state.set(next);
        }
        for movement in &mut self.movements {
            movement.step(dt);
        }
    }

    /// Gets the index of the current phase.
    pub fn current_phase(&self) -> usize {
        self.phase
    }

    /// Gets the state of each sign.
    pub fn get_states(&self) -> impl Iterator<Item = (SignId, LightState)> + '_ {
        self.movements.iter().map(|m| (m.sign, m.state))
    }

    /// Gets the state of the given sign, if the light controls it.
    pub fn get_state(&self, sign: SignId) -> Option<LightState> {
        self.movements
            .iter()
            .find(|m| m.sign == sign)
            .map(|m| m.state)
    }

    /// Makes the movements of the given phase the target of the light.
    fn activate_phase(&mut self, phase: usize) {
        self.phase = phase;
        for movement in &mut self.movements {
            movement.active = false;
        }
        if let Some(members) = self.phases.get(phase) {
            for idx in members {
                self.movements[*idx].active = true;
            }
        }
    }

    /// Checks whether every movement of the current phase has been green long enough.
    fn phase_served(&self) -> bool {
        self.phases[self.phase].iter().all(|idx| {
            let movement = &self.movements[*idx];
            movement.state == LightState::Green && movement.since >= self.green_time
        })
    }

    /// Checks that a movement is not blocked by any other movements.
    fn can_turn_green(&self, movement: usize) -> bool {
        self.conflicts
            .iter()
            .filter(|conflict| conflict.subject == movement)
            .all(|conflict| {
                let movement = &self.movements[conflict.other];
                movement.state == LightState::Red && movement.since >= conflict.wait
            })
    }
}

impl Movement {
    fn step(&mut self, dt: f64) {
        if self.next_state.get() != self.state {
            self.state = self.next_state.get();
            self.since = 0.0;
        } else {
            self.since += dt;
        }
    }
}
