/// Game economy engine: session context, intents, and the timer loop.
///
/// The presentation layer talks to [`Session`] only: it forwards player
/// intents (`register_click`, `purchase`), feeds elapsed ticks, and reads
/// snapshots back. All mutation happens here or deeper.

pub mod catalog;
pub mod events;
pub mod logic;
pub mod scheduler;
pub mod state;

#[cfg(test)]
mod simulator;

pub use catalog::{Difficulty, UpgradeKey};

use events::{ActiveEvent, EventKind};
use scheduler::{Scheduler, TaskKind};
use state::{EconomyState, EventBanner, Snapshot, BANNER_TICKS};

/// Ticks between passive-income grants (1 second at 10 ticks/sec).
const INCOME_PERIOD_TICKS: u64 = 10;

/// One game session: economy state plus every timer that drives it.
/// Dropping the session drops all pending timers with it.
pub struct Session {
    state: EconomyState,
    scheduler: Scheduler,
    next_event_id: u64,
}

impl Session {
    /// Start a session: build the shop at the difficulty's cost multiplier
    /// and arm the income timer, plus the first event roll iff the
    /// difficulty enables events.
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        let mut session = Self {
            state: EconomyState::new(difficulty, seed),
            scheduler: Scheduler::new(),
            next_event_id: 1,
        };
        session.scheduler.schedule_in(INCOME_PERIOD_TICKS, TaskKind::IncomeTick);
        if difficulty.settings().event_chance > 0.0 {
            let delay = session.next_roll_delay();
            session.scheduler.schedule_in(delay, TaskKind::EventRoll);
        }
        session
    }

    pub fn state(&self) -> &EconomyState {
        &self.state
    }

    /// Current engine tick, for countdown displays.
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Player intent: manual click.
    pub fn register_click(&mut self) {
        logic::click(&mut self.state);
    }

    /// Player intent: buy one unit. Unaffordable is a silent no-op.
    pub fn purchase(&mut self, key: UpgradeKey) -> bool {
        logic::purchase(&mut self.state, key)
    }

    /// Advance the session by `delta_ticks` discrete ticks.
    pub fn tick(&mut self, delta_ticks: u32) {
        for _ in 0..delta_ticks {
            self.step();
        }
    }

    fn step(&mut self) {
        let state = &mut self.state;
        state.anim_frame = state.anim_frame.wrapping_add(1);
        if state.click_flash > 0 {
            state.click_flash -= 1;
        }
        for p in &mut state.particles {
            p.life = p.life.saturating_sub(1);
        }
        state.particles.retain(|p| p.life > 0);
        if let Some(banner) = &mut state.banner {
            banner.ticks_left = banner.ticks_left.saturating_sub(1);
            if banner.ticks_left == 0 {
                state.banner = None;
            }
        }

        for task in self.scheduler.step() {
            match task.kind {
                TaskKind::IncomeTick => {
                    logic::grant_income(&mut self.state);
                    self.scheduler.schedule_in(INCOME_PERIOD_TICKS, TaskKind::IncomeTick);
                }
                TaskKind::EventRoll => {
                    if let Some(kind) = events::roll_event(&mut self.state) {
                        self.activate(kind);
                    }
                    let delay = self.next_roll_delay();
                    self.scheduler.schedule_in(delay, TaskKind::EventRoll);
                }
                TaskKind::EventRevert { event_id } => {
                    self.finish_event(event_id);
                }
            }
        }
    }

    /// Delay until the next event roll: uniform in [30s, 60s).
    fn next_roll_delay(&mut self) -> u64 {
        events::ROLL_MIN_TICKS + self.state.roll(events::ROLL_SPAN_TICKS)
    }

    /// Apply an event and publish its banner; duration-bound events also
    /// get an active record and a scheduled revert.
    fn activate(&mut self, kind: EventKind) {
        let victim = events::apply(&mut self.state, kind);
        self.state.banner = Some(EventBanner {
            title: kind.name(),
            desc: kind.desc(),
            adverse: kind.is_adverse(),
            ticks_left: BANNER_TICKS,
        });
        self.state.add_log(&format!("{} {}", kind.name(), kind.desc()), true);

        if let Some(duration) = kind.duration_ticks() {
            let id = self.next_event_id;
            self.next_event_id += 1;
            self.scheduler.schedule_in(duration, TaskKind::EventRevert { event_id: id });
            self.state.active_events.push(ActiveEvent {
                id,
                kind,
                expires_at: self.scheduler.now() + duration,
                victim,
            });
        }
    }

    fn finish_event(&mut self, event_id: u64) {
        let Some(pos) = self.state.active_events.iter().position(|e| e.id == event_id) else {
            return;
        };
        let active = self.state.active_events.remove(pos);
        events::revert(&mut self.state, active.kind, active.victim);
        self.state.add_log(&format!("{} has ended.", active.kind.name()), false);
    }
}
