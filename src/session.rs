use crate::scramble::{self, ScrambleSequence};
use crate::time_log::TimeLog;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

/// Phase of the hold-and-release gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Waiting; holding the key arms the timer.
    Idle,
    /// Key held down; releasing it starts the solve.
    Armed,
    /// Solving; pressing the key again stops and records.
    Running,
}

/// What a key event did to the session, so the caller can react (start or
/// cancel display ticks, persist the log, journal the solve).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Event was a no-op: out of order, duplicate, or auto-repeat.
    Ignored,
    /// Idle -> Armed.
    Armed,
    /// Armed -> Running; the epoch was captured.
    Started,
    /// Running -> Idle; carries the recorded duration in milliseconds.
    Completed(u64),
}

/// One timing session: the state machine, the recorded log, and the current
/// scramble, with a seeded RNG for scramble regeneration. All state is owned
/// here; nothing is ambient.
#[derive(Debug)]
pub struct Session {
    pub log: TimeLog,
    pub scramble: ScrambleSequence,
    state: TimerState,
    held: bool,
    epoch: Option<Instant>,
    elapsed_ms: u64,
    rng: StdRng,
}

impl Session {
    pub fn new(log: TimeLog) -> Self {
        Self::with_rng(log, StdRng::from_entropy())
    }

    /// Deterministic construction for tests.
    pub fn with_rng(log: TimeLog, mut rng: StdRng) -> Self {
        let scramble = scramble::generate(&mut rng);
        Self {
            log,
            scramble,
            state: TimerState::Idle,
            held: false,
            epoch: None,
            elapsed_ms: 0,
            rng,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Elapsed time currently on display, in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// The key went from released to pressed. Repeated notifications while
    /// the key stays down (terminal auto-repeat) are debounced by the held
    /// flag so exactly one transition fires per physical press.
    pub fn on_hold_start(&mut self, now: Instant) -> Transition {
        if self.held {
            return Transition::Ignored;
        }
        self.held = true;

        match self.state {
            TimerState::Idle => {
                self.elapsed_ms = 0;
                self.state = TimerState::Armed;
                Transition::Armed
            }
            // A press while Armed means we missed a release; stay put and
            // let the next release start the solve.
            TimerState::Armed => Transition::Ignored,
            TimerState::Running => {
                let duration = self.stop(now);
                Transition::Completed(duration)
            }
        }
    }

    /// The key went from pressed to released.
    pub fn on_hold_end(&mut self, now: Instant) -> Transition {
        self.held = false;

        match self.state {
            TimerState::Armed => {
                self.epoch = Some(now);
                self.state = TimerState::Running;
                Transition::Started
            }
            // A release while Idle or Running is out of order; ignore it.
            TimerState::Idle | TimerState::Running => Transition::Ignored,
        }
    }

    /// Refresh the displayed elapsed time. Display feedback only; the
    /// recorded duration is always recomputed at the stop instant so the
    /// tick cadence never quantizes it.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        match (self.state, self.epoch) {
            (TimerState::Running, Some(epoch)) => {
                self.elapsed_ms = now.duration_since(epoch).as_millis() as u64;
                true
            }
            _ => false,
        }
    }

    /// Replace the displayed scramble without touching the timer.
    pub fn new_scramble(&mut self) {
        self.scramble = scramble::generate(&mut self.rng);
    }

    fn stop(&mut self, now: Instant) -> u64 {
        let duration = self
            .epoch
            .take()
            .map(|epoch| now.duration_since(epoch).as_millis() as u64)
            .unwrap_or(0);

        self.elapsed_ms = duration;
        self.log.append(duration);
        self.new_scramble();
        self.state = TimerState::Idle;

        duration
    }
}
