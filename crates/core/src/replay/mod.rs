//! Tick-driven trace replay.
//!
//! The replayer is the only long-lived suspension point in the system: it
//! consumes one operation per step, mutates the live array, and signals the
//! host's renderer and tone collaborators. Cadence is owned by the driver,
//! which sleeps a fixed interval between steps.

use std::time::Duration;

use crate::config::ReplayConfig;
use crate::{ArrayState, Operation, Result, SortVizError, Trace};

/// Rendering collaborator. Implemented by the host (terminal bars, DOM,
/// test fakes); called once per step and once for the closing frame.
pub trait Renderer {
    fn render(&mut self, values: &[f32], highlight: Option<&Highlight>);
}

/// Audio collaborator. Tones are fire-and-forget; the replayer issues them
/// after the current step's mutation has been applied.
pub trait ToneSink {
    fn play_tone(&mut self, frequency_hz: f32);
}

/// The positions a frame should emphasise and how to colour them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub indices: Vec<usize>,
    pub kind: HighlightKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Compare,
    Swap,
    Overwrite,
}

impl HighlightKind {
    fn of(op: &Operation) -> Self {
        match op {
            Operation::Compare { .. } => HighlightKind::Compare,
            Operation::Swap { .. } => HighlightKind::Swap,
            Operation::Overwrite { .. } => HighlightKind::Overwrite,
        }
    }
}

/// Result of advancing a replay by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One operation was applied; more remain.
    Advanced,
    /// The trace is exhausted and the closing frame has been rendered.
    Finished,
    /// Nothing to do; no replay is active. Only reported by the session
    /// level, never by [`Replay::step`] itself.
    Idle,
}

/// Consumes a [`Trace`] one operation per step against live array state.
#[derive(Debug)]
pub struct Replay {
    trace: Trace,
    config: ReplayConfig,
    finished: bool,
}

impl Replay {
    /// Wraps a freshly produced trace for replay against an array of
    /// `live_len` elements.
    ///
    /// A trace recorded against a different length is foreign to this
    /// array; a trace that has already been popped from cannot be replayed
    /// (replay is a destructive left-to-right drain).
    pub fn new(trace: Trace, live_len: usize, config: ReplayConfig) -> Result<Self> {
        if trace.source_len() != live_len {
            return Err(SortVizError::ForeignTrace {
                expected: trace.source_len(),
                actual: live_len,
            });
        }
        if trace.consumed() > 0 {
            return Err(SortVizError::TraceDrained);
        }
        Ok(Self {
            trace,
            config,
            finished: false,
        })
    }

    /// Fixed interval the driver should wait between steps.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_ms)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Operations still waiting to be applied.
    pub fn remaining(&self) -> usize {
        self.trace.remaining()
    }

    /// Applies the next operation, renders the resulting frame, and emits
    /// one tone per distinct touched index.
    ///
    /// Once the trace runs out the step renders the closing unhighlighted
    /// frame and reports [`StepOutcome::Finished`]; stepping again is a
    /// [`SortVizError::TraceDrained`] error.
    pub fn step(
        &mut self,
        array: &mut ArrayState,
        renderer: &mut dyn Renderer,
        tones: &mut dyn ToneSink,
    ) -> Result<StepOutcome> {
        if self.finished {
            return Err(SortVizError::TraceDrained);
        }
        match self.trace.pop_front() {
            Some(op) => {
                op.apply(array.values_mut())?;
                let highlight = Highlight {
                    indices: op.touched(),
                    kind: HighlightKind::of(&op),
                };
                renderer.render(array.values(), Some(&highlight));
                for &index in &highlight.indices {
                    let value = array.values()[index];
                    tones.play_tone(self.frequency_for(value));
                }
                Ok(StepOutcome::Advanced)
            }
            None => {
                self.finished = true;
                renderer.render(array.values(), None);
                Ok(StepOutcome::Finished)
            }
        }
    }

    /// Drains the whole trace without pacing. The animated path steps once
    /// per tick instead.
    pub fn run_to_end(
        &mut self,
        array: &mut ArrayState,
        renderer: &mut dyn Renderer,
        tones: &mut dyn ToneSink,
    ) -> Result<()> {
        while self.step(array, renderer, tones)? == StepOutcome::Advanced {}
        Ok(())
    }

    fn frequency_for(&self, value: f32) -> f32 {
        self.config.tone_base_hz + value * self.config.tone_span_hz
    }
}
