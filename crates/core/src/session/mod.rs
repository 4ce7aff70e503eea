use crate::config::AppConfig;
use crate::replay::{Renderer, Replay, StepOutcome, ToneSink};
use crate::{Algorithm, ArrayState, Result, SortVizError};

/// One visualisation session: the live array, the active algorithm, and at
/// most one in-flight replay.
///
/// This is the control surface a host UI binds its buttons to. All state
/// lives here explicitly; single-threaded, cooperative, no locks.
#[derive(Debug)]
pub struct VisualizerSession {
    config: AppConfig,
    array: ArrayState,
    algorithm: Algorithm,
    replay: Option<Replay>,
}

impl VisualizerSession {
    /// Starts a session with a freshly randomised array of the configured
    /// length and quicksort selected.
    pub fn new(config: AppConfig) -> Self {
        let array = ArrayState::random(config.array.length);
        Self {
            config,
            array,
            algorithm: Algorithm::Quick,
            replay: None,
        }
    }

    /// Replaces the live array with a fresh random one and renders it
    /// unhighlighted. Cancels any in-flight replay, since the array it was
    /// mutating is gone.
    pub fn initialize(&mut self, renderer: &mut dyn Renderer) {
        self.replay = None;
        self.array = ArrayState::random(self.config.array.length);
        renderer.render(self.array.values(), None);
    }

    /// Switches the active algorithm and reinitialises the array.
    ///
    /// Unrecognised names are a reported [`SortVizError::UnknownAlgorithm`];
    /// the session is left untouched in that case.
    pub fn select_algorithm(&mut self, name: &str, renderer: &mut dyn Renderer) -> Result<()> {
        self.algorithm = name.parse::<Algorithm>()?;
        self.initialize(renderer);
        Ok(())
    }

    /// Runs the active engine over a copy of the live array and installs the
    /// resulting trace as the in-flight replay.
    ///
    /// Rejected while a replay is active; `initialize` is the way to cancel
    /// a running animation.
    pub fn play(&mut self) -> Result<()> {
        if self.replay.is_some() {
            return Err(SortVizError::ReplayInProgress);
        }
        let trace = self.algorithm.sort(self.array.values())?;
        self.replay = Some(Replay::new(
            trace,
            self.array.len(),
            self.config.replay.clone(),
        )?);
        Ok(())
    }

    /// Advances the in-flight replay by one operation. Reports
    /// [`StepOutcome::Idle`] when nothing is playing and frees the replay
    /// slot once the closing frame has been rendered.
    pub fn step(
        &mut self,
        renderer: &mut dyn Renderer,
        tones: &mut dyn ToneSink,
    ) -> Result<StepOutcome> {
        let Some(replay) = self.replay.as_mut() else {
            return Ok(StepOutcome::Idle);
        };
        let outcome = replay.step(&mut self.array, renderer, tones)?;
        if outcome == StepOutcome::Finished {
            self.replay = None;
        }
        Ok(outcome)
    }

    pub fn values(&self) -> &[f32] {
        self.array.values()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn is_replaying(&self) -> bool {
        self.replay.is_some()
    }

    /// Fixed step interval for the driver loop, from the session config.
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.config.replay.tick_ms)
    }
}

impl Default for VisualizerSession {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::Highlight;

    #[derive(Default)]
    struct NullRenderer {
        frames: usize,
        last_highlighted: bool,
    }

    impl Renderer for NullRenderer {
        fn render(&mut self, _values: &[f32], highlight: Option<&Highlight>) {
            self.frames += 1;
            self.last_highlighted = highlight.is_some();
        }
    }

    #[derive(Default)]
    struct NullTones;

    impl ToneSink for NullTones {
        fn play_tone(&mut self, _frequency_hz: f32) {}
    }

    fn small_session() -> VisualizerSession {
        let mut config = AppConfig::default();
        config.array.length = 8;
        VisualizerSession::new(config)
    }

    fn drain(session: &mut VisualizerSession) {
        let mut renderer = NullRenderer::default();
        let mut tones = NullTones;
        while session.step(&mut renderer, &mut tones).unwrap() != StepOutcome::Idle {
            if !session.is_replaying() {
                break;
            }
        }
    }

    #[test]
    fn new_session_starts_with_quick_and_configured_length() {
        let session = small_session();
        assert_eq!(session.algorithm(), Algorithm::Quick);
        assert_eq!(session.values().len(), 8);
        assert!(!session.is_replaying());
    }

    #[test]
    fn initialize_renders_an_unhighlighted_frame() {
        let mut session = small_session();
        let mut renderer = NullRenderer::default();
        session.initialize(&mut renderer);
        assert_eq!(renderer.frames, 1);
        assert!(!renderer.last_highlighted);
    }

    #[test]
    fn play_then_stepping_sorts_the_live_array() {
        let mut session = small_session();
        session.play().unwrap();
        assert!(session.is_replaying());
        drain(&mut session);
        assert!(!session.is_replaying());
        let values = session.values();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn play_during_replay_is_rejected() {
        let mut session = small_session();
        session.play().unwrap();
        let err = session.play().unwrap_err();
        assert!(matches!(err, SortVizError::ReplayInProgress));
    }

    #[test]
    fn play_is_available_again_after_the_replay_finishes() {
        let mut session = small_session();
        session.play().unwrap();
        drain(&mut session);
        session.play().unwrap();
    }

    #[test]
    fn initialize_cancels_an_active_replay() {
        let mut session = small_session();
        let mut renderer = NullRenderer::default();
        session.play().unwrap();
        session.initialize(&mut renderer);
        assert!(!session.is_replaying());
        session.play().unwrap();
    }

    #[test]
    fn select_algorithm_switches_and_reinitialises() {
        let mut session = small_session();
        let mut renderer = NullRenderer::default();

        session.play().unwrap();
        drain(&mut session);
        let sorted = session.values().to_vec();

        session.select_algorithm("merge", &mut renderer).unwrap();
        assert_eq!(session.algorithm(), Algorithm::Merge);
        assert_eq!(session.values().len(), sorted.len());
        // A fresh random draw, not the previous run's sorted result.
        assert_ne!(session.values(), sorted.as_slice());
    }

    #[test]
    fn select_algorithm_rejects_unknown_names() {
        let mut session = small_session();
        let mut renderer = NullRenderer::default();
        let before = session.values().to_vec();

        let err = session.select_algorithm("stooge", &mut renderer).unwrap_err();
        assert!(matches!(err, SortVizError::UnknownAlgorithm(_)));
        assert_eq!(session.algorithm(), Algorithm::Quick);
        assert_eq!(session.values(), before.as_slice());
    }

    #[test]
    fn step_without_a_replay_is_idle() {
        let mut session = small_session();
        let mut renderer = NullRenderer::default();
        let mut tones = NullTones;
        let outcome = session.step(&mut renderer, &mut tones).unwrap();
        assert_eq!(outcome, StepOutcome::Idle);
    }
}
