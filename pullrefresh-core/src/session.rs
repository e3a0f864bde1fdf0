//! Gesture session: the engine behind the "no new gesture while loading" guard

use std::rc::Rc;

use futures::channel::mpsc::UnboundedReceiver;

use crate::classes::Stage;
use crate::engine::{GestureEngine, GestureEvent, GestureState};

pub struct GestureSession {
    engine: Box<dyn GestureEngine>,
    events: UnboundedReceiver<GestureEvent>,
    stage: Rc<Stage>,
}

impl GestureSession {
    pub fn new(mut engine: Box<dyn GestureEngine>, stage: Rc<Stage>) -> Self {
        engine.reset();
        let events = engine.subscribe();

        Self {
            engine,
            events,
            stage,
        }
    }

    /// Discard any in-progress gesture. Not guarded: a start event always resets.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn begin(&mut self, y: f64) {
        if self.stage.is_loading() {
            return;
        }
        self.engine.begin(y);
    }

    /// Returns whether the caller should stop the event from propagating
    pub fn move_to(&mut self, y: f64) -> bool {
        if self.stage.is_loading() {
            return false;
        }
        self.engine.move_to(y)
    }

    /// Returns whether the caller should suppress the default action
    pub fn end(&mut self) -> bool {
        if self.stage.is_loading() {
            return false;
        }
        self.engine.end()
    }

    pub fn state(&self) -> GestureState {
        self.engine.state()
    }

    /// Events the engine published since the last call
    pub fn take_events(&mut self) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.events.try_next() {
            events.push(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::Phase;
    use crate::engine::ResistanceEngine;
    use crate::event::InputEvent;
    use crate::host::RootElement;

    struct NullRoot;

    impl RootElement for NullRoot {
        fn set_class(&self, _name: &'static str, _present: bool) {}
        fn add_listener(&self, _name: &'static str, _handler: Box<dyn FnMut(&dyn InputEvent)>) {}
        fn once(&self, _name: &'static str, _handler: Box<dyn FnOnce()>) {}
    }

    fn session() -> (GestureSession, Rc<Stage>) {
        let stage = Rc::new(Stage::new(Rc::new(NullRoot)));
        let engine = Box::new(ResistanceEngine::new(70.0, 2.5));
        (GestureSession::new(engine, stage.clone()), stage)
    }

    #[test]
    fn test_tracks_gesture_when_idle() {
        let (mut session, _stage) = session();
        session.begin(0.0);
        assert!(session.move_to(100.0));
        assert_eq!(session.state().distance, 40.0);
        assert!(session.end());
        assert_eq!(session.take_events().len(), 2);
    }

    #[test]
    fn test_guard_blocks_while_loading() {
        let (mut session, stage) = session();
        stage.transition(Phase::Loading, |_| {});

        session.reset();
        session.begin(0.0);
        assert!(!session.move_to(100.0));
        assert!(!session.end());
        assert_eq!(session.state(), GestureState::default());
        assert!(session.take_events().is_empty());
    }
}
