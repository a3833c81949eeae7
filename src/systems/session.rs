//! Sculpting session system
//!
//! Runs one frame of the chisel tool:
//! - Queued input events, in arrival order
//! - PRISM filtering of the hand poses
//! - Voxel targeting and pointer visuals

use chisel_input::{
    ChiselController, ChiselEvent, EventBus, EventMask, HandPair, InputQueue, PointerPresenter,
};
use chisel_math::Vec3;
use chisel_physics::ColliderKey;
use chisel_volume::Cell;

use crate::config::AppConfig;
use crate::input::{InputMapper, RawInput};
use crate::scene::SculptScene;

/// Result of a session update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionResult {
    /// Filtered controller positions after this frame
    pub controllers: HandPair<Vec3>,
    /// Number of events dispatched before the tick
    pub events_handled: usize,
    /// Target after the tick (sentinel when none)
    pub target: Cell,
}

/// Owns the chisel controller and its input queue
pub struct SessionSystem {
    controller: ChiselController<ColliderKey>,
    queue: InputQueue,
    mapper: InputMapper,
}

impl SessionSystem {
    /// Create a session around an existing controller
    pub fn new(controller: ChiselController<ColliderKey>, mapper: InputMapper) -> Self {
        Self {
            controller,
            queue: InputQueue::new(),
            mapper,
        }
    }

    /// Create a session tuned from config
    ///
    /// `volume` is rotated by thumbstick input before the pointer touches anything.
    pub fn from_config(config: &AppConfig, hands: HandPair<Vec3>, volume: Option<ColliderKey>) -> Self {
        let mut controller = ChiselController::new(hands)
            .with_curve(config.prism.to_curve())
            .with_settings(config.to_settings())
            .with_back_cast_distance(config.targeting.back_cast_distance);
        if let Some(key) = volume {
            controller = controller.with_volume(key);
        }
        let mapper = InputMapper::new().with_dead_zone(config.input.thumbstick_dead_zone);
        Self::new(controller, mapper)
    }

    pub fn controller(&self) -> &ChiselController<ColliderKey> {
        &self.controller
    }

    /// Check whether the chisel tool is receiving events
    pub fn is_listening(&self) -> bool {
        self.queue.is_registered(EventMask::all())
    }

    /// Turn the tool on
    pub fn enable<P: PointerPresenter + ?Sized>(&mut self, hands: HandPair<Vec3>, presenter: &mut P) {
        self.controller.enable(hands, &mut self.queue, presenter);
    }

    /// Turn the tool off
    pub fn disable<P: PointerPresenter + ?Sized>(&mut self, hands: HandPair<Vec3>, presenter: &mut P) {
        self.controller.disable(hands, &mut self.queue, presenter);
    }

    /// Map and queue raw device input
    ///
    /// Returns true if an event was queued.
    pub fn push_raw(&mut self, input: RawInput) -> bool {
        match self.mapper.map(input) {
            Some(event) => self.queue.push(event),
            None => false,
        }
    }

    /// Queue an event directly
    pub fn push(&mut self, event: ChiselEvent) -> bool {
        self.queue.push(event)
    }

    /// Number of events waiting for the next update
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Run one frame: dispatch queued events, then tick
    pub fn update<P: PointerPresenter + ?Sized>(
        &mut self,
        hands: HandPair<Vec3>,
        scene: &mut SculptScene,
        presenter: &mut P,
    ) -> SessionResult {
        let events = self.queue.drain();
        let events_handled = events.len();
        for event in events {
            log::debug!("Dispatching {:?}", event);
            self.controller.handle(event, hands, scene, presenter);
        }

        let controllers = self.controller.tick(hands, &*scene, presenter);

        SessionResult {
            controllers,
            events_handled,
            target: self.controller.target_cell(),
        }
    }
}
