//! Chisel tool controller
//!
//! Per tick:
//! 1. PRISM-filter both hand positions into controller positions
//! 2. Target the nearest filled voxel along the primary -> secondary ray
//! 3. Update the pointer line and cursor
//!
//! Events (chisel, rotate, reset) run between ticks and to completion.

use std::fmt::Debug;

use chisel_math::Vec3;
use chisel_volume::{Cell, Volume};

use crate::events::{ChiselEvent, EventBus, EventMask};
use crate::motion_scaler::{HandPair, MotionScaler, MotionState, PrismCurve};
use crate::presenter::{PointerMaterial, PointerPresenter};
use crate::targeter::{RaycastScene, VoxelTargeter};

/// Edit and rotation tuning
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChiselSettings {
    /// Density removed per chisel stroke
    pub decrement: f32,
    /// Density never goes below this
    pub density_floor: f32,
    /// Degrees of volume rotation per unit of thumbstick x
    pub rotate_speed: f32,
}

impl Default for ChiselSettings {
    fn default() -> Self {
        Self {
            decrement: 0.1,
            density_floor: 0.0,
            rotate_speed: 4.0,
        }
    }
}

/// Result of one chisel stroke
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChiselStroke {
    pub cell: Cell,
    pub before: f32,
    pub after: f32,
}

/// Everything the chisel tool keeps between ticks
pub struct ChiselController<K> {
    scaler: MotionScaler,
    motion: MotionState,
    targeter: VoxelTargeter<K>,
    settings: ChiselSettings,
    controllers: HandPair<Vec3>,
    enabled: bool,
}

impl<K: Copy + PartialEq + Debug> ChiselController<K> {
    /// Create a disabled controller with both controllers on the hands
    pub fn new(hands: HandPair<Vec3>) -> Self {
        Self {
            scaler: MotionScaler::default(),
            motion: MotionState::anchored(hands),
            targeter: VoxelTargeter::new(),
            settings: ChiselSettings::default(),
            controllers: hands,
            enabled: false,
        }
    }

    /// Builder: set the PRISM curve
    pub fn with_curve(mut self, curve: PrismCurve) -> Self {
        self.scaler = MotionScaler::new(curve);
        self
    }

    /// Builder: set edit and rotation tuning
    pub fn with_settings(mut self, settings: ChiselSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builder: set the backward-cast distance
    pub fn with_back_cast_distance(mut self, distance: f32) -> Self {
        self.targeter = self.targeter.with_back_cast_distance(distance);
        self
    }

    /// Builder: rotate this volume before the pointer has touched anything
    pub fn with_volume(mut self, key: K) -> Self {
        self.targeter = self.targeter.with_volume(key);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn settings(&self) -> &ChiselSettings {
        &self.settings
    }

    /// Filtered controller positions from the last tick or reset
    pub fn controllers(&self) -> HandPair<Vec3> {
        self.controllers
    }

    pub fn motion_state(&self) -> &MotionState {
        &self.motion
    }

    /// Current target (sentinel when none)
    pub fn target_cell(&self) -> Cell {
        self.targeter.target_cell()
    }

    pub fn active_volume(&self) -> Option<K> {
        self.targeter.active_volume()
    }

    /// Run one frame: PRISM, then targeting, then visuals
    ///
    /// Returns the new controller positions. While disabled nothing moves.
    pub fn tick<S, P>(&mut self, hands: HandPair<Vec3>, scene: &S, presenter: &mut P) -> HandPair<Vec3>
    where
        S: RaycastScene<Key = K>,
        P: PointerPresenter + ?Sized,
    {
        if !self.enabled {
            return self.controllers;
        }

        self.controllers = self.scaler.step(&mut self.motion, hands);
        let HandPair { primary, secondary } = self.controllers;

        let previous = self.targeter.target_cell();
        let outcome = self.targeter.update(primary, secondary, scene);

        let line_end = outcome.cursor.or(outcome.forward_hit).unwrap_or(secondary);
        presenter.set_pointer_line(primary, line_end);

        match outcome.cursor {
            Some(position) => {
                presenter.set_pointer_material(PointerMaterial::LockedOn);
                presenter.set_cursor_position(position);
                presenter.set_cursor_visible(true);
            }
            None => {
                presenter.set_pointer_material(PointerMaterial::Seeking);
                presenter.set_cursor_visible(false);
            }
        }

        if outcome.cell != previous {
            match outcome.cell.target() {
                Some(cell) => log::debug!("Targeting cell {} in {:?}", cell, outcome.volume),
                None => log::debug!("Target lost"),
            }
        }

        self.controllers
    }

    /// Remove clay from the targeted cell
    ///
    /// No-op without a target. The target is always cleared afterwards so the
    /// next tick re-targets against the edited field.
    pub fn chisel<S, P>(&mut self, scene: &mut S, presenter: &mut P) -> Option<ChiselStroke>
    where
        S: RaycastScene<Key = K>,
        P: PointerPresenter + ?Sized,
    {
        let cell = self.targeter.target_cell().target()?;

        let volume = self
            .targeter
            .active_volume()
            .and_then(|key| scene.volume_mut(key));
        let Some(volume) = volume else {
            log::warn!("Chisel target {} has no volume; dropping it", cell);
            self.targeter.clear_target();
            presenter.set_cursor_visible(false);
            return None;
        };

        let before = volume.get_cell(cell);
        let after = (before - self.settings.decrement).max(self.settings.density_floor);
        volume.set_cell(cell, after);

        self.targeter.clear_target();
        presenter.set_cursor_visible(false);

        log::debug!("Chiseled cell {}: {:.3} -> {:.3}", cell, before, after);
        Some(ChiselStroke { cell, before, after })
    }

    /// Spin the active volume by thumbstick x
    ///
    /// Returns the new angle in degrees, or None if no volume is known.
    /// The angle is not wrapped.
    pub fn rotate<S>(&mut self, x: f32, scene: &mut S) -> Option<f32>
    where
        S: RaycastScene<Key = K>,
    {
        let key = self.targeter.active_volume()?;
        let volume = scene.volume_mut(key)?;
        let angle = volume.rotation() + x * self.settings.rotate_speed;
        volume.set_rotation(angle);
        log::trace!("Volume {:?} rotation now {:.2} degrees", key, angle);
        Some(angle)
    }

    /// Snap both controllers back onto the hands
    pub fn reset(&mut self, hands: HandPair<Vec3>) -> HandPair<Vec3> {
        self.controllers = self.scaler.reset(&mut self.motion, hands);
        log::info!("PRISM reset");
        self.controllers
    }

    /// Start handling input: register events, show the pointer, reset PRISM
    pub fn enable<B, P>(&mut self, hands: HandPair<Vec3>, bus: &mut B, presenter: &mut P)
    where
        B: EventBus + ?Sized,
        P: PointerPresenter + ?Sized,
    {
        self.enabled = true;
        bus.register(EventMask::all());
        presenter.set_pointer_visible(true);
        self.reset(hands);
        log::info!("Chisel tool enabled");
    }

    /// Stop handling input: deregister events, hide visuals, re-anchor controllers
    pub fn disable<B, P>(&mut self, hands: HandPair<Vec3>, bus: &mut B, presenter: &mut P)
    where
        B: EventBus + ?Sized,
        P: PointerPresenter + ?Sized,
    {
        self.enabled = false;
        bus.deregister(EventMask::all());
        self.targeter.clear_target();
        presenter.set_pointer_visible(false);
        presenter.set_cursor_visible(false);
        self.controllers = self.scaler.reset(&mut self.motion, hands);
        log::info!("Chisel tool disabled");
    }

    /// Dispatch one input event
    pub fn handle<S, P>(
        &mut self,
        event: ChiselEvent,
        hands: HandPair<Vec3>,
        scene: &mut S,
        presenter: &mut P,
    ) where
        S: RaycastScene<Key = K>,
        P: PointerPresenter + ?Sized,
    {
        if !self.enabled {
            log::trace!("Ignoring {:?} while disabled", event);
            return;
        }
        match event {
            ChiselEvent::Chisel => {
                self.chisel(scene, presenter);
            }
            ChiselEvent::Rotate { x, .. } => {
                self.rotate(x, scene);
            }
            ChiselEvent::Reset => {
                self.reset(hands);
            }
        }
    }
}
