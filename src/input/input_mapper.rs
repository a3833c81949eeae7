//! Input mapping from raw controller input to chisel events
//!
//! Hand poses are NOT mapped here - they go straight to the controller tick.
//! This mapper handles the buttons and the thumbstick only.

use chisel_input::ChiselEvent;

/// Raw controller input as reported by the device layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInput {
    /// Chisel trigger went down
    TriggerPressed,
    /// Chisel trigger came up
    TriggerReleased,
    /// Thumbstick sample
    Thumbstick { x: f32, y: f32 },
    /// Reset button went down
    ResetPressed,
    /// Reset button came up
    ResetReleased,
}

/// Maps raw input to chisel events
#[derive(Debug, Clone, Copy, Default)]
pub struct InputMapper {
    /// Thumbstick samples with magnitude at or below this are ignored
    pub thumbstick_dead_zone: f32,
}

impl InputMapper {
    /// Create a mapper with no thumbstick dead zone
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the thumbstick dead zone
    pub fn with_dead_zone(mut self, dead_zone: f32) -> Self {
        self.thumbstick_dead_zone = dead_zone;
        self
    }

    /// Map raw input to an event
    ///
    /// Returns `None` for input that carries no event (trigger press, reset
    /// release, thumbstick inside the dead zone).
    pub fn map(&self, input: RawInput) -> Option<ChiselEvent> {
        match input {
            // A stroke lands when the trigger is let go
            RawInput::TriggerReleased => Some(ChiselEvent::Chisel),
            RawInput::ResetPressed => Some(ChiselEvent::Reset),
            RawInput::Thumbstick { x, y } => {
                let magnitude = (x * x + y * y).sqrt();
                if magnitude.is_finite() && magnitude > self.thumbstick_dead_zone {
                    Some(ChiselEvent::Rotate { x, y })
                } else {
                    None
                }
            }
            RawInput::TriggerPressed | RawInput::ResetReleased => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chisel_on_release_only() {
        let mapper = InputMapper::new();
        assert_eq!(mapper.map(RawInput::TriggerPressed), None);
        assert_eq!(mapper.map(RawInput::TriggerReleased), Some(ChiselEvent::Chisel));
    }

    #[test]
    fn test_reset_on_press_only() {
        let mapper = InputMapper::new();
        assert_eq!(mapper.map(RawInput::ResetPressed), Some(ChiselEvent::Reset));
        assert_eq!(mapper.map(RawInput::ResetReleased), None);
    }

    #[test]
    fn test_thumbstick_without_dead_zone() {
        let mapper = InputMapper::new();
        assert_eq!(
            mapper.map(RawInput::Thumbstick { x: 0.01, y: 0.0 }),
            Some(ChiselEvent::Rotate { x: 0.01, y: 0.0 })
        );
        // Pure y still fires; rotation only reads x
        assert_eq!(
            mapper.map(RawInput::Thumbstick { x: 0.0, y: 0.5 }),
            Some(ChiselEvent::Rotate { x: 0.0, y: 0.5 })
        );
        // Resting stick is not motion
        assert_eq!(mapper.map(RawInput::Thumbstick { x: 0.0, y: 0.0 }), None);
    }

    #[test]
    fn test_thumbstick_dead_zone() {
        let mapper = InputMapper::new().with_dead_zone(0.2);
        assert_eq!(mapper.map(RawInput::Thumbstick { x: 0.1, y: 0.1 }), None);
        assert_eq!(
            mapper.map(RawInput::Thumbstick { x: -0.5, y: 0.0 }),
            Some(ChiselEvent::Rotate { x: -0.5, y: 0.0 })
        );
    }

    #[test]
    fn test_non_finite_thumbstick_ignored() {
        let mapper = InputMapper::new();
        assert_eq!(mapper.map(RawInput::Thumbstick { x: f32::NAN, y: 0.0 }), None);
    }
}
