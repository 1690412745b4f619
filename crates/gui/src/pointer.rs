use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use tracing::debug;
use vpnclick_core::{Pointer, PointerError, ScreenPoint};

/// System pointer driven through `enigo`.
pub struct EnigoPointer {
    enigo: Enigo,
}

impl EnigoPointer {
    /// Connect to the platform input backend (X11/Wayland, Quartz, SendInput).
    pub fn new() -> Result<Self, PointerError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| PointerError::Unavailable(e.to_string()))?;
        Ok(Self { enigo })
    }
}

impl Pointer for EnigoPointer {
    fn move_to(&mut self, target: ScreenPoint) -> Result<(), PointerError> {
        self.enigo
            .move_mouse(target.x, target.y, Coordinate::Abs)
            .map_err(|e| PointerError::Move {
                target,
                reason: e.to_string(),
            })?;
        debug!(%target, "Pointer moved");
        Ok(())
    }

    fn click(&mut self, at: ScreenPoint) -> Result<(), PointerError> {
        self.enigo
            .button(Button::Left, Direction::Click)
            .map_err(|e| PointerError::Click {
                target: at,
                reason: e.to_string(),
            })
    }
}
