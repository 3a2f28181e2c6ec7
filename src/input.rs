use winit::event::VirtualKeyCode;
use winit_input_helper::WinitInputHelper;

/// Keys held during the current tick.
///
/// Holding a key applies its effect every tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Input {
    pub up_pressed: bool,
    pub down_pressed: bool,
    pub left_pressed: bool,
    pub right_pressed: bool,
    /// Raise the shield.
    pub shield_pressed: bool,
    /// Shoot while the window is open.
    pub fire_pressed: bool,
    /// Start over after the game ended.
    pub restart_pressed: bool,
}

impl Input {
    /// Take a snapshot of the keyboard.
    pub fn from_keyboard(keyboard: &WinitInputHelper) -> Self {
        Self {
            up_pressed: keyboard.key_held(VirtualKeyCode::Up),
            down_pressed: keyboard.key_held(VirtualKeyCode::Down),
            left_pressed: keyboard.key_held(VirtualKeyCode::Left),
            right_pressed: keyboard.key_held(VirtualKeyCode::Right),
            shield_pressed: keyboard.key_held(VirtualKeyCode::D),
            fire_pressed: keyboard.key_held(VirtualKeyCode::Space),
            restart_pressed: keyboard.key_held(VirtualKeyCode::R),
        }
    }
}
