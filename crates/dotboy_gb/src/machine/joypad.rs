use super::interrupts::InterruptController;
use crate::cpu::Interrupt;

/// The eight DMG inputs, in `set_button_state` index order.
///
/// Indices 0-3 sit on the button select line (P1 bit 5), 4-7 on the
/// direction select line (P1 bit 4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    A = 0,
    B = 1,
    Select = 2,
    Start = 3,
    Right = 4,
    Left = 5,
    Up = 6,
    Down = 7,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Right,
        Button::Left,
        Button::Up,
        Button::Down,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Button> {
        Button::ALL.get(usize::from(index)).copied()
    }
}

/// P1 (0xFF00).
pub(crate) struct Joypad {
    /// Select bits 5-4 as last written; 0 selects a group.
    select: u8,
    /// Active-low key state, bit = `Button::index()`.
    keys: u8,
}

impl Joypad {
    pub(crate) fn new() -> Self {
        Self {
            select: 0x30,
            keys: 0xFF,
        }
    }

    /// Select bit for the group `button` belongs to.
    fn select_mask(button: Button) -> u8 {
        if button.index() < 4 {
            0x20
        } else {
            0x10
        }
    }

    /// Update one key. A released→pressed edge on a selected group
    /// raises the joypad interrupt.
    pub(crate) fn set_button_state(
        &mut self,
        button: Button,
        pressed: bool,
        interrupts: &mut InterruptController,
    ) {
        let mask = 1u8 << button.index();
        let was_released = self.keys & mask != 0;

        if pressed {
            self.keys &= !mask;
        } else {
            self.keys |= mask;
        }

        let selected = self.select & Self::select_mask(button) == 0;
        if pressed && was_released && selected {
            log::trace!("GB joypad: {button:?} pressed, requesting interrupt");
            interrupts.request(Interrupt::JOYPAD);
        }
    }

    pub(crate) fn read(&self) -> u8 {
        let mut low = 0x0F;
        if self.select & 0x20 == 0 {
            low &= self.keys & 0x0F;
        }
        if self.select & 0x10 == 0 {
            low &= self.keys >> 4;
        }
        0xC0 | self.select | low
    }

    /// Only the two select bits are writable.
    pub(crate) fn write(&mut self, value: u8) {
        self.select = value & 0x30;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_selected_reads_all_released() {
        let mut irq = InterruptController::default();
        let mut joypad = Joypad::new();
        joypad.set_button_state(Button::A, true, &mut irq);
        assert_eq!(joypad.read(), 0xFF);
        assert!(irq.requested().is_empty());
    }

    #[test]
    fn selected_group_reports_pressed_keys_low() {
        let mut irq = InterruptController::default();
        let mut joypad = Joypad::new();
        joypad.write(0x10); // buttons selected
        joypad.set_button_state(Button::Start, true, &mut irq);
        joypad.set_button_state(Button::Down, true, &mut irq);

        assert_eq!(joypad.read(), 0xD7);
        joypad.write(0x20); // directions selected
        assert_eq!(joypad.read(), 0xE7);
    }

    #[test]
    fn interrupt_only_on_press_edge_of_selected_group() {
        let mut irq = InterruptController::default();
        let mut joypad = Joypad::new();
        joypad.write(0x20); // directions selected

        joypad.set_button_state(Button::A, true, &mut irq);
        assert!(irq.requested().is_empty());

        joypad.set_button_state(Button::Left, true, &mut irq);
        assert!(irq.requested().contains(Interrupt::JOYPAD));

        irq.write_if(0);
        joypad.set_button_state(Button::Left, true, &mut irq);
        joypad.set_button_state(Button::Left, false, &mut irq);
        assert!(irq.requested().is_empty());
    }
}
