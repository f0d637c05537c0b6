use std::fmt;

/// Keyboard modifier set for a hotkey combination.
///
/// Maps onto the Win32 `HOT_KEY_MODIFIERS` bitmask via [`Modifiers::to_mask`] /
/// [`Modifiers::from_mask`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    /// The Windows ("meta") key.
    pub meta: bool,
    /// Suppress auto-repeat notifications while the combination is held.
    pub no_repeat: bool,
}

impl Modifiers {
    pub const MOD_ALT: u32 = 0x0001;
    pub const MOD_CONTROL: u32 = 0x0002;
    pub const MOD_SHIFT: u32 = 0x0004;
    pub const MOD_WIN: u32 = 0x0008;
    pub const MOD_NOREPEAT: u32 = 0x4000;

    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
        no_repeat: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Self::NONE
    };

    pub const ALT: Modifiers = Modifiers {
        alt: true,
        ..Self::NONE
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Self::NONE
    };

    pub const META: Modifiers = Modifiers {
        meta: true,
        ..Self::NONE
    };

    #[inline]
    pub const fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[inline]
    pub const fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    #[inline]
    pub const fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    #[inline]
    pub const fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    #[inline]
    pub const fn with_no_repeat(mut self) -> Self {
        self.no_repeat = true;
        self
    }

    /// Win32 modifier bitmask for `RegisterHotKey`.
    pub const fn to_mask(self) -> u32 {
        let mut mask = 0;
        if self.alt {
            mask |= Self::MOD_ALT;
        }
        if self.ctrl {
            mask |= Self::MOD_CONTROL;
        }
        if self.shift {
            mask |= Self::MOD_SHIFT;
        }
        if self.meta {
            mask |= Self::MOD_WIN;
        }
        if self.no_repeat {
            mask |= Self::MOD_NOREPEAT;
        }
        mask
    }

    /// Build from a Win32 modifier bitmask. Unknown bits are ignored.
    pub const fn from_mask(mask: u32) -> Self {
        Self {
            ctrl: mask & Self::MOD_CONTROL != 0,
            shift: mask & Self::MOD_SHIFT != 0,
            alt: mask & Self::MOD_ALT != 0,
            meta: mask & Self::MOD_WIN != 0,
            no_repeat: mask & Self::MOD_NOREPEAT != 0,
        }
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.ctrl, "Ctrl"),
            (self.alt, "Alt"),
            (self.shift, "Shift"),
            (self.meta, "Win"),
        ];
        let mut first = true;
        for (_, name) in names.iter().filter(|(held, _)| *held) {
            if !first {
                f.write_str("+")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}

/// Virtual key code (Win32 `VK_*` value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    /// Sentinel: no key. A hotkey bound to this key never registers.
    pub const NONE: KeyCode = KeyCode(0);

    // Common key constants.
    pub const ESCAPE: KeyCode = KeyCode(0x1B);
    pub const ENTER: KeyCode = KeyCode(0x0D);
    pub const SPACE: KeyCode = KeyCode(0x20);
    pub const TAB: KeyCode = KeyCode(0x09);
    pub const F1: KeyCode = KeyCode(0x70);
    pub const F12: KeyCode = KeyCode(0x7B);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Value handed to the OS as the virtual key code.
    #[inline]
    pub const fn virtual_key(self) -> u32 {
        self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            KeyCode::NONE => f.write_str("None"),
            KeyCode::ESCAPE => f.write_str("Esc"),
            KeyCode::ENTER => f.write_str("Enter"),
            KeyCode::SPACE => f.write_str("Space"),
            KeyCode::TAB => f.write_str("Tab"),
            KeyCode(key @ (0x30..=0x39 | 0x41..=0x5A)) => {
                write!(f, "{}", char::from_u32(key).unwrap_or('?'))
            }
            KeyCode(key @ 0x70..=0x87) => write!(f, "F{}", key - KeyCode::F1.0 + 1),
            KeyCode(key) => write!(f, "Key{key}"),
        }
    }
}

/// Display a combination the way settings UIs show it, e.g. `Ctrl+Alt+S`.
pub fn combination_string(modifiers: Modifiers, key: KeyCode) -> String {
    let mods = modifiers.to_string();
    if mods.is_empty() {
        key.to_string()
    } else {
        format!("{mods}+{key}")
    }
}
