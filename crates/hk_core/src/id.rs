use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Largest id an application may hand to `RegisterHotKey` (`0x0000..=0xBFFF`).
const MAX_APP_ID: u32 = 0xBFFF;

static NEXT_ID: AtomicU32 = AtomicU32::new(0);

/// Process-unique hotkey id, fixed for the lifetime of a [`HotKey`](crate::HotKey).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HotKeyId(i32);

impl HotKeyId {
    /// Allocate the next id. Ids cycle through `1..=0xBFFF`; a collision needs that many live
    /// hotkeys at once.
    pub(crate) fn next() -> Self {
        let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        HotKeyId((n % MAX_APP_ID) as i32 + 1)
    }

    #[inline]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for HotKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}
