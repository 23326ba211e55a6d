//! Legacy (v0.1) console extensions.
//!
//! These return their result in `a0` alone: putchar ignores it, getchar
//! reports the byte read, or a negative value when nothing is pending.

use super::{Extension, Firmware, SbiCall};

/// Writes `ch` to the debug console. Errors are not reported.
#[inline]
pub fn console_putchar<F: Firmware>(sbi: &mut F, ch: u8) {
    let _ = sbi.call(SbiCall::new(Extension::LegacyConsolePutchar, 0).arg(0, ch as usize));
}

/// Reads one byte from the debug console without blocking.
///
/// A word that is negative or does not fit in a byte means nothing was read.
#[inline]
pub fn console_getchar<F: Firmware>(sbi: &mut F) -> Option<u8> {
    let ret = sbi.call(SbiCall::new(Extension::LegacyConsoleGetchar, 0));
    match u8::try_from(ret.error) {
        Ok(byte) => Some(byte),
        Err(_) if ret.error < 0 => None,
        Err(_) => {
            warn!("getchar returned {:#x}, not a byte", ret.error);
            None
        }
    }
}
