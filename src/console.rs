//! Debug console on top of the legacy SBI console extensions.
//!
//! The other end is a raw terminal without a line discipline, so output
//! turns `\n` into `\r\n` and input is read one byte at a time.

use core::fmt;

use crate::sbi::{legacy, Firmware};

/// Byte console driven through SBI calls.
pub struct Console<F> {
    sbi: F,
}

impl<F: Firmware> Console<F> {
    /// Creates a console that talks to `sbi`.
    pub const fn new(sbi: F) -> Self {
        Console { sbi }
    }

    /// The firmware handle, for issuing calls other than console I/O.
    pub fn firmware(&mut self) -> &mut F {
        &mut self.sbi
    }

    /// Writes one byte as is.
    pub fn write_byte(&mut self, byte: u8) {
        legacy::console_putchar(&mut self.sbi, byte);
    }

    /// Writes `bytes`, emitting `\r` before every `\n`.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if byte == b'\n' {
                self.write_byte(b'\r');
            }
            self.write_byte(byte);
        }
    }

    /// Blocks until a byte arrives.
    ///
    /// Firmware's getchar does not block, so this spins on it. There is no
    /// timeout: the terminal is the only input source.
    pub fn read_byte(&mut self) -> u8 {
        loop {
            if let Some(byte) = legacy::console_getchar(&mut self.sbi) {
                trace!("console read {:#04x}", byte);
                return byte;
            }
            core::hint::spin_loop();
        }
    }

    /// Reads a decimal number terminated by CR or LF, echoing the digits.
    ///
    /// Non-digit bytes are dropped silently, and so is a line ending that
    /// arrives before the first digit. A digit that would overflow `usize`
    /// is rejected and not echoed.
    pub fn read_line(&mut self) -> usize {
        let mut result: usize = 0;
        let mut got_digit = false;
        loop {
            match self.read_byte() {
                ch @ b'0'..=b'9' => {
                    let digit = (ch - b'0') as usize;
                    match result.checked_mul(10).and_then(|r| r.checked_add(digit)) {
                        Some(next) => {
                            self.write_byte(ch);
                            result = next;
                            got_digit = true;
                        }
                        None => warn!("digit {} rejected: number too large", digit),
                    }
                }
                b'\r' | b'\n' if got_digit => {
                    self.write_byte(b'\r');
                    self.write_byte(b'\n');
                    return result;
                }
                _ => {}
            }
        }
    }
}

impl<F: Firmware> fmt::Write for Console<F> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

/// Writes `args` on a console of its own, without touching any lock held
/// around a shared console. For reporting from a context that may have
/// interrupted a write in progress.
pub fn write_unlocked<F: Firmware>(sbi: F, args: fmt::Arguments) {
    let _ = fmt::Write::write_fmt(&mut Console::new(sbi), args);
}
