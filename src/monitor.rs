//! Interactive menu over the debug console.
//!
//! Each round prints the menu, reads a single key and runs one command.
//! Nothing is carried from one round to the next, and a failed SBI call is
//! only reported: control always comes back to the menu.

use core::fmt::{self, Write};

use crate::console::Console;
use crate::sbi::srst::{self, ResetReason, ResetType};
use crate::sbi::{base, describe, hsm, Firmware};

/// Menu entries, keyed by the byte the operator types.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    /// `1`: print the SBI implementation version.
    ImplVersion,
    /// `2`: ask for a hart id and print its HSM state.
    HartStatus,
    /// `3`: stop the current hart.
    HartStop,
    /// `4`: power off.
    Shutdown,
}

impl Command {
    /// Maps a key to its command.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'1' => Some(Command::ImplVersion),
            b'2' => Some(Command::HartStatus),
            b'3' => Some(Command::HartStop),
            b'4' => Some(Command::Shutdown),
            _ => None,
        }
    }
}

const MENU: &str = "\nMenu:\n\
1. Get SBI implementation version\n\
2. Hart get status\n\
3. Hart stop\n\
4. System Shutdown\n\
Select option: ";

/// The operator-facing command loop.
pub struct Monitor<F> {
    console: Console<F>,
}

impl<F: Firmware> Monitor<F> {
    /// Creates a monitor talking through `console`.
    pub const fn new(console: Console<F>) -> Self {
        Monitor { console }
    }

    /// The underlying console.
    pub fn console(&mut self) -> &mut Console<F> {
        &mut self.console
    }

    /// Prints the banner and serves the menu forever.
    pub fn run(&mut self) -> ! {
        self.say(format_args!("\nRISC-V SBI monitor\n"));
        loop {
            self.step();
        }
    }

    /// One round: menu, key, command.
    pub fn step(&mut self) {
        self.say(format_args!("{}", MENU));
        let key = self.console.read_byte();
        self.console.write_byte(key);
        self.console.write_bytes(b"\n");
        match Command::from_byte(key) {
            Some(command) => self.dispatch(command),
            None => {
                debug!("unknown option {:#04x}", key);
                self.say(format_args!("Unknown option\n"));
            }
        }
    }

    /// Runs `command`.
    pub fn dispatch(&mut self, command: Command) {
        debug!("dispatch {:?}", command);
        match command {
            Command::ImplVersion => self.impl_version(),
            Command::HartStatus => self.hart_status(),
            Command::HartStop => self.hart_stop(),
            Command::Shutdown => self.shutdown(),
        }
    }

    fn impl_version(&mut self) {
        let version = base::get_impl_version(self.console.firmware());
        self.say(format_args!(
            "SBI implementation version: {} ({:#x})\n",
            version as isize, version
        ));
    }

    fn hart_status(&mut self) {
        self.say(format_args!("Enter hart id: "));
        let hartid = self.console.read_line();
        match hsm::hart_get_status(self.console.firmware(), hartid) {
            Ok(status) => self.say(format_args!("Hart {} status: {}\n", hartid, status)),
            Err(err) => self.say(format_args!("Error: {}\n", err)),
        }
    }

    fn hart_stop(&mut self) {
        self.say(format_args!("Stopping current hart...\n"));
        let code = match hsm::hart_stop(self.console.firmware()) {
            Ok(()) => 0,
            Err(err) => err.code(),
        };
        self.say(format_args!("Error: {}\n", describe(code)));
    }

    fn shutdown(&mut self) {
        self.say(format_args!("System shutdown...\n"));
        srst::system_reset(
            self.console.firmware(),
            ResetType::Shutdown,
            ResetReason::NoReason,
        );
        self.say(format_args!("Shutdown failed!\n"));
    }

    fn say(&mut self, args: fmt::Arguments) {
        let _ = self.console.write_fmt(args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFirmware;
    use crate::sbi::{Extension, SbiCall, SbiReturn};

    fn monitor(input: &[u8]) -> Monitor<MockFirmware> {
        let mut sbi = MockFirmware::new();
        sbi.push_input(input);
        Monitor::new(Console::new(sbi))
    }

    fn sbi(m: &mut Monitor<MockFirmware>) -> &mut MockFirmware {
        m.console().firmware()
    }

    #[test]
    fn command_keys() {
        assert_eq!(Command::from_byte(b'1'), Some(Command::ImplVersion));
        assert_eq!(Command::from_byte(b'2'), Some(Command::HartStatus));
        assert_eq!(Command::from_byte(b'3'), Some(Command::HartStop));
        assert_eq!(Command::from_byte(b'4'), Some(Command::Shutdown));
        assert_eq!(Command::from_byte(b'5'), None);
        assert_eq!(Command::from_byte(b'\n'), None);
    }

    #[test]
    fn menu_and_selection_echo() {
        let mut m = monitor(b"x");
        m.step();
        assert_eq!(
            sbi(&mut m).output_str(),
            "\r\nMenu:\r\n\
             1. Get SBI implementation version\r\n\
             2. Hart get status\r\n\
             3. Hart stop\r\n\
             4. System Shutdown\r\n\
             Select option: x\r\n\
             Unknown option\r\n"
        );
        assert!(sbi(&mut m).calls().is_empty());
    }

    #[test]
    fn impl_version_output() {
        let mut m = monitor(b"");
        sbi(&mut m).push_reply(SbiReturn::success(0x0200_0000));
        m.dispatch(Command::ImplVersion);
        assert_eq!(
            sbi(&mut m).output_str(),
            "SBI implementation version: 33554432 (0x2000000)\r\n"
        );
        assert_eq!(sbi(&mut m).calls(), &[SbiCall::new(Extension::Base, 2)]);
    }

    #[test]
    fn impl_version_small_value() {
        let mut m = monitor(b"");
        sbi(&mut m).push_reply(SbiReturn::success(2));
        m.dispatch(Command::ImplVersion);
        assert_eq!(
            sbi(&mut m).output_str(),
            "SBI implementation version: 2 (0x2)\r\n"
        );
    }

    #[test]
    fn impl_version_is_repeatable() {
        let mut m = monitor(b"");
        sbi(&mut m).push_reply(SbiReturn::success(0x1_0005));
        sbi(&mut m).push_reply(SbiReturn::success(0x1_0005));
        m.dispatch(Command::ImplVersion);
        let first = sbi(&mut m).output().to_vec();
        sbi(&mut m).clear_output();
        m.dispatch(Command::ImplVersion);
        assert_eq!(sbi(&mut m).output(), first.as_slice());
    }

    #[test]
    fn hart_status_success() {
        let mut m = monitor(b"1\n");
        sbi(&mut m).push_reply(SbiReturn::success(4));
        m.dispatch(Command::HartStatus);
        assert_eq!(
            sbi(&mut m).output_str(),
            "Enter hart id: 1\r\nHart 1 status: SUSPENDED\r\n"
        );
        assert_eq!(
            sbi(&mut m).calls(),
            &[SbiCall::new(Extension::Hsm, 2).arg(0, 1)]
        );
    }

    #[test]
    fn hart_status_unknown_value() {
        let mut m = monitor(b"0\n");
        sbi(&mut m).push_reply(SbiReturn::success(99));
        m.dispatch(Command::HartStatus);
        assert!(sbi(&mut m)
            .output_str()
            .ends_with("Hart 0 status: UNKNOWN (99)\r\n"));
    }

    #[test]
    fn hart_status_error_has_no_status_line() {
        let mut m = monitor(b"0\n");
        sbi(&mut m).push_reply(SbiReturn::failure(-3));
        m.dispatch(Command::HartStatus);
        let out = sbi(&mut m).output_str().to_owned();
        assert!(out.contains("Error: SBI_ERR_INVALID_PARAM\r\n"));
        assert!(!out.contains("status:"));
    }

    #[test]
    fn hart_stop_reports_error() {
        let mut m = monitor(b"");
        sbi(&mut m).push_reply(SbiReturn::failure(-8));
        m.dispatch(Command::HartStop);
        assert_eq!(
            sbi(&mut m).output_str(),
            "Stopping current hart...\r\nError: SBI_ERR_ALREADY_STOPPED\r\n"
        );
        assert_eq!(sbi(&mut m).calls(), &[SbiCall::new(Extension::Hsm, 1)]);
    }

    #[test]
    fn hart_stop_reports_unexpected_success() {
        let mut m = monitor(b"");
        m.dispatch(Command::HartStop);
        assert!(sbi(&mut m).output_str().ends_with("Error: SBI_SUCCESS\r\n"));
        assert_eq!(sbi(&mut m).calls().len(), 1);
    }

    #[test]
    fn shutdown_return_is_failure() {
        let mut m = monitor(b"");
        m.dispatch(Command::Shutdown);
        assert_eq!(
            sbi(&mut m).output_str(),
            "System shutdown...\r\nShutdown failed!\r\n"
        );
        assert_eq!(sbi(&mut m).calls(), &[SbiCall::new(Extension::Srst, 0)]);
    }

    #[test]
    fn steps_are_independent() {
        let mut m = monitor(b"9");
        m.step();
        sbi(&mut m).clear_output();
        sbi(&mut m).push_input(b"1");
        sbi(&mut m).push_reply(SbiReturn::success(3));
        m.step();
        assert!(sbi(&mut m)
            .output_str()
            .ends_with("Select option: 1\r\nSBI implementation version: 3 (0x3)\r\n"));
    }
}
