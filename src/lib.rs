//! A minimal console monitor for supervisor programs running on OpenSBI.
//!
//! The crate talks to firmware only through SBI calls: the legacy console
//! extensions for terminal I/O, and the base, HSM and SRST extensions for
//! the operator commands served by [`monitor::Monitor`].
//!
//! On `riscv64` it also provides the boot runtime: `_start`, the panic
//! handler, `print!`/`println!` and a `log` backend. The program supplies
//! its entry point with [`entry`].

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub mod console;
pub mod logging;
pub mod monitor;
pub mod sbi;

#[cfg(target_arch = "riscv64")]
#[macro_use]
#[doc(hidden)]
pub mod io;

#[cfg(target_arch = "riscv64")]
mod runtime;

#[cfg(test)]
mod mock;

pub use console::Console;
pub use monitor::{Command, Monitor};
pub use sbi_monitor_macros::entry;
