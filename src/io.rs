use crate::console::Console;
use crate::sbi::Ecall;
use core::fmt::{self, Write};
use spin::Mutex;

static STDOUT: Mutex<Console<Ecall>> = Mutex::new(Console::new(Ecall));

pub fn _print(args: fmt::Arguments) {
    let _ = STDOUT.lock().write_fmt(args);
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ({
        $crate::io::_print(format_args!($($arg)*));
    });
}

#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ($crate::print!("{}\n", format_args!($($arg)*)));
}
