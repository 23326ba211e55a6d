use core::panic::PanicInfo;

use crate::console;
use crate::sbi::srst::{self, ResetReason, ResetType};
use crate::sbi::Ecall;

/// First Rust code to run. OpenSBI enters in S-mode with the hart id in `a0`
/// and the device tree address in `a1`; `_start` only sets up the stack.
#[no_mangle]
extern "C" fn init(hartid: usize, dtb: usize) -> ! {
    crate::logging::init();
    info!("hart {} up, dtb at {:#x}", hartid, dtb);

    extern "Rust" {
        fn __sbi_monitor_main(hartid: usize, dtb: usize);
    }
    unsafe {
        __sbi_monitor_main(hartid, dtb);
    }

    warn!("entry returned, shutting down");
    srst::system_reset(&mut Ecall, ResetType::Shutdown, ResetReason::NoReason);
    halt()
}

core::arch::global_asm!(
    r#"
    .section .text.entry
    .globl _start
_start:
    la sp, bootstacktop
    call init

    .section .bss.stack
    .align 12
    .globl bootstack
bootstack:
    .space 4096 * 4
    .globl bootstacktop
bootstacktop:
"#
);

// `println!` would spin forever if the panic hit while `STDOUT` was held.
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    console::write_unlocked(Ecall, format_args!("{}\n", info));
    halt()
}

fn halt() -> ! {
    loop {
        unsafe { riscv::asm::wfi() }
    }
}
