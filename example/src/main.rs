#![cfg_attr(target_arch = "riscv64", no_std, no_main)]

#[cfg(target_arch = "riscv64")]
#[macro_use]
extern crate log;

#[cfg(target_arch = "riscv64")]
use sbi_monitor::{
    sbi::{base, Ecall, Extension},
    Console, Monitor,
};

#[cfg(target_arch = "riscv64")]
#[sbi_monitor::entry]
fn main(hartid: usize, _dtb: usize) -> ! {
    let mut sbi = Ecall;
    info!(
        "SBI spec {}, implementation id {}",
        base::get_spec_version(&mut sbi),
        base::get_impl_id(&mut sbi)
    );
    for ext in [Extension::Hsm, Extension::Srst] {
        if !base::probe_extension(&mut sbi, ext) {
            warn!("{:?} extension not available on hart {}", ext, hartid);
        }
    }
    Monitor::new(Console::new(sbi)).run()
}

#[cfg(not(target_arch = "riscv64"))]
fn main() {
    eprintln!("sbi-monitor is a supervisor image; build it for riscv64gc-unknown-none-elf");
}
