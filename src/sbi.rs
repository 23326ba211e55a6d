//! RISC-V Supervisor Binary Interface (SBI)
//!
//! Ref: https://github.com/riscv-non-isa/riscv-sbi-doc/blob/master/riscv-sbi.adoc
//!
//! Every call goes through [`Firmware`]. On hardware that is [`Ecall`], which
//! places the arguments in `a0`..`a5`, the function id in `a6` and the
//! extension id in `a7`, executes `ecall` and reads `a0` (error) and `a1`
//! (value) back.

use core::fmt;

pub mod base;
pub mod hsm;
pub mod legacy;
pub mod srst;

/// The two words returned by every SBI call.
#[repr(C)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SbiReturn {
    /// `0` on success, one of the negative [`SbiError`] codes otherwise.
    pub error: isize,
    /// Extension specific payload; only meaningful when `error == 0`.
    pub value: usize,
}

impl SbiReturn {
    /// A successful reply carrying `value`.
    pub const fn success(value: usize) -> Self {
        SbiReturn { error: 0, value }
    }

    /// A failed reply with the given error code and a zero value.
    pub const fn failure(error: isize) -> Self {
        SbiReturn { error, value: 0 }
    }

    /// Whether the error word is the success sentinel.
    pub const fn is_success(&self) -> bool {
        self.error == 0
    }

    /// The value word read as a signed integer.
    pub const fn value(&self) -> isize {
        self.value as isize
    }

    /// The value word read as an unsigned integer.
    pub const fn uvalue(&self) -> usize {
        self.value
    }
}

/// The error type which is returned from SBI.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum SbiError {
    Failed,
    NotSupported,
    InvalidParam,
    Denied,
    InvalidAddress,
    AlreadyAvailable,
    AlreadyStarted,
    AlreadyStopped,
    NoShmem,
    InvalidState,
    BadRange,
    Timeout,
    Io,
    DeniedLocked,
    /// A code outside the set defined by the SBI specification, kept verbatim.
    Unknown(isize),
}

impl SbiError {
    /// Maps an error word to its variant. Anything that is not one of the
    /// fourteen defined failure codes, success included, becomes `Unknown`.
    pub const fn from_code(code: isize) -> Self {
        match code {
            -1 => SbiError::Failed,
            -2 => SbiError::NotSupported,
            -3 => SbiError::InvalidParam,
            -4 => SbiError::Denied,
            -5 => SbiError::InvalidAddress,
            -6 => SbiError::AlreadyAvailable,
            -7 => SbiError::AlreadyStarted,
            -8 => SbiError::AlreadyStopped,
            -9 => SbiError::NoShmem,
            -10 => SbiError::InvalidState,
            -11 => SbiError::BadRange,
            -12 => SbiError::Timeout,
            -13 => SbiError::Io,
            -14 => SbiError::DeniedLocked,
            other => SbiError::Unknown(other),
        }
    }

    /// The raw error word.
    pub const fn code(self) -> isize {
        match self {
            SbiError::Failed => -1,
            SbiError::NotSupported => -2,
            SbiError::InvalidParam => -3,
            SbiError::Denied => -4,
            SbiError::InvalidAddress => -5,
            SbiError::AlreadyAvailable => -6,
            SbiError::AlreadyStarted => -7,
            SbiError::AlreadyStopped => -8,
            SbiError::NoShmem => -9,
            SbiError::InvalidState => -10,
            SbiError::BadRange => -11,
            SbiError::Timeout => -12,
            SbiError::Io => -13,
            SbiError::DeniedLocked => -14,
            SbiError::Unknown(code) => code,
        }
    }

    /// Canonical name, as printed to the operator.
    pub const fn name(self) -> &'static str {
        match self {
            SbiError::Failed => "SBI_ERR_FAILED",
            SbiError::NotSupported => "SBI_ERR_NOT_SUPPORTED",
            SbiError::InvalidParam => "SBI_ERR_INVALID_PARAM",
            SbiError::Denied => "SBI_ERR_DENIED",
            SbiError::InvalidAddress => "SBI_ERR_INVALID_ADDRESS",
            SbiError::AlreadyAvailable => "SBI_ERR_ALREADY_AVAILABLE",
            SbiError::AlreadyStarted => "SBI_ERR_ALREADY_STARTED",
            SbiError::AlreadyStopped => "SBI_ERR_ALREADY_STOPPED",
            SbiError::NoShmem => "SBI_ERR_NO_SHMEM",
            SbiError::InvalidState => "SBI_ERR_INVALID_STATE",
            SbiError::BadRange => "SBI_ERR_BAD_RANGE",
            SbiError::Timeout => "SBI_ERR_TIMEOUT",
            SbiError::Io => "SBI_ERR_IO",
            SbiError::DeniedLocked => "SBI_ERR_DENIED_LOCKED",
            SbiError::Unknown(_) => "UNKNOWN",
        }
    }
}

impl fmt::Display for SbiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The type returned by SBI functions.
pub type SbiResult<T = ()> = Result<T, SbiError>;

impl From<SbiReturn> for SbiResult<usize> {
    fn from(ret: SbiReturn) -> Self {
        match ret.error {
            0 => Ok(ret.value),
            code => Err(SbiError::from_code(code)),
        }
    }
}

/// Name of an SBI error word. Total: `0` is `SBI_SUCCESS`, the fourteen
/// defined failures have their own names, everything else is `UNKNOWN`.
pub const fn describe(code: isize) -> &'static str {
    match code {
        0 => "SBI_SUCCESS",
        code => SbiError::from_code(code).name(),
    }
}

/// The SBI extensions this crate calls into.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Extension {
    /// Legacy console putchar, `0x01`.
    LegacyConsolePutchar,
    /// Legacy console getchar, `0x02`.
    LegacyConsoleGetchar,
    /// Base extension, `0x10`.
    Base,
    /// Hart state management, `0x48534D` ("HSM").
    Hsm,
    /// System reset, `0x53525354` ("SRST").
    Srst,
}

impl Extension {
    /// The extension id passed in `a7`.
    pub const fn id(self) -> usize {
        match self {
            Extension::LegacyConsolePutchar => sbi_spec::legacy::LEGACY_CONSOLE_PUTCHAR,
            Extension::LegacyConsoleGetchar => sbi_spec::legacy::LEGACY_CONSOLE_GETCHAR,
            Extension::Base => sbi_spec::base::EID_BASE,
            Extension::Hsm => sbi_spec::hsm::EID_HSM,
            Extension::Srst => sbi_spec::srst::EID_SRST,
        }
    }
}

/// One SBI request: extension, function and the six argument words.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SbiCall {
    /// Goes to `a7`.
    pub extension: Extension,
    /// Goes to `a6`.
    pub function: usize,
    /// Go to `a0`..`a5`.
    pub params: [usize; 6],
}

impl SbiCall {
    /// A call with every argument register zeroed.
    pub const fn new(extension: Extension, function: usize) -> Self {
        SbiCall {
            extension,
            function,
            params: [0; 6],
        }
    }

    /// Sets `a<index>` to `value`.
    pub fn arg(mut self, index: usize, value: usize) -> Self {
        self.params[index] = value;
        self
    }
}

/// Something that answers SBI calls.
///
/// A call is synchronous and non-reentrant: it returns only once firmware
/// has replied, and only one call is ever outstanding.
pub trait Firmware {
    /// Issues `call` and returns firmware's reply.
    fn call(&mut self, call: SbiCall) -> SbiReturn;
}

impl<F: Firmware + ?Sized> Firmware for &mut F {
    fn call(&mut self, call: SbiCall) -> SbiReturn {
        (**self).call(call)
    }
}

/// The real firmware, reached with `ecall`.
#[cfg(target_arch = "riscv64")]
#[derive(Debug, Default, Copy, Clone)]
pub struct Ecall;

#[cfg(target_arch = "riscv64")]
impl Firmware for Ecall {
    #[inline(always)]
    fn call(&mut self, call: SbiCall) -> SbiReturn {
        let [a0, a1, a2, a3, a4, a5] = call.params;
        sbi_call(a0, a1, a2, a3, a4, a5, call.function, call.extension.id())
    }
}

/// Raw SBI call.
///
/// Firmware may read or write memory passed to it by address, so the asm
/// block is left without `nomem`/`readonly`: the compiler keeps every memory
/// access on its own side of the `ecall`.
#[cfg(target_arch = "riscv64")]
#[inline(always)]
#[allow(clippy::too_many_arguments)]
pub fn sbi_call(
    arg0: usize,
    arg1: usize,
    arg2: usize,
    arg3: usize,
    arg4: usize,
    arg5: usize,
    func_id: usize,
    ext_id: usize,
) -> SbiReturn {
    let error: isize;
    let value: usize;
    unsafe {
        core::arch::asm!(
            "ecall",
            in("a0") arg0,
            in("a1") arg1,
            in("a2") arg2,
            in("a3") arg3,
            in("a4") arg4,
            in("a5") arg5,
            in("a6") func_id,
            in("a7") ext_id,
            lateout("a0") error,
            lateout("a1") value,
        );
    }
    SbiReturn { error, value }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFINED: [(isize, &str); 14] = [
        (-1, "SBI_ERR_FAILED"),
        (-2, "SBI_ERR_NOT_SUPPORTED"),
        (-3, "SBI_ERR_INVALID_PARAM"),
        (-4, "SBI_ERR_DENIED"),
        (-5, "SBI_ERR_INVALID_ADDRESS"),
        (-6, "SBI_ERR_ALREADY_AVAILABLE"),
        (-7, "SBI_ERR_ALREADY_STARTED"),
        (-8, "SBI_ERR_ALREADY_STOPPED"),
        (-9, "SBI_ERR_NO_SHMEM"),
        (-10, "SBI_ERR_INVALID_STATE"),
        (-11, "SBI_ERR_BAD_RANGE"),
        (-12, "SBI_ERR_TIMEOUT"),
        (-13, "SBI_ERR_IO"),
        (-14, "SBI_ERR_DENIED_LOCKED"),
    ];

    #[test]
    fn describe_defined_codes() {
        for (code, name) in DEFINED {
            assert_eq!(describe(code), name, "code {}", code);
            assert_eq!(SbiError::from_code(code).code(), code);
        }
        assert_eq!(describe(0), "SBI_SUCCESS");
    }

    #[test]
    fn describe_unknown_codes() {
        for code in [-15, 1, 2, -1000, isize::MIN, isize::MAX] {
            assert_eq!(describe(code), "UNKNOWN", "code {}", code);
        }
        assert_eq!(SbiError::from_code(-15), SbiError::Unknown(-15));
        assert_eq!(SbiError::Unknown(-15).code(), -15);
    }

    #[test]
    fn success_is_not_an_error_variant() {
        assert_eq!(SbiError::from_code(0), SbiError::Unknown(0));
    }

    #[test]
    fn display_uses_canonical_name() {
        assert_eq!(format!("{}", SbiError::InvalidParam), "SBI_ERR_INVALID_PARAM");
        assert_eq!(format!("{}", SbiError::Unknown(7)), "UNKNOWN");
    }

    #[test]
    fn return_into_result() {
        assert_eq!(SbiResult::<usize>::from(SbiReturn::success(5)), Ok(5));
        assert_eq!(
            SbiResult::<usize>::from(SbiReturn { error: -8, value: 5 }),
            Err(SbiError::AlreadyStopped)
        );
    }

    #[test]
    fn value_reinterpretation() {
        let ret = SbiReturn::success(usize::MAX);
        assert_eq!(ret.value(), -1);
        assert_eq!(ret.uvalue(), usize::MAX);
        assert!(ret.is_success());
        assert!(!SbiReturn::failure(-1).is_success());
    }

    #[test]
    fn extension_ids() {
        assert_eq!(Extension::LegacyConsolePutchar.id(), 0x01);
        assert_eq!(Extension::LegacyConsoleGetchar.id(), 0x02);
        assert_eq!(Extension::Base.id(), 0x10);
        assert_eq!(Extension::Hsm.id(), 0x48534D);
        assert_eq!(Extension::Srst.id(), 0x53525354);
    }

    #[test]
    fn call_builder_places_arguments() {
        let call = SbiCall::new(Extension::Srst, 0).arg(0, 1).arg(1, 2);
        assert_eq!(call.params, [1, 2, 0, 0, 0, 0]);
        assert_eq!(call.function, 0);
    }
}
