//! Base extension (EID `0x10`).

use core::fmt;

use super::{Extension, Firmware, SbiCall};

/// `sbi_get_spec_version`, FID `0`.
pub const GET_SBI_SPEC_VERSION: usize = sbi_spec::base::GET_SBI_SPEC_VERSION;
/// `sbi_get_impl_id`, FID `1`.
pub const GET_SBI_IMPL_ID: usize = sbi_spec::base::GET_SBI_IMPL_ID;
/// `sbi_get_impl_version`, FID `2`.
pub const GET_SBI_IMPL_VERSION: usize = sbi_spec::base::GET_SBI_IMPL_VERSION;
/// `sbi_probe_extension`, FID `3`.
pub const PROBE_EXTENSION: usize = sbi_spec::base::PROBE_EXTENSION;

/// Version of the SBI specification implemented by firmware.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SpecVersion {
    /// Bits `[30:24]`.
    pub major: usize,
    /// Bits `[23:0]`.
    pub minor: usize,
}

impl SpecVersion {
    /// Decodes the raw version word.
    pub const fn from_raw(raw: usize) -> Self {
        SpecVersion {
            major: (raw >> 24) & 0x7f,
            minor: raw & 0xff_ffff,
        }
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

// The base extension is mandatory, so its functions cannot fail on a
// conforming implementation. Anything else is logged and the value kept.
fn base_call<F: Firmware>(sbi: &mut F, call: SbiCall) -> usize {
    let ret = sbi.call(call);
    if !ret.is_success() {
        warn!(
            "base function {} returned {}",
            call.function,
            super::describe(ret.error)
        );
    }
    ret.value
}

/// Returns the version of the SBI specification.
pub fn get_spec_version<F: Firmware>(sbi: &mut F) -> SpecVersion {
    SpecVersion::from_raw(base_call(
        sbi,
        SbiCall::new(Extension::Base, GET_SBI_SPEC_VERSION),
    ))
}

/// Returns the SBI implementation id (`1` is OpenSBI, `4` is RustSBI).
pub fn get_impl_id<F: Firmware>(sbi: &mut F) -> usize {
    base_call(sbi, SbiCall::new(Extension::Base, GET_SBI_IMPL_ID))
}

/// Returns the implementation version. Its encoding is implementation
/// specific; OpenSBI puts the major number in the upper 16 bits.
pub fn get_impl_version<F: Firmware>(sbi: &mut F) -> usize {
    base_call(sbi, SbiCall::new(Extension::Base, GET_SBI_IMPL_VERSION))
}

/// Whether firmware implements `extension`.
pub fn probe_extension<F: Firmware>(sbi: &mut F, extension: Extension) -> bool {
    let call = SbiCall::new(Extension::Base, PROBE_EXTENSION).arg(0, extension.id());
    base_call(sbi, call) != 0
}
