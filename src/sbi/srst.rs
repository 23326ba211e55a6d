//! System reset extension (EID `0x53525354`, "SRST").

use super::{Extension, Firmware, SbiCall, SbiReturn};

/// `sbi_system_reset`, FID `0`.
pub const SYSTEM_RESET: usize = sbi_spec::srst::SYSTEM_RESET;

/// What kind of reset to request.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResetType {
    /// Power off.
    Shutdown,
    /// Power cycle.
    ColdReboot,
    /// Reset the harts without cutting power.
    WarmReboot,
}

impl ResetType {
    /// The value passed in `a0`.
    pub const fn raw(self) -> usize {
        match self {
            ResetType::Shutdown => sbi_spec::srst::RESET_TYPE_SHUTDOWN as usize,
            ResetType::ColdReboot => sbi_spec::srst::RESET_TYPE_COLD_REBOOT as usize,
            ResetType::WarmReboot => sbi_spec::srst::RESET_TYPE_WARM_REBOOT as usize,
        }
    }
}

/// Why the reset is requested.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResetReason {
    /// Normal request.
    NoReason,
    /// The supervisor hit an unrecoverable failure.
    SystemFailure,
}

impl ResetReason {
    /// The value passed in `a1`.
    pub const fn raw(self) -> usize {
        match self {
            ResetReason::NoReason => sbi_spec::srst::RESET_REASON_NO_REASON as usize,
            ResetReason::SystemFailure => sbi_spec::srst::RESET_REASON_SYSTEM_FAILURE as usize,
        }
    }
}

/// Requests a system reset.
///
/// Firmware does not return from a successful reset, so whatever comes back
/// describes a failure, even when the error word reads `0`.
pub fn system_reset<F: Firmware>(sbi: &mut F, ty: ResetType, reason: ResetReason) -> SbiReturn {
    let call = SbiCall::new(Extension::Srst, SYSTEM_RESET)
        .arg(0, ty.raw())
        .arg(1, reason.raw());
    let ret = sbi.call(call);
    error!(
        "system reset {:?}/{:?} returned {}",
        ty,
        reason,
        super::describe(ret.error)
    );
    ret
}
