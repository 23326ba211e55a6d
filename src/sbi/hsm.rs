//! Hart state management extension (EID `0x48534D`, "HSM").

use core::fmt;

use super::{Extension, Firmware, SbiCall, SbiResult};

/// `sbi_hart_stop`, FID `1`.
pub const HART_STOP: usize = sbi_spec::hsm::HART_STOP;
/// `sbi_hart_get_status`, FID `2`.
pub const HART_GET_STATUS: usize = sbi_spec::hsm::HART_GET_STATUS;

/// State of a hart as reported by `sbi_hart_get_status`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HartStatus {
    /// `0`
    Started,
    /// `1`
    Stopped,
    /// `2`
    StartPending,
    /// `3`
    StopPending,
    /// `4`
    Suspended,
    /// `5`
    SuspendPending,
    /// `6`
    ResumePending,
    /// Any value this crate does not know about.
    Unknown(usize),
}

impl From<usize> for HartStatus {
    fn from(value: usize) -> Self {
        match value {
            0 => HartStatus::Started,
            1 => HartStatus::Stopped,
            2 => HartStatus::StartPending,
            3 => HartStatus::StopPending,
            4 => HartStatus::Suspended,
            5 => HartStatus::SuspendPending,
            6 => HartStatus::ResumePending,
            other => HartStatus::Unknown(other),
        }
    }
}

impl fmt::Display for HartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HartStatus::Started => "STARTED",
            HartStatus::Stopped => "STOPPED",
            HartStatus::StartPending => "START_PENDING",
            HartStatus::StopPending => "STOP_PENDING",
            HartStatus::Suspended => "SUSPENDED",
            HartStatus::SuspendPending => "SUSPEND_PENDING",
            HartStatus::ResumePending => "RESUME_PENDING",
            HartStatus::Unknown(raw) => return write!(f, "UNKNOWN ({})", raw),
        };
        f.write_str(name)
    }
}

/// Queries the state of `hartid`.
pub fn hart_get_status<F: Firmware>(sbi: &mut F, hartid: usize) -> SbiResult<HartStatus> {
    let ret = sbi.call(SbiCall::new(Extension::Hsm, HART_GET_STATUS).arg(0, hartid));
    debug!("hart {} status: error={} value={}", hartid, ret.error, ret.value);
    SbiResult::<usize>::from(ret).map(HartStatus::from)
}

/// Stops the calling hart. Only returns on failure.
///
/// This is issued once and never retried: a failure is reported to the
/// caller, which decides what to tell the operator.
pub fn hart_stop<F: Firmware>(sbi: &mut F) -> SbiResult {
    let ret = sbi.call(SbiCall::new(Extension::Hsm, HART_STOP));
    SbiResult::<usize>::from(ret).map(|_| ())
}
