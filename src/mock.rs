//! Scripted firmware for host tests.

use std::collections::VecDeque;

use crate::sbi::{Extension, Firmware, SbiCall, SbiReturn};

/// Records every non-console call, replays scripted replies and feeds
/// scripted console input. Console output is captured byte by byte.
#[derive(Default)]
pub struct MockFirmware {
    calls: Vec<SbiCall>,
    replies: VecDeque<SbiReturn>,
    input: VecDeque<isize>,
    output: Vec<u8>,
    polls: usize,
}

impl MockFirmware {
    /// An empty script: no input, every call succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the reply for the next non-console call. Unscripted calls
    /// succeed with a zero value.
    pub fn push_reply(&mut self, ret: SbiReturn) {
        self.replies.push_back(ret);
    }

    /// Queues bytes for getchar to hand out, one per poll.
    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes.iter().map(|&b| b as isize));
    }

    /// Queues a raw getchar reply word.
    pub fn push_raw(&mut self, word: isize) {
        self.input.push_back(word);
    }

    /// Queues `count` getchar polls that find nothing pending.
    pub fn push_idle(&mut self, count: usize) {
        self.input.extend(core::iter::repeat(-1).take(count));
    }

    /// Every non-console call, in issue order.
    pub fn calls(&self) -> &[SbiCall] {
        &self.calls
    }

    /// Bytes written through putchar.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// [`Self::output`] as text.
    pub fn output_str(&self) -> &str {
        core::str::from_utf8(&self.output).expect("console output is not utf-8")
    }

    /// Number of getchar calls so far.
    pub fn polls(&self) -> usize {
        self.polls
    }

    /// Forgets everything written so far.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }
}

impl Firmware for MockFirmware {
    fn call(&mut self, call: SbiCall) -> SbiReturn {
        match call.extension {
            Extension::LegacyConsolePutchar => {
                self.output.push(call.params[0] as u8);
                SbiReturn::success(0)
            }
            Extension::LegacyConsoleGetchar => {
                self.polls += 1;
                let ch = self
                    .input
                    .pop_front()
                    .expect("test read past the end of scripted input");
                SbiReturn { error: ch, value: 0 }
            }
            _ => {
                self.calls.push(call);
                self.replies
                    .pop_front()
                    .unwrap_or(SbiReturn::success(0))
            }
        }
    }
}
