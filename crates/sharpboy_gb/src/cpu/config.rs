use typed_builder::TypedBuilder;

/// What the step driver does when it fetches one of the eleven undefined
/// primary opcodes (D3, DB, DD, E3, E4, EB, EC, ED, F4, FC, FD).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IllegalOpcodePolicy {
    /// Log a warning and treat the byte as a 1-byte, 4-cycle no-op.
    #[default]
    Nop,
    /// Log an error and lock the CPU the way real hardware does. Later
    /// steps only report idle cycles.
    Lock,
}

/// Behavioural switches for the CPU core.
///
/// ```
/// use sharpboy_gb::{CpuConfig, IllegalOpcodePolicy};
///
/// let config = CpuConfig::builder()
///     .illegal_opcode(IllegalOpcodePolicy::Lock)
///     .build();
/// assert!(config.halt_bug);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, TypedBuilder)]
pub struct CpuConfig {
    #[builder(default)]
    pub illegal_opcode: IllegalOpcodePolicy,
    /// Reproduce the DMG HALT bug: HALT with IME clear and an interrupt
    /// already pending does not halt, and the next opcode byte is read
    /// twice.
    #[builder(default = true)]
    pub halt_bug: bool,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
