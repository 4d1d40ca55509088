/// Location an instruction reads a value from or writes a result to.
///
/// Sources are immutable and owned by value inside the [`Instruction`] that
/// references them; they never borrow machine storage.
///
/// [`Instruction`]: crate::Instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum OperandSource {
    /// A general-purpose register, available in the same cycle.
    Register(crate::GeneralRegister),
    /// A data-memory byte; access costs one extra cycle. Addresses wrap
    /// modulo [`MEMORY_BYTES`](crate::MEMORY_BYTES).
    Memory(u16),
    /// A literal value. Not width-checked: it may exceed 8 bits or be
    /// negative, and is only narrowed if it reaches a writeback.
    Immediate(i32),
}

impl OperandSource {
    /// Returns `true` when resolving this source requires a memory access.
    #[must_use]
    pub const fn is_memory(self) -> bool {
        matches!(self, Self::Memory(_))
    }
}

#[cfg(test)]
mod tests {
    use super::OperandSource;
    use crate::GeneralRegister;

    #[test]
    fn only_memory_sources_report_memory_latency() {
        assert!(OperandSource::Memory(3).is_memory());
        assert!(!OperandSource::Register(GeneralRegister::R2).is_memory());
        assert!(!OperandSource::Immediate(-7).is_memory());
    }
}
