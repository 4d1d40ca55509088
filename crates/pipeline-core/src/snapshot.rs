//! Serializable machine snapshots for export, import, and test fixtures.

use thiserror::Error;

use crate::memory::MEMORY_BYTES;
use crate::{Machine, PipelineCounters, GENERAL_REGISTER_COUNT};

/// Stable snapshot schema-version identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u16)]
pub enum SnapshotVersion {
    /// Initial schema revision.
    V1 = 1,
}

impl SnapshotVersion {
    /// Converts a wire value to a known snapshot version.
    #[must_use]
    pub const fn from_u16(version: u16) -> Option<Self> {
        match version {
            1 => Some(Self::V1),
            _ => None,
        }
    }
}

/// Error raised when a snapshot cannot be restored into a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SnapshotLayoutError {
    /// Memory image length does not match the architectural memory size.
    #[error("snapshot memory image is {actual} bytes, expected {expected}")]
    MemoryLength {
        /// Required data-memory size in bytes.
        expected: usize,
        /// Length found in the snapshot.
        actual: usize,
    },
}

/// Full-state snapshot of one machine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MachineSnapshot {
    /// Snapshot schema version.
    pub version: SnapshotVersion,
    /// Register file in index order.
    pub registers: [u8; GENERAL_REGISTER_COUNT],
    /// Data-memory image.
    pub memory: Box<[u8]>,
    /// Cycle and stage counters at capture time.
    pub counters: PipelineCounters,
}

impl MachineSnapshot {
    /// Captures the complete state of a machine.
    #[must_use]
    pub fn from_machine(version: SnapshotVersion, machine: &Machine) -> Self {
        Self {
            version,
            registers: *machine.registers(),
            memory: machine.memory().into(),
            counters: machine.counters(),
        }
    }

    /// Restores the snapshot into a machine.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotLayoutError::MemoryLength`] when the memory image
    /// does not span exactly the architectural data memory.
    pub fn try_into_machine(self) -> Result<Machine, SnapshotLayoutError> {
        if self.memory.len() != MEMORY_BYTES {
            return Err(SnapshotLayoutError::MemoryLength {
                expected: MEMORY_BYTES,
                actual: self.memory.len(),
            });
        }
        Ok(Machine {
            registers: self.registers,
            memory: self.memory,
            counters: self.counters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{MachineSnapshot, SnapshotLayoutError, SnapshotVersion};
    use crate::{GeneralRegister, Instruction, Machine, OperandSource};

    #[test]
    fn version_identifiers_are_stable() {
        assert_eq!(SnapshotVersion::from_u16(1), Some(SnapshotVersion::V1));
        assert_eq!(SnapshotVersion::from_u16(2), None);
        assert_eq!(SnapshotVersion::V1 as u16, 1);
    }

    #[test]
    fn snapshot_restores_registers_memory_and_counters() {
        let mut machine = Machine::new();
        machine.execute(&Instruction::Unary {
            op1: OperandSource::Immediate(77),
            result: OperandSource::Register(GeneralRegister::R4),
        });
        machine.execute(&Instruction::Unary {
            op1: OperandSource::Register(GeneralRegister::R4),
            result: OperandSource::Memory(12),
        });

        let snapshot = MachineSnapshot::from_machine(SnapshotVersion::V1, &machine);
        let restored = snapshot.try_into_machine().unwrap();

        assert_eq!(restored, machine);
        assert_eq!(restored.register(GeneralRegister::R4), 77);
        assert_eq!(restored.memory()[12], 77);
        assert_eq!(restored.counters(), machine.counters());
    }

    #[test]
    fn undersized_memory_image_is_rejected() {
        let machine = Machine::new();
        let mut snapshot = MachineSnapshot::from_machine(SnapshotVersion::V1, &machine);
        snapshot.memory = vec![0u8; 16].into_boxed_slice();

        assert_eq!(
            snapshot.try_into_machine(),
            Err(SnapshotLayoutError::MemoryLength { expected: 1024, actual: 16 })
        );
    }
}
