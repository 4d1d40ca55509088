//! Machine state: register file, data memory, and metric counters.

use crate::memory::{new_data_memory, MEMORY_BYTES};
use crate::{Fault, GeneralRegister, OperandSource, PipelineCounters, GENERAL_REGISTER_COUNT};

/// Narrows a raw wide pipeline value to one storable byte.
///
/// Mod-256 with a non-negative result, so negative intermediates (borrow,
/// negative immediates) land on the wrapped byte value.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn narrow_to_byte(value: i32) -> u8 {
    value.rem_euclid(256) as u8
}

fn wrap_address(address: u16) -> usize {
    usize::from(address) % MEMORY_BYTES
}

/// The complete state of one pipeline machine.
///
/// A machine is created zero-initialized, persists across an arbitrary number
/// of `execute` calls, and is the sole owner of all register and memory
/// storage: instructions and events never hold references into it. Registers
/// and memory are only mutated through the operand-write indirection, which
/// is where 8-bit narrowing happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Machine {
    pub(crate) registers: [u8; GENERAL_REGISTER_COUNT],
    pub(crate) memory: Box<[u8]>,
    pub(crate) counters: PipelineCounters,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Creates a zero-initialized machine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registers: [0; GENERAL_REGISTER_COUNT],
            memory: new_data_memory(),
            counters: PipelineCounters::new(),
        }
    }

    /// Reads one register byte.
    #[must_use]
    pub const fn register(&self, reg: GeneralRegister) -> u8 {
        self.registers[reg.index()]
    }

    /// Read-only view of the register file in index order.
    #[must_use]
    pub const fn registers(&self) -> &[u8; GENERAL_REGISTER_COUNT] {
        &self.registers
    }

    /// Read-only view of the data memory.
    #[must_use]
    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    /// Current cycle and stage counters.
    #[must_use]
    pub const fn counters(&self) -> PipelineCounters {
        self.counters
    }

    /// Resolves a source into its current raw value.
    ///
    /// Register and memory bytes are widened; an immediate returns its
    /// literal value unmodified, which may exceed 8 bits or be negative.
    #[must_use]
    pub fn read(&self, source: OperandSource) -> i32 {
        match source {
            OperandSource::Register(reg) => i32::from(self.registers[reg.index()]),
            OperandSource::Memory(address) => i32::from(self.memory[wrap_address(address)]),
            OperandSource::Immediate(value) => value,
        }
    }

    /// Stores `value` into the cell a source resolves to, narrowed to 8 bits.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::InvalidWriteTarget`] when the source is an immediate;
    /// an immediate is never a writable destination.
    pub fn write(&mut self, source: OperandSource, value: i32) -> Result<(), Fault> {
        match source {
            OperandSource::Register(reg) => {
                self.store_register(reg, value);
                Ok(())
            }
            OperandSource::Memory(address) => {
                self.store_memory(address, value);
                Ok(())
            }
            OperandSource::Immediate(_) => Err(Fault::InvalidWriteTarget),
        }
    }

    /// Restores the machine to its zero-initialized state.
    pub fn reset(&mut self) {
        self.registers = [0; GENERAL_REGISTER_COUNT];
        self.memory.fill(0);
        self.counters.reset();
    }

    pub(crate) const fn store_register(&mut self, reg: GeneralRegister, value: i32) {
        self.registers[reg.index()] = narrow_to_byte(value);
    }

    pub(crate) fn store_memory(&mut self, address: u16, value: i32) {
        self.memory[wrap_address(address)] = narrow_to_byte(value);
    }
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::Machine;
    use crate::{GeneralRegister, OperandSource, MEMORY_BYTES};

    proptest! {
        #[test]
        fn register_writes_follow_the_narrowing_model(bits in 0_u8..16, value in any::<i32>()) {
            let reg = GeneralRegister::from_u4(bits).expect("4-bit register field");
            let mut machine = Machine::new();

            machine.write(OperandSource::Register(reg), value).expect("register write");

            let expected = u8::try_from(value.rem_euclid(256)).expect("narrowed byte");
            prop_assert_eq!(machine.register(reg), expected);
            prop_assert_eq!(machine.read(OperandSource::Register(reg)), i32::from(expected));
        }

        #[test]
        fn memory_writes_wrap_and_narrow(address in any::<u16>(), value in any::<i32>()) {
            let mut machine = Machine::new();

            machine.write(OperandSource::Memory(address), value).expect("memory write");

            let expected = u8::try_from(value.rem_euclid(256)).expect("narrowed byte");
            prop_assert_eq!(machine.memory()[usize::from(address) % MEMORY_BYTES], expected);
            prop_assert_eq!(machine.read(OperandSource::Memory(address)), i32::from(expected));
        }
    }
}
