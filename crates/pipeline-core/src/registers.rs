/// Number of architecturally visible general-purpose registers (`R0..R15`).
pub const GENERAL_REGISTER_COUNT: usize = 16;

/// Fixed destination register for jump results.
pub const JUMP_TARGET_REGISTER: GeneralRegister = GeneralRegister::R0;

/// Architecturally visible general-purpose register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum GeneralRegister {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
    R8 = 8,
    R9 = 9,
    R10 = 10,
    R11 = 11,
    R12 = 12,
    R13 = 13,
    R14 = 14,
    R15 = 15,
}

impl GeneralRegister {
    /// Ordered list of all architectural general-purpose registers.
    pub const ALL: [Self; GENERAL_REGISTER_COUNT] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
        Self::R8,
        Self::R9,
        Self::R10,
        Self::R11,
        Self::R12,
        Self::R13,
        Self::R14,
        Self::R15,
    ];

    /// Returns the register-file index for this register (`0..=15`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes a 4-bit register field into an architectural register.
    #[must_use]
    pub const fn from_u4(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::R0),
            1 => Some(Self::R1),
            2 => Some(Self::R2),
            3 => Some(Self::R3),
            4 => Some(Self::R4),
            5 => Some(Self::R5),
            6 => Some(Self::R6),
            7 => Some(Self::R7),
            8 => Some(Self::R8),
            9 => Some(Self::R9),
            10 => Some(Self::R10),
            11 => Some(Self::R11),
            12 => Some(Self::R12),
            13 => Some(Self::R13),
            14 => Some(Self::R14),
            15 => Some(Self::R15),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GeneralRegister, GENERAL_REGISTER_COUNT, JUMP_TARGET_REGISTER};

    #[test]
    fn register_count_and_decode_match_architecture() {
        assert_eq!(GENERAL_REGISTER_COUNT, 16);

        for bits in 0_u8..=15 {
            let reg = GeneralRegister::from_u4(bits).expect("valid 4-bit register encoding");
            assert_eq!(reg.index(), usize::from(bits));
        }

        assert!(GeneralRegister::from_u4(16).is_none());
        assert!(GeneralRegister::from_u4(u8::MAX).is_none());
    }

    #[test]
    fn all_listing_is_in_index_order() {
        for (position, reg) in GeneralRegister::ALL.iter().enumerate() {
            assert_eq!(reg.index(), position);
        }
    }

    #[test]
    fn jump_target_is_register_zero() {
        assert_eq!(JUMP_TARGET_REGISTER, GeneralRegister::R0);
        assert_eq!(JUMP_TARGET_REGISTER.index(), 0);
    }
}
