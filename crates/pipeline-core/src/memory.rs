//! Data-memory model primitives.

/// Size in bytes of the flat byte-addressable data memory.
pub const MEMORY_BYTES: usize = 1024;

/// Allocates a canonical zeroed data-memory backing store.
#[must_use]
pub fn new_data_memory() -> Box<[u8]> {
    vec![0; MEMORY_BYTES].into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::{new_data_memory, MEMORY_BYTES};

    #[test]
    fn canonical_backing_store_is_zeroed_and_sized() {
        let memory = new_data_memory();
        assert_eq!(memory.len(), MEMORY_BYTES);
        assert!(memory.iter().all(|byte| *byte == 0));
    }
}
