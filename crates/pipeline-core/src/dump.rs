use std::fmt::Write;

/// Formats bytes as a lowercase hex dump: two-byte groups separated by
/// spaces, sixteen bytes per line, no trailing newline.
#[must_use]
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (index, byte) in bytes.iter().enumerate() {
        if index > 0 {
            if index % 16 == 0 {
                out.push('\n');
            } else if index % 2 == 0 {
                out.push(' ');
            }
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::hex_dump;

    #[test]
    fn groups_pairs_of_bytes() {
        assert_eq!(hex_dump(&[0x00, 0x01, 0x02, 0x03, 0xAB]), "0001 0203 ab");
    }

    #[test]
    fn breaks_lines_every_sixteen_bytes() {
        let bytes: Vec<u8> = (0u8..18).collect();
        assert_eq!(
            hex_dump(&bytes),
            "0001 0203 0405 0607 0809 0a0b 0c0d 0e0f\n1011"
        );
    }

    #[test]
    fn empty_input_formats_to_nothing() {
        assert_eq!(hex_dump(&[]), "");
    }
}
