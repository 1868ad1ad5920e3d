//! Tests for the little-endian byte cursors

#[cfg(test)]
mod tests {
    use squaregrid::GridError;
    use squaregrid::io::codec::{ByteReader, ByteWriter};

    // Tests integers are written little-endian and appended
    // Verified by using to_be_bytes in put_u32
    #[test]
    fn test_writer_little_endian() {
        let mut bytes = vec![0xAA];
        let mut out = ByteWriter::new(&mut bytes);
        out.put_u8(1);
        out.put_u16(0x0302);
        out.put_u32(0x0706_0504);
        out.put_bytes(b"z");
        assert_eq!(out.len(), 9);
        assert!(!out.is_empty());

        assert_eq!(bytes, vec![0xAA, 1, 2, 3, 4, 5, 6, 7, b'z']);
    }

    // Tests reads consume bytes in order and track position
    // Verified by not advancing after take
    #[test]
    fn test_reader_sequence() {
        let mut bytes = Vec::new();
        let mut out = ByteWriter::new(&mut bytes);
        out.put_u16(513);
        out.put_u64(u64::MAX - 1);
        out.put_u32(42);

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.u16("a").unwrap(), 513);
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.u64("b").unwrap(), u64::MAX - 1);
        assert_eq!(reader.remaining(), 4);
        assert_eq!(reader.u32("c").unwrap(), 42);
        assert!(reader.finish("test data").is_ok());
    }

    // Tests truncated reads fail with the field name and leave the cursor
    // Verified by advancing the position before the bounds check
    #[test]
    fn test_reader_truncated() {
        let mut reader = ByteReader::new(&[1, 2, 3]);

        match reader.u32("record column") {
            Err(GridError::Format { reason, .. }) => {
                assert!(reason.contains("record column"), "{reason}");
            }
            other => panic!("expected format error, got {other:?}"),
        }
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.take(3, "rest").unwrap(), &[1, 2, 3]);
        assert!(reader.u8("past end").is_err());
    }

    // Tests huge lengths cannot overflow the cursor
    // Verified by adding the length without a checked add
    #[test]
    fn test_reader_take_huge_length() {
        let mut reader = ByteReader::new(&[0, 0]);
        reader.u8("first").unwrap();
        assert!(reader.take(usize::MAX, "payload").is_err());
        assert_eq!(reader.remaining(), 1);
    }

    // Tests leftover bytes are reported by finish
    // Verified by ignoring remaining bytes
    #[test]
    fn test_finish_trailing_bytes() {
        let mut reader = ByteReader::new(&[9, 9, 9]);
        reader.u8("head").unwrap();

        match reader.finish("header") {
            Err(GridError::Format { reason, .. }) => assert!(reason.contains("2 unexpected")),
            other => panic!("expected format error, got {other:?}"),
        }
    }

    // Tests fixed arrays are copied out intact
    // Verified by reversing the copied slice
    #[test]
    fn test_reader_array() {
        let mut reader = ByteReader::new(b"SQGMrest");
        let magic: [u8; 4] = reader.array("magic").unwrap();
        assert_eq!(&magic, b"SQGM");
        assert_eq!(reader.remaining(), 4);
    }
}
