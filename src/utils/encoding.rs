//! Flat binary and line-oriented encodings used by the index files

use std::io::{self, BufRead, Write};

/// Width in bytes of every integer stored in `.corpus` and `.suffix` files
pub const WORD_SIZE: usize = std::mem::size_of::<u32>();

/// Write a slice of u32 in native byte order, no header
pub fn write_u32_array<W: Write>(writer: &mut W, values: &[u32]) -> io::Result<()> {
    // 1024 entries at a time
    let mut buffer = Vec::with_capacity(WORD_SIZE * 1024);
    for &value in values {
        buffer.extend_from_slice(&value.to_ne_bytes());
        if buffer.len() >= WORD_SIZE * 1024 {
            writer.write_all(&buffer)?;
            buffer.clear();
        }
    }
    if !buffer.is_empty() {
        writer.write_all(&buffer)?;
    }
    Ok(())
}

/// Decode native-endian u32 values from a byte slice
///
/// Returns `None` if the slice length is not a multiple of [`WORD_SIZE`].
pub fn decode_u32_array(bytes: &[u8]) -> Option<impl Iterator<Item = u32> + '_> {
    if bytes.len() % WORD_SIZE != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(WORD_SIZE)
            .map(|chunk| u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])),
    )
}

/// Read one line as raw bytes into `buf`, without the trailing newline
///
/// Returns `Ok(false)` at end of input. A final line with no newline is
/// still returned.
pub fn read_line_bytes<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(false);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    Ok(true)
}

/// Split an in-memory buffer into lines, same rules as [`read_line_bytes`]
pub fn split_lines(data: &[u8]) -> impl Iterator<Item = &[u8]> + '_ {
    let mut start = 0;
    let mut ends = memchr::memchr_iter(b'\n', data);
    std::iter::from_fn(move || {
        if start >= data.len() {
            return None;
        }
        let end = ends.next().unwrap_or(data.len());
        let line = &data[start..end];
        start = end + 1;
        Some(line)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_u32_array_layout() {
        let mut buf = Vec::new();
        write_u32_array(&mut buf, &[1, 2, 0xdead_beef]).unwrap();
        assert_eq!(buf.len(), 12);
        assert_eq!(&buf[8..12], &0xdead_beefu32.to_ne_bytes());

        let decoded: Vec<u32> = decode_u32_array(&buf).unwrap().collect();
        assert_eq!(decoded, vec![1, 2, 0xdead_beef]);
    }

    #[test]
    fn test_large_array_crosses_buffer_flush() {
        let values: Vec<u32> = (0..5000).collect();
        let mut buf = Vec::new();
        write_u32_array(&mut buf, &values).unwrap();
        assert_eq!(buf.len(), 5000 * WORD_SIZE);
        assert_eq!(decode_u32_array(&buf).unwrap().last(), Some(4999));
    }

    #[test]
    fn test_decode_rejects_partial_word() {
        assert!(decode_u32_array(&[0, 0, 0]).is_none());
        assert_eq!(decode_u32_array(&[]).unwrap().count(), 0);
    }

    #[test]
    fn test_read_line_bytes() {
        let mut input = Cursor::new(b"the\n\ncat\xff\nlast".to_vec());
        let mut buf = Vec::new();
        let mut lines = Vec::new();
        while read_line_bytes(&mut input, &mut buf).unwrap() {
            lines.push(buf.clone());
        }
        assert_eq!(
            lines,
            vec![b"the".to_vec(), b"".to_vec(), b"cat\xff".to_vec(), b"last".to_vec()]
        );
    }

    #[test]
    fn test_split_lines() {
        let lines: Vec<&[u8]> = split_lines(b"\na\nbc\n").collect();
        assert_eq!(lines, vec![&b""[..], &b"a"[..], &b"bc"[..]]);

        let lines: Vec<&[u8]> = split_lines(b"x\ny").collect();
        assert_eq!(lines, vec![&b"x"[..], &b"y"[..]]);

        assert_eq!(split_lines(b"").count(), 0);
    }
}
