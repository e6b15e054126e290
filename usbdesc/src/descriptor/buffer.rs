/// Fixed-capacity byte buffer for composing descriptors in `const` context.
///
/// Every method takes and returns the buffer by value so descriptor tables can
/// be built as `static` initializers. Pushing past `N` panics, which is a
/// compile error when the buffer is evaluated for a `static`.
#[derive(Debug, Clone, Copy)]
pub struct DescriptorBuf<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

impl<const N: usize> DescriptorBuf<N> {
    pub const fn new() -> Self {
        DescriptorBuf {
            bytes: [0; N],
            len: 0,
        }
    }

    pub const fn push(mut self, byte: u8) -> Self {
        assert!(self.len < N, "descriptor buffer overflow");
        self.bytes[self.len] = byte;
        self.len += 1;
        self
    }

    /// Appends a little-endian 16-bit field.
    pub const fn push_u16(self, value: u16) -> Self {
        let [lo, hi] = value.to_le_bytes();
        self.push(lo).push(hi)
    }

    pub const fn extend(mut self, bytes: &[u8]) -> Self {
        let mut i = 0;
        while i < bytes.len() {
            self = self.push(bytes[i]);
            i += 1;
        }
        self
    }

    /// Overwrites a little-endian 16-bit field already written at `offset`.
    pub const fn set_u16(mut self, offset: usize, value: u16) -> Self {
        assert!(offset + 2 <= self.len, "field outside written descriptor");
        let [lo, hi] = value.to_le_bytes();
        self.bytes[offset] = lo;
        self.bytes[offset + 1] = hi;
        self
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn as_slice(&self) -> &[u8] {
        let (written, _) = self.bytes.as_slice().split_at(self.len);
        written
    }

    /// Returns the backing array; the descriptor must fill it exactly.
    pub const fn into_array(self) -> [u8; N] {
        assert!(self.len == N, "descriptor does not fill its buffer");
        self.bytes
    }
}

impl<const N: usize> Default for DescriptorBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_fields_little_endian() {
        let buf = DescriptorBuf::<8>::new()
            .push(0x09)
            .push_u16(0x0111)
            .extend(&[0xaa, 0xbb]);
        assert_eq!(buf.as_slice(), &[0x09, 0x11, 0x01, 0xaa, 0xbb]);
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn patches_total_length_in_place() {
        let buf = DescriptorBuf::<4>::new()
            .push_u16(0)
            .push_u16(0xffff)
            .set_u16(0, 0x007b);
        assert_eq!(buf.into_array(), [0x7b, 0x00, 0xff, 0xff]);
    }

    #[test]
    #[should_panic(expected = "descriptor buffer overflow")]
    fn overflow_panics() {
        let _ = DescriptorBuf::<1>::new().push(1).push(2);
    }

    #[test]
    #[should_panic(expected = "descriptor does not fill its buffer")]
    fn partial_buffer_is_not_an_array() {
        let _ = DescriptorBuf::<3>::new().push(1).into_array();
    }
}
