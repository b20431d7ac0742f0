//! Fixed-offset calldata word reader
//!
//! The ABI-free decode path used by the generic interpreter for well-known
//! function shapes. Parameters are read straight out of 32-byte-aligned
//! slots, with dynamic types resolved through the standard offset/length
//! encoding. Must stay semantically identical to the schema-driven decoder
//! for the signatures both can handle.

use alloy_primitives::{Address, U256};

/// Reads 32-byte words out of a calldata parameter body.
///
/// The reader operates on the body only; construct it with
/// [`WordReader::after_selector`] when the payload may carry the 4-byte
/// function selector.
#[derive(Debug, Clone, Copy)]
pub struct WordReader<'a> {
    data: &'a [u8],
}

impl<'a> WordReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Strips a selector prefix when the payload length indicates one.
    pub fn after_selector(calldata: &'a [u8]) -> Self {
        if calldata.len() % 32 == 4 {
            Self::new(&calldata[4..])
        } else {
            Self::new(calldata)
        }
    }

    pub fn word_count(&self) -> usize {
        self.data.len() / 32
    }

    /// The raw 32-byte slot at word index `i`.
    pub fn word(&self, i: usize) -> Option<&'a [u8]> {
        let start = i.checked_mul(32)?;
        let end = start.checked_add(32)?;
        self.data.get(start..end)
    }

    /// Address stored right-aligned in slot `i`.
    pub fn address(&self, i: usize) -> Option<Address> {
        self.word(i).map(|w| Address::from_slice(&w[12..]))
    }

    pub fn uint(&self, i: usize) -> Option<U256> {
        self.word(i).map(U256::from_be_slice)
    }

    /// Boolean stored in slot `i`; any nonzero byte counts as true.
    pub fn boolean(&self, i: usize) -> Option<bool> {
        self.word(i).map(|w| w.iter().any(|b| *b != 0))
    }

    /// Dynamic byte string whose offset pointer lives in slot `i`.
    ///
    /// Follows the standard dynamic encoding: the slot holds a byte offset
    /// (relative to the body start) to a 32-byte length word followed by the
    /// payload.
    pub fn dynamic_bytes(&self, i: usize) -> Option<&'a [u8]> {
        let offset = self.uint(i)?;
        let offset = usize::try_from(offset).ok()?;
        let payload_start = offset.checked_add(32)?;
        let len_word = self.data.get(offset..payload_start)?;
        let len = usize::try_from(U256::from_be_slice(len_word)).ok()?;
        self.data.get(payload_start..payload_start.checked_add(len)?)
    }

    /// Dynamic UTF-8 string at slot `i`, lossily decoded, NULs stripped.
    pub fn dynamic_string(&self, i: usize) -> Option<String> {
        let bytes = self.dynamic_bytes(i)?;
        Some(
            String::from_utf8_lossy(bytes)
                .chars()
                .filter(|c| *c != '\0')
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use pretty_assertions::assert_eq;

    fn push_uint(buf: &mut Vec<u8>, v: u64) {
        buf.extend_from_slice(&U256::from(v).to_be_bytes::<32>());
    }

    fn push_address(buf: &mut Vec<u8>, a: Address) {
        buf.extend_from_slice(&[0u8; 12]);
        buf.extend_from_slice(a.as_slice());
    }

    #[test]
    fn test_static_slots() {
        let a = address!("2222222222222222222222222222222222222222");
        let mut data = Vec::new();
        push_address(&mut data, a);
        push_uint(&mut data, 123);
        push_uint(&mut data, 1);

        let reader = WordReader::new(&data);
        assert_eq!(reader.word_count(), 3);
        assert_eq!(reader.address(0), Some(a));
        assert_eq!(reader.uint(1), Some(U256::from(123u64)));
        assert_eq!(reader.boolean(2), Some(true));
        assert_eq!(reader.word(3), None);
    }

    #[test]
    fn test_after_selector() {
        let mut data = vec![0xa9, 0x05, 0x9c, 0xbb];
        push_uint(&mut data, 9);

        let reader = WordReader::after_selector(&data);
        assert_eq!(reader.uint(0), Some(U256::from(9u64)));

        // Headless body stays untouched.
        let reader = WordReader::after_selector(&data[4..]);
        assert_eq!(reader.uint(0), Some(U256::from(9u64)));
    }

    #[test]
    fn test_dynamic_string_with_offset() {
        // setName-style layout: [addr][offset][tail: len + payload]
        let a = address!("3333333333333333333333333333333333333333");
        let mut data = Vec::new();
        push_address(&mut data, a);
        push_uint(&mut data, 64); // offset to tail, relative to body start
        push_uint(&mut data, 11); // length
        let mut tail = [0u8; 32];
        tail[..11].copy_from_slice(b"nouns.wtf\0\0");
        data.extend_from_slice(&tail);

        let reader = WordReader::new(&data);
        // NULs inside the declared length are stripped.
        assert_eq!(reader.dynamic_string(1), Some("nouns.wtf".to_string()));
    }

    #[test]
    fn test_dynamic_string_out_of_bounds() {
        let mut data = Vec::new();
        push_uint(&mut data, 32); // offset points past the end
        let reader = WordReader::new(&data);
        assert_eq!(reader.dynamic_string(0), None);

        // Length word claims more payload than exists.
        let mut data = Vec::new();
        push_uint(&mut data, 32);
        push_uint(&mut data, 4096);
        let reader = WordReader::new(&data);
        assert_eq!(reader.dynamic_bytes(0), None);
    }

    #[test]
    fn test_agrees_with_schema_decoder() {
        // The fixed-offset reader and the schema-driven decoder must agree
        // on the signatures both can handle.
        let sig = crate::abi::FunctionSig::parse("transfer(address,uint256)").unwrap();
        let to = address!("4444444444444444444444444444444444444444");
        let mut calldata = sig.selector().to_vec();
        let mut body = Vec::new();
        push_address(&mut body, to);
        push_uint(&mut body, 777);
        calldata.extend_from_slice(&body);

        let decoded = crate::abi::decode_params(&sig, &calldata).unwrap();
        let reader = WordReader::after_selector(&calldata);

        assert_eq!(decoded[0].as_address(), reader.address(0));
        assert_eq!(decoded[1].as_uint(), reader.uint(1));
    }

    #[test]
    fn test_truncated_word() {
        let data = [0u8; 40]; // one full word plus a ragged tail
        let reader = WordReader::new(&data);
        assert_eq!(reader.word_count(), 1);
        assert!(reader.word(0).is_some());
        assert!(reader.word(1).is_none());
    }
}
