//! Little-endian interpretation of raw register bytes.
//!
//! Callers must pass a slice long enough for the requested `index`.

fn concat_bytes(msb: u8, lsb: u8) -> u16 {
    ((msb as u16) << 8) | (lsb as u16)
}

/// Two bytes at `index` (low byte first) as a two's-complement value.
pub fn signed16(data: &[u8], index: usize) -> i16 {
    concat_bytes(data[index + 1], data[index]) as i16
}

/// Two bytes at `index` (low byte first) as an unsigned value.
pub fn unsigned16(data: &[u8], index: usize) -> u16 {
    concat_bytes(data[index + 1], data[index])
}

pub fn signed_byte(data: &[u8], index: usize) -> i8 {
    data[index] as i8
}

pub fn unsigned_byte(data: &[u8], index: usize) -> u8 {
    data[index]
}
