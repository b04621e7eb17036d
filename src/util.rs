// SPDX-License-Identifier: CC0-1.0

/// Encodes `n` as a minimally-sized CScriptNum, the representation numeric
/// witness stack items use. Zero encodes as the empty vector; the high bit
/// of the last byte is the sign bit.
pub(crate) fn scriptint_vec(n: i64) -> Vec<u8> {
    let mut out = Vec::new();
    if n == 0 {
        return out;
    }
    let negative = n < 0;
    let mut abs = n.unsigned_abs();
    while abs > 0xff {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    if abs & 0x80 != 0 {
        out.push(abs as u8);
        out.push(if negative { 0x80 } else { 0x00 });
    } else {
        out.push(abs as u8 | if negative { 0x80 } else { 0x00 });
    }
    out
}
