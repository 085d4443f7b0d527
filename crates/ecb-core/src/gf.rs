//! Arithmetic in GF(2^8) modulo x^8 + x^4 + x^3 + x + 1.

/// Low byte of the reduction polynomial.
pub const REDUCTION: u8 = 0x1b;

/// Multiplies `byte` by `x` (the field element `0x02`).
#[inline]
pub fn xtime(byte: u8) -> u8 {
    let shifted = byte << 1;
    if byte & 0x80 != 0 {
        shifted ^ REDUCTION
    } else {
        shifted
    }
}

/// Field product of `a` and `b` by repeated doubling.
#[inline]
pub fn gmul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        a = xtime(a);
        b >>= 1;
    }
    product
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xtime_reduces_on_high_bit() {
        assert_eq!(xtime(0x57), 0xae);
        assert_eq!(xtime(0xae), 0x47);
        assert_eq!(xtime(0x80), 0x1b);
        assert_eq!(xtime(0x00), 0x00);
    }

    #[test]
    fn gmul_matches_fips_example() {
        // FIPS-197 section 4.2: {57} * {13} = {fe}
        assert_eq!(gmul(0x57, 0x13), 0xfe);
        assert_eq!(gmul(0x57, 0x83), 0xc1);
    }

    #[test]
    fn gmul_identities_hold_for_all_bytes() {
        for x in 0..=255u8 {
            assert_eq!(gmul(x, 1), x);
            assert_eq!(gmul(x, 0), 0);
            assert_eq!(gmul(x, 2), xtime(x));
            assert_eq!(gmul(x, 3), xtime(x) ^ x);
        }
    }

    #[test]
    fn gmul_is_commutative() {
        for a in 0..=255u8 {
            for b in 0..=255u8 {
                assert_eq!(gmul(a, b), gmul(b, a));
            }
        }
    }

    #[test]
    fn gmul_distributes_over_xor() {
        for a in (0..=255u8).step_by(7) {
            for b in 0..=255u8 {
                for c in (0..=255u8).step_by(13) {
                    assert_eq!(gmul(a, b ^ c), gmul(a, b) ^ gmul(a, c));
                }
            }
        }
    }

    #[test]
    fn every_nonzero_byte_has_an_inverse() {
        for a in 1..=255u8 {
            assert!((1..=255u8).any(|b| gmul(a, b) == 1), "no inverse for {a:#04x}");
        }
    }
}
