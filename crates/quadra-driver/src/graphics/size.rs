/// Smallest power of two that is `>= n`. Zero rounds up to one.
///
/// `None` when the result does not fit in `u32` (`n > 2^31`).
#[inline]
pub fn next_power_of_two(n: u32) -> Option<u32> {
    n.max(1).checked_next_power_of_two()
}

/// Padded texture size for a logical `width x height` image.
#[inline]
pub fn padded_size(width: u32, height: u32) -> Option<(u32, u32)> {
    Some((next_power_of_two(width)?, next_power_of_two(height)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn powers_of_two_are_unchanged() {
        for shift in 0..32 {
            let n = 1u32 << shift;
            assert_eq!(next_power_of_two(n), Some(n));
        }
    }

    #[test]
    fn rounds_up_to_next_power() {
        assert_eq!(next_power_of_two(3), Some(4));
        assert_eq!(next_power_of_two(60), Some(64));
        assert_eq!(next_power_of_two(100), Some(128));
        assert_eq!(next_power_of_two(1025), Some(2048));
    }

    #[test]
    fn zero_rounds_to_one() {
        assert_eq!(next_power_of_two(0), Some(1));
    }

    #[test]
    fn padded_is_smallest_power_covering_each_axis() {
        for w in 1..300u32 {
            let (pw, _) = padded_size(w, 1).unwrap();
            assert!(pw.is_power_of_two());
            assert!(pw >= w);
            assert!(pw / 2 < w, "{pw} is not the smallest power for {w}");
        }
    }

    #[test]
    fn padded_100x60_is_128x64() {
        assert_eq!(padded_size(100, 60), Some((128, 64)));
    }

    #[test]
    fn sizes_past_the_largest_u32_power_do_not_pad() {
        assert_eq!(next_power_of_two(1 << 31), Some(1 << 31));
        assert_eq!(next_power_of_two((1 << 31) + 1), None);
        assert_eq!(padded_size(3_000_000_000, 1), None);
        assert_eq!(padded_size(1, u32::MAX), None);
    }
}
