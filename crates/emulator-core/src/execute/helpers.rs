use crate::encoding::Profile;

/// Effective address of a base+offset operand.
///
/// Computed at 64 bits; the memory model range-checks the result.
#[must_use]
pub fn compute_effective_address(base: i32, offset: u16) -> i64 {
    i64::from(base) + i64::from(offset)
}

/// Display name of a register field for console prompts and warnings.
#[must_use]
pub fn register_label(profile: Profile, index: u8) -> String {
    profile
        .register_name(index)
        .map_or_else(|| format!("r{index}"), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_address_does_not_wrap() {
        assert_eq!(compute_effective_address(i32::MAX, 31), i64::from(i32::MAX) + 31);
        assert_eq!(compute_effective_address(-4, 2), -2);
    }

    #[test]
    fn unknown_register_fields_get_a_placeholder_label() {
        assert_eq!(register_label(Profile::Basic, 1), "B");
        assert_eq!(register_label(Profile::Basic, 5), "r5");
    }
}
