pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

/// Moves a list cursor by `delta` rows, clamping at both ends.
pub fn step_clamped(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    index.saturating_add_signed(delta).min(len - 1)
}
