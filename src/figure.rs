use crate::engine::MAX_ATTEMPTS;

/// Gallows drawings indexed by attempts remaining: index 0 is the complete
/// figure, index 6 the empty gallows.
pub const STAGES: [&str; MAX_ATTEMPTS as usize + 1] = [
    r"
   --------
   |      |
   |      O
   |     \|/
   |      |
   |     / \
   -
",
    r"
   --------
   |      |
   |      O
   |     \|/
   |      |
   |     /
   -
",
    r"
   --------
   |      |
   |      O
   |     \|/
   |      |
   |
   -
",
    r"
   --------
   |      |
   |      O
   |     \|
   |      |
   |
   -
",
    r"
   --------
   |      |
   |      O
   |      |
   |      |
   |
   -
",
    r"
   --------
   |      |
   |      O
   |
   |
   |
   -
",
    r"
   --------
   |      |
   |
   |
   |
   |
   -
",
];

/// The drawing for `attempts_remaining`. Out-of-range values clamp to the
/// empty gallows.
#[must_use]
pub fn figure_for(attempts_remaining: u8) -> &'static str {
    if attempts_remaining > MAX_ATTEMPTS {
        log::warn!("attempts_remaining {attempts_remaining} out of range, clamping to {MAX_ATTEMPTS}");
    }
    STAGES[usize::from(attempts_remaining.min(MAX_ATTEMPTS))]
}
