//! Bracket-expression membership sets.
//!
//! A `%[...]` directive compiles its body into a 256-bit table indexed by
//! byte value. The table is built once per directive occurrence and is
//! immutable afterwards; matching is a single bit lookup.

/// 256-bit byte membership set, one bit per byte value.
///
/// Word layout matches the original's `unsigned int mask[256/32]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSet {
    bits: [u32; 8],
}

impl ClassSet {
    /// The empty set.
    pub const fn new() -> Self {
        Self { bits: [0; 8] }
    }

    /// Add a single byte value.
    pub fn insert(&mut self, b: u8) {
        self.bits[(b >> 5) as usize] |= 1 << (b & 0x1f);
    }

    /// Membership test.
    pub fn contains(&self, b: u8) -> bool {
        self.bits[(b >> 5) as usize] & (1 << (b & 0x1f)) != 0
    }

    /// Complement all 256 bits (applied once, after building, for `%[^...]`).
    pub fn complement(&mut self) {
        for word in &mut self.bits {
            *word = !*word;
        }
    }
}

impl Default for ClassSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile a bracket-expression body into a membership set.
///
/// `body` points at the first byte after `%[`. Returns the compiled set and
/// the number of body bytes consumed, including the terminating `]`.
/// Returns `None` if the expression is unterminated.
///
/// Rules, replicating the original scanner:
/// - A leading `^` negates the final set.
/// - The first `]` after `[` or `[^` is a literal member, not a terminator.
/// - `a-b` adds the inclusive range; ordering is not enforced (`b < a`
///   inserts `a` and `a+1`, a faithful historical detail).
/// - A `-` immediately before the terminating `]` is a literal member.
pub fn compile_class(body: &[u8]) -> Option<(ClassSet, usize)> {
    let mut set = ClassSet::new();
    let mut pos = 0;

    let negate = body.first() == Some(&b'^');
    if negate {
        pos += 1;
    }
    if body.get(pos) == Some(&b']') {
        set.insert(b']');
        pos += 1;
    }

    let mut terminated = false;
    while pos < body.len() {
        let lo = body[pos];
        if lo == b']' {
            terminated = true;
            break;
        }
        pos += 1;
        set.insert(lo);
        if body.get(pos) != Some(&b'-') {
            continue;
        }
        pos += 1;
        match body.get(pos) {
            // "a-" cut off at end of format: malformed.
            None => return None,
            // "a-]": the dash is a literal member and the class ends.
            Some(b']') => {
                set.insert(b'-');
                terminated = true;
                break;
            }
            Some(&hi) => {
                pos += 1;
                // do-while in the original: always inserts lo+1 even when
                // hi < lo.
                let mut b = lo;
                loop {
                    b = b.wrapping_add(1);
                    set.insert(b);
                    if b >= hi {
                        break;
                    }
                }
            }
        }
    }
    if !terminated {
        return None;
    }

    if negate {
        set.complement();
    }
    // pos is at the ']'; count it as consumed.
    Some((set, pos + 1))
}
