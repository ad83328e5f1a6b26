//! Character substitutions used to unmask obfuscated words.

/// A fixed mapping from substitute characters to the letters they may stand for.
///
/// Each substitute maps to one or more letters. The first letter is the canonical choice: the
/// [`Normalizer`] always picks it rather than branching into every combination, which keeps
/// normalization linear in the length of the word.
///
/// [`Normalizer`]: crate::normalizer::Normalizer
#[derive(Debug)]
pub struct SubstitutionTable {
    entries: &'static [(char, &'static [char])],
}

/// The table used by the crate.
pub static SUBSTITUTIONS: SubstitutionTable = SubstitutionTable {
    entries: &[
        ('$', &['s']),
        ('0', &['o']),
        ('1', &['i', 'l']),
        ('3', &['e']),
        ('4', &['a']),
        ('5', &['s']),
        ('7', &['t']),
        ('8', &['b']),
        ('@', &['a']),
    ],
};

impl SubstitutionTable {
    /// All letters `c` may stand for, or `None` if `c` is not a substitute.
    pub fn candidates(&self, c: char) -> Option<&'static [char]> {
        self.entries
            .binary_search_by_key(&c, |(substitute, _)| *substitute)
            .ok()
            .map(|index| self.entries[index].1)
    }

    /// The canonical letter `c` stands for.
    #[inline]
    pub fn canonical(&self, c: char) -> Option<char> {
        self.candidates(c)
            .and_then(|candidates| candidates.first().copied())
    }

    /// Returns whether `c` is a substitute.
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.candidates(c).is_some()
    }
}

#[cfg(test)]
mod tests {
    use crate::substitution::SUBSTITUTIONS;

    #[test]
    fn entries_are_sorted() {
        // `candidates()` relies on binary search.
        assert!(SUBSTITUTIONS
            .entries
            .windows(2)
            .all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn canonical() {
        assert_eq!(SUBSTITUTIONS.canonical('0'), Some('o'));
        assert_eq!(SUBSTITUTIONS.canonical('@'), Some('a'));
        assert_eq!(SUBSTITUTIONS.canonical('1'), Some('i'));
        assert_eq!(SUBSTITUTIONS.canonical('x'), None);
    }

    #[test]
    fn candidates() {
        assert_eq!(SUBSTITUTIONS.candidates('1'), Some(&['i', 'l'][..]));
        assert_eq!(SUBSTITUTIONS.candidates('2'), None);
    }

    #[test]
    fn contains() {
        assert!(SUBSTITUTIONS.contains('$'));
        assert!(!SUBSTITUTIONS.contains('#'));
    }
}
