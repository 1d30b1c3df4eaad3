//! Unicode-aware text ordering.
//!
//! Plain `str` ordering compares code points, which puts "Álvarez" after
//! "Zamora". Names are compared here on their canonical decomposition with
//! combining marks dropped and letters lower-cased, so accented letters
//! sort next to their base letter. Exact code point order only breaks ties
//! between strings that are otherwise equal ("Martin" < "Martín").
//!
//! This is a simplification of full Unicode collation (UCA), not an
//! implementation of it:
//!
//! - Case ties go by code point, so uppercase sorts first ("Ana" <
//!   "ana"). UCA puts lowercase first.
//! - "ñ" loses its tilde and sorts as "n" ("Munoz" < "Muñoz" only on the
//!   tie-break, and "Ñúñez" sorts among the "N" names). The Spanish
//!   tailoring gives "ñ" its own place after "n".

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compare two strings the way a reader of a name list expects.
///
/// ```
/// use coworking_query::collate::compare;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare("Álvarez", "Zamora"), Ordering::Less);
/// assert_eq!(compare("beltrán", "Beltrán"), Ordering::Greater);
/// ```
#[must_use]
pub fn compare(a: &str, b: &str) -> Ordering {
    primary(a).cmp(primary(b)).then_with(|| a.cmp(b))
}

fn primary(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accents_sort_with_base_letter() {
        let mut names = vec!["Zamora", "Álvarez", "Beltrán", "Abad"];
        names.sort_by(|a, b| compare(a, b));
        assert_eq!(names, vec!["Abad", "Álvarez", "Beltrán", "Zamora"]);
    }

    #[test]
    fn test_case_insensitive_primary() {
        assert_eq!(compare("ana", "Bea"), Ordering::Less);
        assert_eq!(compare("Ana", "bea"), Ordering::Less);
    }

    #[test]
    fn test_ties_broken_by_code_points() {
        assert_eq!(compare("Martin", "Martín"), Ordering::Less);
        assert_eq!(compare("Martín", "Martín"), Ordering::Equal);
        // Precomposed and decomposed forms differ only in the tie-break.
        assert_ne!(compare("Mart\u{ed}n", "Marti\u{301}n"), Ordering::Equal);
        assert_eq!(
            primary("Mart\u{ed}n").collect::<String>(),
            primary("Marti\u{301}n").collect::<String>()
        );
    }

    #[test]
    fn test_case_tie_puts_uppercase_first() {
        assert_eq!(compare("Ana", "ana"), Ordering::Less);
    }

    #[test]
    fn test_enye_sorts_with_n() {
        let mut names = vec!["Nuria", "Ñúñez", "Noelia", "Olga"];
        names.sort_by(|a, b| compare(a, b));
        assert_eq!(names, vec!["Noelia", "Ñúñez", "Nuria", "Olga"]);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare("Ana", "Ana Beltrán"), Ordering::Less);
    }
}
