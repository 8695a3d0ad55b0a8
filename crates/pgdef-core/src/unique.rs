//! Uniqueness checks for collections treated as sets.
//!
//! Equality is structural (`PartialEq`), so two check constraints with the
//! same content are duplicates even if they came from different places in
//! the document.

/// Positions of the first repeated element: `(first, repeat)`.
pub fn first_duplicate<T: PartialEq>(items: &[T]) -> Option<(usize, usize)> {
    items.iter().enumerate().find_map(|(j, item)| {
        items[..j]
            .iter()
            .position(|earlier| earlier == item)
            .map(|i| (i, j))
    })
}
