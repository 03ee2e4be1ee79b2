// 🔗 Population Pair Enumerator
//
// Every unordered pair (i < j) exactly once, in population order.
// This is O(n²) and the dominant cost of a run: fuzzy ratios and
// substring checks cannot be reduced to a sortable or hashable key,
// so there is no blocking/indexing shortcut.

/// Number of unordered pairs in a population of `n`
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Iterate `(left, right)` for all `i < j`
pub fn enumerate_pairs<T>(population: &[T]) -> impl Iterator<Item = (&T, &T)> + '_ {
    population
        .iter()
        .enumerate()
        .flat_map(move |(i, left)| population[i + 1..].iter().map(move |right| (left, right)))
}

/// Same enumeration, as index pairs (used to split work across threads)
pub fn enumerate_index_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(2), 1);
        assert_eq!(pair_count(5), 10);
    }

    #[test]
    fn test_order_follows_population() {
        let pairs: Vec<(&char, &char)> = enumerate_pairs(&['a', 'b', 'c']).collect();
        assert_eq!(pairs, vec![(&'a', &'b'), (&'a', &'c'), (&'b', &'c')]);
    }

    #[test]
    fn test_no_repeats_no_self_pairs() {
        let population: Vec<usize> = (0..12).collect();
        let pairs: Vec<(usize, usize)> = enumerate_pairs(&population).map(|(a, b)| (*a, *b)).collect();

        assert_eq!(pairs.len(), pair_count(12));
        assert!(pairs.iter().all(|(a, b)| a < b));
        let unique: HashSet<_> = pairs.iter().collect();
        assert_eq!(unique.len(), pairs.len());
    }

    #[test]
    fn test_index_pairs_match_value_pairs() {
        let population = ["x", "y", "z", "w"];
        let by_value: Vec<_> = enumerate_pairs(&population).collect();
        let by_index: Vec<_> = enumerate_index_pairs(population.len())
            .map(|(i, j)| (&population[i], &population[j]))
            .collect();
        assert_eq!(by_value, by_index);
    }
}
