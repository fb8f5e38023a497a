// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chunking helper for bulk database operations.
//!
//! Backends limit the number of bind parameters per statement, so bulk
//! inserts and `IN (...)` lookups run in fixed-size chunks.

/// Default chunk size for bulk operations.
pub const DEFAULT_CHUNK_SIZE: usize = 50;

/// Splits a slice into chunks of at most `size` elements.
///
/// The last chunk holds the remainder. An empty input yields no chunks.
///
/// # Arguments
///
/// * `items` - The items to split
/// * `size` - Maximum chunk length (0 is treated as 1)
#[must_use]
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    let size: usize = size.max(1);
    items.chunks(size).map(<[T]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_with_remainder() {
        let chunks: Vec<Vec<i32>> = chunk(&[1, 2, 3, 4, 5], 2);
        assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5]]);
    }

    #[test]
    fn test_chunk_empty_input() {
        let chunks: Vec<Vec<i32>> = chunk(&[], 2);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_chunk_smaller_than_size() {
        let chunks: Vec<Vec<i32>> = chunk(&[1, 2], 5);
        assert_eq!(chunks, vec![vec![1, 2]]);
    }

    #[test]
    fn test_chunk_size_one() {
        let chunks: Vec<Vec<i32>> = chunk(&[1, 2, 3], 1);
        assert_eq!(chunks, vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn test_chunk_divides_evenly() {
        let chunks: Vec<Vec<i32>> = chunk(&[1, 2, 3, 4], 2);
        assert_eq!(chunks, vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_chunk_size_zero_treated_as_one() {
        let chunks: Vec<Vec<i32>> = chunk(&[1, 2], 0);
        assert_eq!(chunks, vec![vec![1], vec![2]]);
    }
}
