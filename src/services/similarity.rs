use std::cmp::Ordering;

use crate::{
    error::{AppError, AppResult},
    models::Neighbor,
    store::SimilarityMatrix,
};

/// Returns the `k` highest-scoring neighbors of `row_index`, best first.
///
/// Ties keep ascending column order. The top entry of the sorted row is
/// dropped as the query row itself; this is positional and is not checked
/// against `row_index`, so a matrix whose diagonal is not the row maximum will
/// lose its true best neighbor and may include the query row.
pub fn rank_neighbors(
    matrix: &SimilarityMatrix,
    row_index: usize,
    k: usize,
) -> AppResult<Vec<Neighbor>> {
    let row = matrix.row(row_index).ok_or(AppError::IndexOutOfRange {
        index: row_index,
        size: matrix.size(),
    })?;

    let mut scored: Vec<Neighbor> = row
        .iter()
        .enumerate()
        .map(|(row_index, &score)| Neighbor { row_index, score })
        .collect();

    // sort_by is stable, which keeps equal scores in index order
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    Ok(scored.into_iter().skip(1).take(k).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: Vec<Vec<f64>>) -> SimilarityMatrix {
        SimilarityMatrix::from_rows(rows).unwrap()
    }

    fn indices(neighbors: &[Neighbor]) -> Vec<usize> {
        neighbors.iter().map(|n| n.row_index).collect()
    }

    #[test]
    fn test_orders_by_descending_score() {
        let m = matrix(vec![
            vec![1.0, 0.2, 0.9],
            vec![0.2, 1.0, 0.1],
            vec![0.9, 0.1, 1.0],
        ]);
        let ranked = rank_neighbors(&m, 0, 10).unwrap();
        assert_eq!(indices(&ranked), vec![2, 1]);
        assert_eq!(ranked[0].score, 0.9);
    }

    #[test]
    fn test_ties_break_by_lower_index() {
        let m = matrix(vec![
            vec![1.0, 0.5, 0.5, 0.5],
            vec![0.5, 1.0, 0.0, 0.0],
            vec![0.5, 0.0, 1.0, 0.0],
            vec![0.5, 0.0, 0.0, 1.0],
        ]);
        let ranked = rank_neighbors(&m, 0, 3).unwrap();
        assert_eq!(indices(&ranked), vec![1, 2, 3]);
    }

    #[test]
    fn test_signed_zeros_tie() {
        let m = matrix(vec![
            vec![1.0, -0.0, 0.0, -0.0],
            vec![-0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
            vec![-0.0, 0.0, 0.0, 1.0],
        ]);
        let ranked = rank_neighbors(&m, 0, 3).unwrap();
        assert_eq!(indices(&ranked), vec![1, 2, 3]);
    }

    #[test]
    fn test_respects_k_and_small_matrices() {
        let m = matrix(vec![
            vec![1.0, 0.3, 0.7],
            vec![0.3, 1.0, 0.4],
            vec![0.7, 0.4, 1.0],
        ]);
        assert_eq!(rank_neighbors(&m, 1, 1).unwrap().len(), 1);
        assert_eq!(rank_neighbors(&m, 1, 10).unwrap().len(), 2);
        assert!(rank_neighbors(&m, 1, 0).unwrap().is_empty());
    }

    #[test]
    fn test_output_is_non_increasing_without_duplicates() {
        let m = matrix(vec![
            vec![1.0, 0.1, 0.8, 0.8, 0.3],
            vec![0.1, 1.0, 0.2, 0.2, 0.2],
            vec![0.8, 0.2, 1.0, 0.6, 0.6],
            vec![0.8, 0.2, 0.6, 1.0, 0.6],
            vec![0.3, 0.2, 0.6, 0.6, 1.0],
        ]);
        for row in 0..5 {
            for k in 0..6 {
                let ranked = rank_neighbors(&m, row, k).unwrap();
                assert!(ranked.len() <= k);
                assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
                let mut seen = indices(&ranked);
                seen.sort_unstable();
                seen.dedup();
                assert_eq!(seen.len(), ranked.len());
            }
        }
    }

    #[test]
    fn test_drops_first_position_even_when_not_self() {
        // Row 1's diagonal is below its best neighbor, so the positional
        // exclusion removes row 0 and keeps the query row.
        let m = matrix(vec![
            vec![1.0, 0.9, 0.0],
            vec![0.95, 0.5, 0.1],
            vec![0.0, 0.1, 1.0],
        ]);
        let ranked = rank_neighbors(&m, 1, 2).unwrap();
        assert_eq!(indices(&ranked), vec![1, 2]);
    }

    #[test]
    fn test_out_of_range() {
        let m = matrix(vec![vec![1.0]]);
        assert!(matches!(
            rank_neighbors(&m, 1, 5),
            Err(AppError::IndexOutOfRange { index: 1, size: 1 })
        ));
    }
}
