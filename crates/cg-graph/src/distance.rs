use cg_core::{Point2f, SquareMatrix};

/// Pairwise Euclidean distances, symmetric with an exact zero diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    m: SquareMatrix<f32>,
}

impl DistanceMatrix {
    /// Each unordered pair is evaluated once and mirrored, so symmetry holds
    /// bit-for-bit. Non-finite coordinates produce non-finite entries.
    pub fn build(points: &[Point2f]) -> Self {
        let n = points.len();
        let mut m = SquareMatrix::new_fill(n, 0.0_f32);

        for i in 0..n {
            let pi = points[i];
            let row = m.row_mut(i);
            for j in (i + 1)..n {
                row[j] = pi.distance(points[j]);
            }
        }
        m.mirror_upper();

        Self { m }
    }

    pub fn len(&self) -> usize {
        self.m.size()
    }

    pub fn is_empty(&self) -> bool {
        self.m.is_empty()
    }

    /// Distance between nodes `i` and `j`. Panics when out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.m.row(i)[j]
    }

    pub fn row(&self, i: usize) -> &[f32] {
        self.m.row(i)
    }

    pub fn as_matrix(&self) -> &SquareMatrix<f32> {
        &self.m
    }

    /// Other nodes ordered by ascending distance from `i`.
    ///
    /// Ties keep index order. Non-finite distances sort after every finite
    /// one, following IEEE total ordering.
    pub fn ranked_neighbors(&self, i: usize) -> Vec<usize> {
        let row = self.row(i);
        let mut order: Vec<usize> = (0..row.len()).filter(|&j| j != i).collect();
        // `abs` clears the NaN sign bit, which differs between platforms.
        order.sort_by(|&a, &b| row[a].abs().total_cmp(&row[b].abs()));
        order
    }
}

#[cfg(test)]
mod tests {
    use cg_core::Point2f;

    use super::DistanceMatrix;

    fn p(x: f32, y: f32) -> Point2f {
        Point2f::new(x, y)
    }

    #[test]
    fn three_point_distances() {
        let d = DistanceMatrix::build(&[p(0.0, 0.0), p(3.0, 4.0), p(100.0, 100.0)]);

        assert_eq!(d.len(), 3);
        assert_eq!(d.get(0, 1), 5.0);
        assert!((d.get(0, 2) - 141.421_36).abs() < 1e-3);
        assert!((d.get(1, 2) - 136.473_4).abs() < 1e-3);
        assert!(d.as_matrix().is_symmetric());
        for i in 0..3 {
            assert_eq!(d.get(i, i), 0.0);
        }
    }

    #[test]
    fn degenerate_sizes() {
        let empty = DistanceMatrix::build(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.as_matrix().data().len(), 0);

        let single = DistanceMatrix::build(&[p(4.0, 2.0)]);
        assert_eq!(single.len(), 1);
        assert_eq!(single.get(0, 0), 0.0);
        assert!(single.ranked_neighbors(0).is_empty());
    }

    #[test]
    fn nan_propagates_but_diagonal_stays_zero() {
        let d = DistanceMatrix::build(&[p(0.0, 0.0), p(f32::NAN, 1.0), p(1.0, 0.0)]);

        assert!(d.get(0, 1).is_nan());
        assert!(d.get(1, 0).is_nan());
        assert!(d.get(2, 1).is_nan());
        assert_eq!(d.get(1, 1), 0.0);
        assert_eq!(d.get(0, 2), 1.0);
    }

    #[test]
    fn ranking_is_stable_and_excludes_self() {
        // 1 and 3 are equidistant from 0; 2 is non-finite.
        let d = DistanceMatrix::build(&[
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(f32::INFINITY, 0.0),
            p(0.0, 2.0),
            p(1.0, 0.0),
        ]);

        assert_eq!(d.ranked_neighbors(0), vec![4, 1, 3, 2]);
        assert_eq!(d.ranked_neighbors(2), vec![0, 1, 3, 4]);
    }
}
