/// Dense `n x n` matrix stored row-major in a single buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix<T> {
    n: usize,
    data: Vec<T>,
}

impl<T> SquareMatrix<T> {
    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn row(&self, i: usize) -> &[T] {
        assert!(i < self.n, "row index out of bounds");
        let start = i * self.n;
        &self.data[start..start + self.n]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        assert!(i < self.n, "row index out of bounds");
        let start = i * self.n;
        &mut self.data[start..start + self.n]
    }

    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i >= self.n || j >= self.n {
            return None;
        }
        self.data.get(i * self.n + j)
    }

    pub fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut T> {
        if i >= self.n || j >= self.n {
            return None;
        }
        self.data.get_mut(i * self.n + j)
    }
}

impl<T: Clone> SquareMatrix<T> {
    pub fn new_fill(n: usize, value: T) -> Self {
        let len = n.checked_mul(n).expect("matrix size overflow");
        Self {
            n,
            data: vec![value; len],
        }
    }
}

impl<T: Copy> SquareMatrix<T> {
    /// Copies the upper triangle onto the lower one so that `m[j][i] == m[i][j]`.
    pub fn mirror_upper(&mut self) {
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                self.data[j * self.n + i] = self.data[i * self.n + j];
            }
        }
    }
}

impl<T: PartialEq> SquareMatrix<T> {
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| {
            ((i + 1)..self.n).all(|j| self.data[i * self.n + j] == self.data[j * self.n + i])
        })
    }
}
