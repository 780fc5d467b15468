use std::ops;

use crate::dims::Dims;

/// Row-major 2D buffer, indexed by [`Dims`] as `(row, column)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    buf: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Array2D<T> {
    pub fn from_buf(buf: Vec<T>, rows: usize, cols: usize) -> Option<Self> {
        if buf.len() != rows * cols {
            return None;
        }

        Some(Self { buf, rows, cols })
    }

    pub fn size(&self) -> Dims {
        Dims(self.rows as i32, self.cols as i32)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn dim_to_idx(&self, pos: Dims) -> Option<usize> {
        if !pos.all_non_negative() {
            return None;
        }

        let Dims(r, c) = pos;
        let (r, c) = (r as usize, c as usize);

        if r >= self.rows || c >= self.cols {
            return None;
        }

        Some(r * self.cols + c)
    }

    pub fn idx_to_dim(&self, idx: usize) -> Option<Dims> {
        if idx >= self.buf.len() {
            return None;
        }

        Some(Dims((idx / self.cols) as i32, (idx % self.cols) as i32))
    }

    pub fn get(&self, pos: Dims) -> Option<&T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Dims) -> Option<&mut T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_dim(i))
    }

    pub fn row(&self, r: usize) -> Option<&[T]> {
        if r >= self.rows {
            return None;
        }

        Some(&self.buf[r * self.cols..(r + 1) * self.cols])
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.buf.chunks(self.cols.max(1))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Array2D<U> {
        Array2D {
            buf: self.buf.into_iter().map(f).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl<T: Clone> Array2D<T> {
    pub fn new(item: T, rows: usize, cols: usize) -> Self {
        Self {
            buf: vec![item; rows * cols],
            rows,
            cols,
        }
    }
}

impl<T> ops::Index<Dims> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Dims) -> &Self::Output {
        self.get(index).expect("Index out of bounds")
    }
}

impl<T> ops::IndexMut<Dims> for Array2D<T> {
    fn index_mut(&mut self, index: Dims) -> &mut Self::Output {
        self.get_mut(index).expect("Index out of bounds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        let arr = Array2D::new(0u8, 2, 3);
        assert_eq!(arr.dim_to_idx(Dims(1, 2)), Some(5));
        assert_eq!(arr.idx_to_dim(4), Some(Dims(1, 1)));
        assert_eq!(arr.dim_to_idx(Dims(2, 0)), None);
        assert_eq!(arr.dim_to_idx(Dims(0, -1)), None);
        assert_eq!(arr.idx_to_dim(6), None);
    }

    #[test]
    fn rows_are_slices() {
        let arr = Array2D::from_buf(vec![1, 2, 3, 4, 5, 6], 2, 3).unwrap();
        assert_eq!(arr.row(1), Some(&[4, 5, 6][..]));
        assert_eq!(arr.iter_rows().count(), 2);
        assert_eq!(arr[Dims(0, 1)], 2);
    }

    #[test]
    fn from_buf_checks_len() {
        assert!(Array2D::from_buf(vec![1, 2, 3], 2, 2).is_none());
    }
}
