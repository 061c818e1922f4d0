//! Utilities in dysuc.
#![cfg(target_pointer_width = "64")]

/// Returns `ceil(x / y)`.
///
/// # Examples
///
/// ```
/// use dysuc::utils::ceiled_divide;
///
/// assert_eq!(ceiled_divide(10, 2), 5);
/// assert_eq!(ceiled_divide(10, 3), 4);
/// assert_eq!(ceiled_divide(0, 64), 0);
/// ```
///
/// # Panics
///
/// It will panic if `y == 0`.
pub const fn ceiled_divide(x: usize, y: usize) -> usize {
    (x + y - 1) / y
}

/// A debug view of a matrix-like structure for long arrays.
pub(crate) struct MatrixView<'a, T> {
    data: &'a [T],
    cols: usize,
}

impl<'a, T> MatrixView<'a, T> {
    /// Creates a new `MatrixView` from a slice and the number of columns.
    pub fn new(data: &'a [T], cols: usize) -> Self {
        assert!(cols > 0, "Number of columns must be greater than zero.");
        Self { data, cols }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for MatrixView<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "[")?;
            for row in self.data.chunks(self.cols) {
                write!(f, "    ")?;
                for (i, item) in row.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item:?}")?;
                }
                writeln!(f, ",")?;
            }
            write!(f, "]")
        } else {
            write!(f, "[{} items]", self.data.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_view_compact() {
        let data = [1u8, 2, 3];
        assert_eq!(format!("{:?}", MatrixView::new(&data, 2)), "[3 items]");
    }

    #[test]
    fn test_matrix_view_pretty() {
        let data = [1u8, 2, 3];
        assert_eq!(
            format!("{:#?}", MatrixView::new(&data, 2)),
            "[\n    1, 2,\n    3,\n]"
        );
    }
}
