//! Dynamically sized matrices with shape-checked algebra.
//!
//! Elements live in a single row-major buffer. Every operation that needs a
//! particular shape validates it and reports a [`MatrixError`] otherwise.
//! Pure operations return a new matrix; the in-place helpers (`transpose`,
//! `invert`, `try_add_assign`, ...) replace `self` with the result of the pure
//! computation and leave it untouched on error.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MatrixError, Result};
use crate::float::{approx_eq, are_equal};
use crate::vector::Vector3;

/// A row-major matrix of `f64` values.
///
/// Serializes as a list of rows. Deserialization rejects ragged rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    rows: usize,
    columns: usize,
    data: Vec<f64>,
}

/// Orientation of a 3-element vector stored in a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    /// Shape (1, 3).
    Row,
    /// Shape (3, 1).
    Column,
}

impl Matrix {
    /// Create a zero-filled `rows x columns` matrix.
    ///
    /// # Panics
    ///
    /// Panics if `rows * columns` overflows `usize`. Use [`Matrix::try_new`]
    /// for untrusted dimensions.
    pub fn new(rows: usize, columns: usize) -> Self {
        match Self::try_new(rows, columns) {
            Ok(m) => m,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create a zero-filled `rows x columns` matrix, failing with
    /// [`MatrixError::WrongSize`] if the element count overflows `usize`.
    pub fn try_new(rows: usize, columns: usize) -> Result<Self> {
        let len = rows
            .checked_mul(columns)
            .ok_or(MatrixError::WrongSize("element count overflows usize"))?;
        Ok(Self {
            rows,
            columns,
            data: vec![0.0; len],
        })
    }

    /// Create a `rows x columns` matrix from nested row literals.
    ///
    /// Rows and columns not covered by `values` stay zero. Fails with
    /// [`MatrixError::WrongInitializerList`] if `values` has more rows, or any
    /// row has more columns, than declared.
    ///
    /// ```
    /// use luxel_math::Matrix;
    ///
    /// let m = Matrix::from_rows(2, 2, &[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(m.determinant().unwrap(), -2.0);
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: usize, columns: usize, values: &[R]) -> Result<Self> {
        if values.len() > rows {
            return Err(MatrixError::WrongInitializerList { rows, columns });
        }
        let mut m = Self::try_new(rows, columns)?;
        for (i, row) in values.iter().enumerate() {
            let row = row.as_ref();
            if row.len() > columns {
                return Err(MatrixError::WrongInitializerList { rows, columns });
            }
            for (j, &v) in row.iter().enumerate() {
                *m.at_mut(i, j) = v;
            }
        }
        Ok(m)
    }

    /// The `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            *m.at_mut(i, i) = 1.0;
        }
        m
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// Element at `(row, column)`.
    pub fn value(&self, row: usize, column: usize) -> Result<f64> {
        self.check_bounds(row, column)?;
        Ok(self.at(row, column))
    }

    /// Overwrite the element at `(row, column)`.
    pub fn set_value(&mut self, row: usize, column: usize, value: f64) -> Result<()> {
        self.check_bounds(row, column)?;
        *self.at_mut(row, column) = value;
        Ok(())
    }

    /// Convert a (1,3) or (3,1) matrix to a [`Vector3`].
    pub fn to_vector3(&self) -> Result<Vector3> {
        Vector3::try_from(self)
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Element-wise sum. Shapes must match.
    pub fn checked_add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "can't add matrices", |a, b| a + b)
    }

    /// Element-wise difference. Shapes must match.
    pub fn checked_sub(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "can't subtract matrices", |a, b| a - b)
    }

    /// Multiply every element by `scalar`. The matrix must not be empty.
    pub fn checked_scale(&self, scalar: f64) -> Result<Matrix> {
        if self.is_empty() {
            return Err(MatrixError::NotInitialized("can't multiply by a scalar"));
        }
        Ok(self.map(|v| v * scalar))
    }

    /// Matrix product `self * other`.
    ///
    /// Requires `self.columns() == other.rows()` and a non-empty inner
    /// dimension. Computed with the plain triple loop.
    pub fn checked_mul(&self, other: &Matrix) -> Result<Matrix> {
        if self.columns == 0 || self.columns != other.rows {
            return Err(MatrixError::WrongSizesForProduct {
                left_rows: self.rows,
                left_columns: self.columns,
                right_rows: other.rows,
                right_columns: other.columns,
            });
        }

        let mut c = Matrix::new(self.rows, other.columns);
        for i in 0..self.rows {
            for j in 0..other.columns {
                let mut sum = 0.0;
                for k in 0..other.rows {
                    sum += self.at(i, k) * other.at(k, j);
                }
                *c.at_mut(i, j) = sum;
            }
        }
        Ok(c)
    }

    /// Translate by `offset`, i.e. element-wise sum. Shapes must match.
    pub fn translated(&self, offset: &Matrix) -> Result<Matrix> {
        self.zip_with(offset, "can't translate", |a, b| a + b)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Transposed copy. The matrix must not be empty.
    pub fn transposed(&self) -> Result<Matrix> {
        if self.is_empty() {
            return Err(MatrixError::NotInitialized("impossible to transpose the matrix"));
        }
        let mut t = Matrix::new(self.columns, self.rows);
        for i in 0..self.rows {
            for j in 0..self.columns {
                *t.at_mut(j, i) = self.at(i, j);
            }
        }
        Ok(t)
    }

    /// Component-wise rounding to the nearest integer.
    pub fn rounded(&self) -> Matrix {
        self.map(f64::round)
    }

    /// Determinant of a 2x2 or 3x3 matrix.
    pub fn determinant(&self) -> Result<f64> {
        match (self.rows, self.columns) {
            (3, 3) => {
                let a = |i, j| self.at(i, j);
                let mut det = a(0, 0) * a(1, 1) * a(2, 2);
                det -= a(2, 0) * a(1, 1) * a(0, 2);
                det += a(0, 1) * a(1, 2) * a(2, 0);
                det -= a(2, 1) * a(1, 2) * a(0, 0);
                det += a(0, 2) * a(1, 0) * a(2, 1);
                det -= a(2, 2) * a(1, 0) * a(0, 1);
                Ok(det)
            }
            (2, 2) => Ok(self.at(0, 0) * self.at(1, 1) - self.at(0, 1) * self.at(1, 0)),
            _ => Err(MatrixError::WrongSize(
                "need a (2,2) or (3,3) matrix to get the determinant",
            )),
        }
    }

    /// Inverse of a 3x3 matrix.
    ///
    /// Builds the cofactor matrix from the nine 2x2 minors, transposes it and
    /// scales by `1 / det`. Only an exactly zero determinant is rejected.
    pub fn inverse(&self) -> Result<Matrix> {
        if self.rows != 3 || self.columns != 3 {
            return Err(MatrixError::WrongSize("need a (3,3) matrix to invert it"));
        }

        let det = self.determinant()?;
        if det == 0.0 {
            debug!("refusing to invert a singular 3x3 matrix");
            return Err(MatrixError::NotInvertible);
        }

        let mut cofactors = Matrix::new(3, 3);
        for i in 0..3 {
            for j in 0..3 {
                let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
                *cofactors.at_mut(i, j) = sign * self.minor(i, j).determinant()?;
            }
        }

        cofactors.transposed()?.checked_scale(1.0 / det)
    }

    /// The 2x2 matrix left after deleting `row` and `column` from a 3x3.
    fn minor(&self, row: usize, column: usize) -> Matrix {
        let mut m = Matrix::new(2, 2);
        let keep = |skip: usize| (0..3).filter(move |&k| k != skip);
        for (mi, i) in keep(row).enumerate() {
            for (mj, j) in keep(column).enumerate() {
                *m.at_mut(mi, mj) = self.at(i, j);
            }
        }
        m
    }

    // =========================================================================
    // Vector operations
    // =========================================================================

    /// Euclidean norm of a (1,3) or (3,1) vector.
    pub fn norm(&self) -> Result<f64> {
        self.orientation("need a Vector3 to get the norm")?;
        Ok(self.data.iter().map(|v| v * v).sum::<f64>().sqrt())
    }

    /// Copy of a (1,3) or (3,1) vector divided by its norm.
    ///
    /// The input is never modified.
    pub fn normalized(&self) -> Result<Matrix> {
        let norm = self.norm()?;
        Ok(self.map(|v| v / norm))
    }

    /// Dot product of two 3-vectors with the same orientation.
    pub fn dot(&self, other: &Matrix) -> Result<f64> {
        const WHAT: &str = "for the scalar product";
        if self.orientation(WHAT)? != other.orientation(WHAT)? {
            return Err(MatrixError::NotVector3(WHAT));
        }
        Ok(self.data.iter().zip(&other.data).map(|(a, b)| a * b).sum())
    }

    /// Cross product of two 3-vectors with the same orientation.
    ///
    /// The result keeps the operands' orientation.
    pub fn cross(&self, other: &Matrix) -> Result<Matrix> {
        const WHAT: &str = "for the vector product";
        let orientation = self.orientation(WHAT)?;
        if orientation != other.orientation(WHAT)? {
            return Err(MatrixError::NotVector3(WHAT));
        }
        let c = self.to_vector3()?.cross(&other.to_vector3()?);
        Ok(Self::with_orientation(c, orientation))
    }

    /// Reflect `incident` about `normal`: `I - 2 (I . N) N` on the normalized inputs.
    ///
    /// Both operands must be 3-vectors ([`MatrixError::WrongSize`] otherwise)
    /// of the same orientation ([`MatrixError::NotSameSize`] otherwise).
    pub fn reflection(incident: &Matrix, normal: &Matrix) -> Result<Matrix> {
        const WHAT: &str = "must be (1,3) or (3,1) to calculate the reflection";
        let (Ok(incident_orientation), Ok(normal_orientation)) =
            (incident.orientation(WHAT), normal.orientation(WHAT))
        else {
            return Err(MatrixError::WrongSize(WHAT));
        };
        if incident_orientation != normal_orientation {
            return Err(MatrixError::NotSameSize(
                "can't reflect a row vector about a column vector",
            ));
        }

        let incident = incident.normalized()?;
        let normal = normal.normalized()?;
        let projection = 2.0 * incident.dot(&normal)?;
        incident.checked_sub(&normal.checked_scale(projection)?)
    }

    // =========================================================================
    // Transformations of 3-vectors
    // =========================================================================

    /// Rotate a 3-vector about the X axis by `angle` radians.
    pub fn rotated_x(&self, angle: f64) -> Result<Matrix> {
        let (s, c) = angle.sin_cos();
        let r = [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]];
        self.apply_linear(&r, "need a Vector3 to do a rotation")
    }

    /// Rotate a 3-vector about the Y axis by `angle` radians.
    pub fn rotated_y(&self, angle: f64) -> Result<Matrix> {
        let (s, c) = angle.sin_cos();
        let r = [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]];
        self.apply_linear(&r, "need a Vector3 to do a rotation")
    }

    /// Rotate a 3-vector about the Z axis by `angle` radians.
    pub fn rotated_z(&self, angle: f64) -> Result<Matrix> {
        let (s, c) = angle.sin_cos();
        let r = [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]];
        self.apply_linear(&r, "need a Vector3 to do a rotation")
    }

    /// Scale a 3-vector by `(x, y, z)`.
    pub fn scaled_by(&self, x: f64, y: f64, z: f64) -> Result<Matrix> {
        let s = [[x, 0.0, 0.0], [0.0, y, 0.0], [0.0, 0.0, z]];
        self.apply_linear(&s, "need a Vector3 to scale")
    }

    /// Multiply a 3-vector by a 3x3 matrix, keeping its orientation.
    ///
    /// Row vectors are transposed to columns for the product and back after.
    fn apply_linear(&self, linear: &[[f64; 3]; 3], what: &'static str) -> Result<Matrix> {
        let orientation = self.orientation(what)?;
        let linear = Matrix::from_rows(3, 3, linear)?;
        match orientation {
            Orientation::Column => linear.checked_mul(self),
            Orientation::Row => linear.checked_mul(&self.transposed()?)?.transposed(),
        }
    }

    // =========================================================================
    // In-place helpers
    // =========================================================================

    /// Replace `self` with `self + other`.
    pub fn try_add_assign(&mut self, other: &Matrix) -> Result<&mut Self> {
        *self = self.checked_add(other)?;
        Ok(self)
    }

    /// Replace `self` with `self - other`.
    pub fn try_sub_assign(&mut self, other: &Matrix) -> Result<&mut Self> {
        *self = self.checked_sub(other)?;
        Ok(self)
    }

    /// Replace `self` with `self * other`.
    pub fn try_mul_assign(&mut self, other: &Matrix) -> Result<&mut Self> {
        *self = self.checked_mul(other)?;
        Ok(self)
    }

    /// Replace `self` with `self * scalar`.
    pub fn try_scale_assign(&mut self, scalar: f64) -> Result<&mut Self> {
        *self = self.checked_scale(scalar)?;
        Ok(self)
    }

    /// Transpose in place.
    pub fn transpose(&mut self) -> Result<&mut Self> {
        *self = self.transposed()?;
        Ok(self)
    }

    /// Normalize a 3-vector in place.
    pub fn normalize(&mut self) -> Result<&mut Self> {
        *self = self.normalized()?;
        Ok(self)
    }

    /// Invert a 3x3 matrix in place.
    pub fn invert(&mut self) -> Result<&mut Self> {
        *self = self.inverse()?;
        Ok(self)
    }

    /// Round every component in place.
    pub fn round(&mut self) -> &mut Self {
        *self = self.rounded();
        self
    }

    /// Translate in place.
    pub fn translate(&mut self, offset: &Matrix) -> Result<&mut Self> {
        *self = self.translated(offset)?;
        Ok(self)
    }

    /// Rotate a 3-vector about the X axis in place.
    pub fn rotate_x(&mut self, angle: f64) -> Result<&mut Self> {
        *self = self.rotated_x(angle)?;
        Ok(self)
    }

    /// Rotate a 3-vector about the Y axis in place.
    pub fn rotate_y(&mut self, angle: f64) -> Result<&mut Self> {
        *self = self.rotated_y(angle)?;
        Ok(self)
    }

    /// Rotate a 3-vector about the Z axis in place.
    pub fn rotate_z(&mut self, angle: f64) -> Result<&mut Self> {
        *self = self.rotated_z(angle)?;
        Ok(self)
    }

    /// Scale a 3-vector in place.
    pub fn scale_by(&mut self, x: f64, y: f64, z: f64) -> Result<&mut Self> {
        *self = self.scaled_by(x, y, z)?;
        Ok(self)
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// True if shapes match and every pair of components differs by at most `precision`.
    pub fn approx_eq(&self, other: &Matrix, precision: f64) -> bool {
        self.rows == other.rows
            && self.columns == other.columns
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(&a, &b)| approx_eq(a, b, precision))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    #[inline]
    fn at(&self, row: usize, column: usize) -> f64 {
        self.data[row * self.columns + column]
    }

    #[inline]
    fn at_mut(&mut self, row: usize, column: usize) -> &mut f64 {
        &mut self.data[row * self.columns + column]
    }

    fn check_bounds(&self, row: usize, column: usize) -> Result<()> {
        if row >= self.rows || column >= self.columns {
            return Err(MatrixError::WrongCoordinates {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }

    fn orientation(&self, what: &'static str) -> Result<Orientation> {
        match (self.rows, self.columns) {
            (1, 3) => Ok(Orientation::Row),
            (3, 1) => Ok(Orientation::Column),
            _ => Err(MatrixError::NotVector3(what)),
        }
    }

    fn with_orientation(v: Vector3, orientation: Orientation) -> Matrix {
        let (rows, columns) = match orientation {
            Orientation::Row => (1, 3),
            Orientation::Column => (3, 1),
        };
        Matrix {
            rows,
            columns,
            data: vec![v.x(), v.y(), v.z()],
        }
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Matrix {
        Matrix {
            rows: self.rows,
            columns: self.columns,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    fn zip_with(
        &self,
        other: &Matrix,
        what: &'static str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Matrix> {
        if self.rows != other.rows || self.columns != other.columns {
            return Err(MatrixError::NotSameSize(what));
        }
        Ok(Matrix {
            rows: self.rows,
            columns: self.columns,
            data: self.data.iter().zip(&other.data).map(|(&a, &b)| f(a, b)).collect(),
        })
    }
}

/// Structural equality; components compare with [`are_equal`].
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.columns == other.columns
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(&a, &b)| are_equal(a, b))
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            for j in 0..self.columns {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.at(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != columns) {
            return Err(MatrixError::WrongInitializerList {
                rows: rows.len(),
                columns,
            });
        }
        Matrix::from_rows(rows.len(), columns, rows.as_slice())
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(m: Matrix) -> Self {
        if m.columns == 0 {
            return vec![Vec::new(); m.rows];
        }
        m.data.chunks(m.columns).map(<[f64]>::to_vec).collect()
    }
}

impl From<Vector3> for Matrix {
    /// A (1,3) row matrix.
    fn from(v: Vector3) -> Self {
        Matrix::with_orientation(v, Orientation::Row)
    }
}
