//! Fixed-size matrix and vector types.
//!
//! All matrices are stored **column-major** as an array of columns: element `(row, col)` of an
//! `N x N` matrix lives at flat index `col * N + row`. This is the layout the host hands over, so
//! a flat `&[f32]` of the right length can be reinterpreted in place with [`Mat3::view`] and friends.
//!
//! The types are plain `Copy` data with no heap storage.

use crate::error::LinalgError;

macro_rules! define_square_matrix {
    (
        $(#[$meta:meta])*
        $name:ident,
        $n:literal,
        $len:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(pub [[f32; $n]; $n]);

        impl $name {
            /// Number of rows (and columns).
            pub const DIM: usize = $n;

            /// Number of elements in the flat column-major representation.
            pub const LEN: usize = $len;

            /// Zero matrix.
            pub const ZERO: Self = Self([[0.0; $n]; $n]);

            /// Matrix with every element set to NaN, the failure sentinel.
            pub const NAN: Self = Self([[f32::NAN; $n]; $n]);

            /// Identity matrix.
            pub const IDENTITY: Self = {
                let mut cols = [[0.0; $n]; $n];
                let mut i = 0;
                while i < $n {
                    cols[i][i] = 1.0;
                    i += 1;
                }
                Self(cols)
            };

            /// Create a new matrix from column vectors.
            #[inline]
            pub const fn from_cols(cols: [[f32; $n]; $n]) -> Self {
                Self(cols)
            }

            /// Create a new matrix from row vectors.
            #[inline]
            pub fn from_rows(rows: [[f32; $n]; $n]) -> Self {
                Self(rows).transpose()
            }

            /// Create a new matrix by copying a column-major slice.
            ///
            /// # Errors
            ///
            /// Returns [`LinalgError::InvalidLength`] if the slice does not hold exactly
            #[doc = concat!("`", stringify!($len), "` elements.")]
            pub fn from_col_major_slice(data: &[f32]) -> Result<Self, LinalgError> {
                Ok(*Self::view(data)?)
            }

            /// Borrow a column-major slice as a matrix without copying.
            ///
            /// # Errors
            ///
            /// Returns [`LinalgError::InvalidLength`] if the slice has the wrong length.
            pub fn view(data: &[f32]) -> Result<&Self, LinalgError> {
                check_len(data.len(), $len)?;
                // SAFETY: the type is repr(transparent) over a contiguous array of `$len` f32 with
                // the same alignment as f32, and the length was checked above.
                Ok(unsafe { &*(data.as_ptr() as *const Self) })
            }

            /// Mutably borrow a column-major slice as a matrix without copying.
            ///
            /// # Errors
            ///
            /// Returns [`LinalgError::InvalidLength`] if the slice has the wrong length.
            pub fn view_mut(data: &mut [f32]) -> Result<&mut Self, LinalgError> {
                check_len(data.len(), $len)?;
                // SAFETY: same layout argument as `view`; the borrow is unique.
                Ok(unsafe { &mut *(data.as_mut_ptr() as *mut Self) })
            }

            /// Get the element at `(row, col)`.
            #[inline]
            pub fn get(&self, row: usize, col: usize) -> f32 {
                self.0[col][row]
            }

            /// Set the element at `(row, col)`.
            #[inline]
            pub fn set(&mut self, row: usize, col: usize, value: f32) {
                self.0[col][row] = value;
            }

            /// Transpose the matrix.
            pub fn transpose(&self) -> Self {
                let mut out = Self::ZERO;
                for (c, col) in self.0.iter().enumerate() {
                    for (r, &v) in col.iter().enumerate() {
                        out.0[r][c] = v;
                    }
                }
                out
            }

            /// The elements in column-major order.
            #[inline]
            pub fn as_slice(&self) -> &[f32] {
                self.0.as_flattened()
            }

            /// The elements in column-major order, mutably.
            #[inline]
            pub fn as_mut_slice(&mut self) -> &mut [f32] {
                self.0.as_flattened_mut()
            }

            /// Overwrite every element with `value`.
            #[inline]
            pub fn fill(&mut self, value: f32) {
                self.as_mut_slice().fill(value);
            }

            /// Check if all elements are finite.
            #[inline]
            pub fn is_finite(&self) -> bool {
                self.as_slice().iter().all(|v| v.is_finite())
            }

            /// Check if any element is NaN.
            #[inline]
            pub fn has_nan(&self) -> bool {
                self.as_slice().iter().any(|v| v.is_nan())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl std::ops::Index<(usize, usize)> for $name {
            type Output = f32;

            #[inline]
            fn index(&self, (row, col): (usize, usize)) -> &f32 {
                &self.0[col][row]
            }
        }

        impl std::ops::IndexMut<(usize, usize)> for $name {
            #[inline]
            fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
                &mut self.0[col][row]
            }
        }

        impl From<[[f32; $n]; $n]> for $name {
            #[inline]
            fn from(cols: [[f32; $n]; $n]) -> Self {
                Self(cols)
            }
        }

        impl From<$name> for [[f32; $n]; $n] {
            #[inline]
            fn from(m: $name) -> Self {
                m.0
            }
        }
    };
}

define_square_matrix!(
    /// 3x3 single precision matrix, used as a 2D projective transform.
    Mat3,
    3,
    9
);

define_square_matrix!(
    /// 8x8 single precision matrix, the left-hand side of a homography system.
    Mat8,
    8,
    64
);

/// 8-vector holding the free parameters of a homography or the right-hand side of its system.
///
/// As parameters the order is row-major over the 3x3 transform with `h33 = 1` implied:
/// `[h11, h12, h13, h21, h22, h23, h31, h32]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Vec8(pub [f32; 8]);

impl Vec8 {
    /// Number of elements.
    pub const LEN: usize = 8;

    /// Zero vector.
    pub const ZERO: Self = Self([0.0; 8]);

    /// Vector with every element set to NaN, the failure sentinel.
    pub const NAN: Self = Self([f32::NAN; 8]);

    /// Create a new vector by copying a slice.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::InvalidLength`] if the slice does not hold exactly 8 elements.
    pub fn from_slice(data: &[f32]) -> Result<Self, LinalgError> {
        Ok(*Self::view(data)?)
    }

    /// Borrow a slice as a vector without copying.
    pub fn view(data: &[f32]) -> Result<&Self, LinalgError> {
        check_len(data.len(), Self::LEN)?;
        // SAFETY: repr(transparent) over [f32; 8], length checked above.
        Ok(unsafe { &*(data.as_ptr() as *const Self) })
    }

    /// Mutably borrow a slice as a vector without copying.
    pub fn view_mut(data: &mut [f32]) -> Result<&mut Self, LinalgError> {
        check_len(data.len(), Self::LEN)?;
        // SAFETY: repr(transparent) over [f32; 8], length checked above, unique borrow.
        Ok(unsafe { &mut *(data.as_mut_ptr() as *mut Self) })
    }

    /// The elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Overwrite every element with `value`.
    #[inline]
    pub fn fill(&mut self, value: f32) {
        self.0.fill(value);
    }

    /// Check if all elements are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Check if any element is NaN.
    #[inline]
    pub fn has_nan(&self) -> bool {
        self.0.iter().any(|v| v.is_nan())
    }

    /// Assemble the 3x3 transform from the 8 parameters, setting `h33 = 1`.
    pub fn to_homography(&self) -> Mat3 {
        let h = &self.0;
        Mat3::from_rows([[h[0], h[1], h[2]], [h[3], h[4], h[5]], [h[6], h[7], 1.0]])
    }
}

impl std::ops::Index<usize> for Vec8 {
    type Output = f32;

    #[inline]
    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

impl std::ops::IndexMut<usize> for Vec8 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.0[index]
    }
}

impl From<[f32; 8]> for Vec8 {
    #[inline]
    fn from(v: [f32; 8]) -> Self {
        Self(v)
    }
}

impl From<Vec8> for [f32; 8] {
    #[inline]
    fn from(v: Vec8) -> Self {
        v.0
    }
}

#[inline]
fn check_len(actual: usize, expected: usize) -> Result<(), LinalgError> {
    if actual != expected {
        return Err(LinalgError::InvalidLength { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mat3_column_major_layout() -> Result<(), LinalgError> {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let m = Mat3::view(&data)?;
        // first column is [1, 2, 3]
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(1, 0), 2.0);
        assert_eq!(m.get(2, 0), 3.0);
        assert_eq!(m[(0, 1)], 4.0);
        assert_eq!(m[(0, 2)], 7.0);
        assert_eq!(m.as_slice(), &data);
        Ok(())
    }

    #[test]
    fn test_mat3_from_rows() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(m.get(0, 1), 2.0);
        assert_eq!(m.get(1, 0), 4.0);
        assert_eq!(m.as_slice(), &[1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_identity() {
        assert_eq!(
            Mat3::IDENTITY.as_slice(),
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
        );
        for i in 0..8 {
            for j in 0..8 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(Mat8::IDENTITY.get(i, j), expected);
            }
        }
    }

    #[test]
    fn test_view_mut_writes_through() -> Result<(), LinalgError> {
        let mut data = [0.0f32; 64];
        {
            let m = Mat8::view_mut(&mut data)?;
            m.set(1, 2, 5.0);
        }
        assert_eq!(data[2 * 8 + 1], 5.0);
        Ok(())
    }

    #[test]
    fn test_view_wrong_length() {
        let data = [0.0f32; 8];
        assert_eq!(
            Mat3::view(&data),
            Err(LinalgError::InvalidLength {
                expected: 9,
                actual: 8
            })
        );
        assert!(Vec8::view(&data[..7]).is_err());
        assert!(Mat8::from_col_major_slice(&data).is_err());
    }

    #[test]
    fn test_nan_sentinels() {
        assert!(Mat3::NAN.as_slice().iter().all(|v| v.is_nan()));
        assert!(Vec8::NAN.has_nan());
        assert!(!Mat8::IDENTITY.has_nan());
        assert!(!Mat3::NAN.is_finite());
    }

    #[test]
    fn test_to_homography() {
        let h = Vec8([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let m = h.to_homography();
        assert_eq!(m.get(0, 2), 3.0);
        assert_eq!(m.get(2, 0), 7.0);
        assert_eq!(m.get(2, 1), 8.0);
        assert_eq!(m.get(2, 2), 1.0);
    }
}
