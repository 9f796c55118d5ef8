//! Little-endian field access over raw payload windows.
//!
//! Every scaled value in the decoded records is produced as
//! `raw as f64 / divisor`, the divisor being fixed per field.

use crate::error::FieldError;
use num_traits::AsPrimitive;

mod sealed {
    pub trait Sealed {}
}

/// A fixed width little-endian integer that can be read out of a window.
///
/// Sealed: implemented for `u8`, `u16`, `u32`, `i8`, `i16` and `i32` only.
/// Use [read] for bounds checked access.
pub trait Field: sealed::Sealed + Copy + AsPrimitive<f64> {
    /// Width in bytes
    const WIDTH: usize;

    /// Builds the value from exactly `WIDTH` bytes
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is not `WIDTH` bytes long.
    fn from_le_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_field {
    ($($ty:ty),*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Field for $ty {
                const WIDTH: usize = core::mem::size_of::<$ty>();

                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; core::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_field!(u8, u16, u32, i8, i16, i32);

/// Reads the raw integer at `offset`
pub fn read<T: Field>(window: &[u8], offset: usize) -> Result<T, FieldError> {
    let out_of_bounds = FieldError::OutOfBounds {
        offset,
        width: T::WIDTH,
        len: window.len(),
    };
    let end = offset.checked_add(T::WIDTH).ok_or(out_of_bounds)?;
    let bytes = window.get(offset..end).ok_or(out_of_bounds)?;
    Ok(T::from_le_slice(bytes))
}

/// Reads the raw integer at `offset` and divides it by `divisor`
pub fn scaled<T: Field>(window: &[u8], offset: usize, divisor: f64) -> Result<f64, FieldError> {
    read::<T>(window, offset).map(|raw| raw.as_() / divisor)
}

/// Reads the raw integer at `offset` as a float, without scaling
pub fn unscaled<T: Field>(window: &[u8], offset: usize) -> Result<f64, FieldError> {
    scaled::<T>(window, offset, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let window = [0x01, 0x02, 0x03, 0x04, 0xff];
        assert_eq!(read::<u8>(&window, 4).unwrap(), 0xff);
        assert_eq!(read::<i8>(&window, 4).unwrap(), -1);
        assert_eq!(read::<u16>(&window, 0).unwrap(), 0x0201);
        assert_eq!(read::<u32>(&window, 0).unwrap(), 0x0403_0201);
        assert_eq!(read::<i16>(&window, 3).unwrap(), i16::from_le_bytes([0x04, 0xff]));
    }

    #[test]
    fn scales_signed_fixed_point() {
        let window = 1_234_567_890i32.to_le_bytes();
        let value = scaled::<i32>(&window, 0, 1e7).unwrap();
        assert!((value - 123.456789).abs() < 1e-9, "{value}");

        let window = (-1_234_567_890i32).to_le_bytes();
        let value = scaled::<i32>(&window, 0, 1e7).unwrap();
        assert!((value + 123.456789).abs() < 1e-9, "{value}");
    }

    #[test]
    fn unsigned_high_bit_is_not_sign() {
        let window = u32::MAX.to_le_bytes();
        assert_eq!(unscaled::<u32>(&window, 0).unwrap(), f64::from(u32::MAX));
    }

    #[test]
    #[should_panic]
    fn from_le_slice_requires_exact_width() {
        u32::from_le_slice(&[0x01, 0x02]);
    }

    #[test]
    fn short_window_is_rejected() {
        let window = [0u8; 5];
        assert_eq!(
            read::<u32>(&window, 2),
            Err(FieldError::OutOfBounds {
                offset: 2,
                width: 4,
                len: 5
            })
        );
        assert!(read::<u8>(&window, usize::MAX).is_err());
        assert!(read::<u32>(&window, 1).is_ok());
    }
}
