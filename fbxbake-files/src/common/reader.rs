use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use glam::{Mat4, UVec4, Vec2, Vec3, Vec4};

use crate::AssetFileError;

/// Counts come straight from the stream, so never trust them for an up-front allocation.
pub(crate) const MAX_PREALLOCATION: usize = 1 << 16;

pub trait Parseable<T> {
    fn parse<R: Read>(rdr: &mut R) -> Result<T, AssetFileError>;
}

impl Parseable<u8> for u8 {
    fn parse<R: Read>(rdr: &mut R) -> Result<u8, AssetFileError> {
        Ok(rdr.read_u8()?)
    }
}

impl Parseable<u16> for u16 {
    fn parse<R: Read>(rdr: &mut R) -> Result<u16, AssetFileError> {
        Ok(rdr.read_u16::<LittleEndian>()?)
    }
}

impl Parseable<u32> for u32 {
    fn parse<R: Read>(rdr: &mut R) -> Result<u32, AssetFileError> {
        Ok(rdr.read_u32::<LittleEndian>()?)
    }
}

impl Parseable<i32> for i32 {
    fn parse<R: Read>(rdr: &mut R) -> Result<i32, AssetFileError> {
        Ok(rdr.read_i32::<LittleEndian>()?)
    }
}

impl Parseable<u64> for u64 {
    fn parse<R: Read>(rdr: &mut R) -> Result<u64, AssetFileError> {
        Ok(rdr.read_u64::<LittleEndian>()?)
    }
}

impl Parseable<i64> for i64 {
    fn parse<R: Read>(rdr: &mut R) -> Result<i64, AssetFileError> {
        Ok(rdr.read_i64::<LittleEndian>()?)
    }
}

impl Parseable<f32> for f32 {
    fn parse<R: Read>(rdr: &mut R) -> Result<f32, AssetFileError> {
        Ok(rdr.read_f32::<LittleEndian>()?)
    }
}

impl Parseable<bool> for bool {
    fn parse<R: Read>(rdr: &mut R) -> Result<bool, AssetFileError> {
        Ok(rdr.read_u8()? != 0)
    }
}

impl<const N: usize> Parseable<[u8; N]> for [u8; N] {
    fn parse<R: Read>(rdr: &mut R) -> Result<[u8; N], AssetFileError> {
        let mut buf = [0u8; N];
        rdr.read_exact(&mut buf)?;
        Ok(buf)
    }
}

/// u64 byte length followed by the UTF-8 bytes, no terminator.
impl Parseable<String> for String {
    fn parse<R: Read>(rdr: &mut R) -> Result<String, AssetFileError> {
        let length = read_count(rdr)?;
        let mut buf = Vec::with_capacity(length.min(MAX_PREALLOCATION));
        rdr.by_ref().take(length as u64).read_to_end(&mut buf)?;
        if buf.len() != length {
            return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
        }

        Ok(String::from_utf8(buf)?)
    }
}

impl Parseable<Vec2> for Vec2 {
    fn parse<R: Read>(rdr: &mut R) -> Result<Vec2, AssetFileError> {
        Ok(Vec2::new(
            rdr.read_f32::<LittleEndian>()?,
            rdr.read_f32::<LittleEndian>()?,
        ))
    }
}

impl Parseable<Vec3> for Vec3 {
    fn parse<R: Read>(rdr: &mut R) -> Result<Vec3, AssetFileError> {
        Ok(Vec3::new(
            rdr.read_f32::<LittleEndian>()?,
            rdr.read_f32::<LittleEndian>()?,
            rdr.read_f32::<LittleEndian>()?,
        ))
    }
}

impl Parseable<Vec4> for Vec4 {
    fn parse<R: Read>(rdr: &mut R) -> Result<Vec4, AssetFileError> {
        Ok(Vec4::new(
            rdr.read_f32::<LittleEndian>()?,
            rdr.read_f32::<LittleEndian>()?,
            rdr.read_f32::<LittleEndian>()?,
            rdr.read_f32::<LittleEndian>()?,
        ))
    }
}

impl Parseable<UVec4> for UVec4 {
    fn parse<R: Read>(rdr: &mut R) -> Result<UVec4, AssetFileError> {
        Ok(UVec4::new(
            rdr.read_u32::<LittleEndian>()?,
            rdr.read_u32::<LittleEndian>()?,
            rdr.read_u32::<LittleEndian>()?,
            rdr.read_u32::<LittleEndian>()?,
        ))
    }
}

/// 16 floats, column-major.
impl Parseable<Mat4> for Mat4 {
    fn parse<R: Read>(rdr: &mut R) -> Result<Mat4, AssetFileError> {
        let mut cols = [0.0f32; 16];
        rdr.read_f32_into::<LittleEndian>(&mut cols)?;
        Ok(Mat4::from_cols_array(&cols))
    }
}

/// u64 element count followed by the elements.
impl<T: Parseable<T>> Parseable<Vec<T>> for Vec<T> {
    fn parse<R: Read>(rdr: &mut R) -> Result<Vec<T>, AssetFileError> {
        let count = read_count(rdr)?;
        let mut list: Vec<T> = Vec::with_capacity(count.min(MAX_PREALLOCATION));
        for _ in 0..count {
            list.push(T::parse(rdr)?);
        }

        Ok(list)
    }
}

pub(crate) fn read_count<R: Read>(rdr: &mut R) -> Result<usize, AssetFileError> {
    let count = rdr.read_u64::<LittleEndian>()?;
    usize::try_from(count).map_err(|_| AssetFileError::FormatError {
        reason: "Element count exceeds the addressable range",
    })
}
