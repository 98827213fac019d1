use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use glam::{Mat4, UVec4, Vec2, Vec3, Vec4};

use crate::AssetFileError;

/// Counterpart of [`Parseable`](crate::common::reader::Parseable): every impl here produces
/// exactly the bytes the matching parser consumes.
pub trait Writeable {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError>;
}

impl Writeable for u8 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        Ok(wtr.write_u8(*self)?)
    }
}

impl Writeable for u16 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        Ok(wtr.write_u16::<LittleEndian>(*self)?)
    }
}

impl Writeable for u32 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        Ok(wtr.write_u32::<LittleEndian>(*self)?)
    }
}

impl Writeable for i32 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        Ok(wtr.write_i32::<LittleEndian>(*self)?)
    }
}

impl Writeable for u64 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        Ok(wtr.write_u64::<LittleEndian>(*self)?)
    }
}

impl Writeable for i64 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        Ok(wtr.write_i64::<LittleEndian>(*self)?)
    }
}

impl Writeable for f32 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        Ok(wtr.write_f32::<LittleEndian>(*self)?)
    }
}

impl Writeable for bool {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        Ok(wtr.write_u8(u8::from(*self))?)
    }
}

impl<const N: usize> Writeable for [u8; N] {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        Ok(wtr.write_all(self)?)
    }
}

impl Writeable for str {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        write_count(wtr, self.len())?;
        Ok(wtr.write_all(self.as_bytes())?)
    }
}

impl Writeable for String {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        self.as_str().write(wtr)
    }
}

impl Writeable for Vec2 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        wtr.write_f32::<LittleEndian>(self.x)?;
        wtr.write_f32::<LittleEndian>(self.y)?;
        Ok(())
    }
}

impl Writeable for Vec3 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        wtr.write_f32::<LittleEndian>(self.x)?;
        wtr.write_f32::<LittleEndian>(self.y)?;
        wtr.write_f32::<LittleEndian>(self.z)?;
        Ok(())
    }
}

impl Writeable for Vec4 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        wtr.write_f32::<LittleEndian>(self.x)?;
        wtr.write_f32::<LittleEndian>(self.y)?;
        wtr.write_f32::<LittleEndian>(self.z)?;
        wtr.write_f32::<LittleEndian>(self.w)?;
        Ok(())
    }
}

impl Writeable for UVec4 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        wtr.write_u32::<LittleEndian>(self.x)?;
        wtr.write_u32::<LittleEndian>(self.y)?;
        wtr.write_u32::<LittleEndian>(self.z)?;
        wtr.write_u32::<LittleEndian>(self.w)?;
        Ok(())
    }
}

impl Writeable for Mat4 {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        for value in self.to_cols_array() {
            wtr.write_f32::<LittleEndian>(value)?;
        }
        Ok(())
    }
}

impl<T: Writeable> Writeable for [T] {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        write_count(wtr, self.len())?;
        for element in self {
            element.write(wtr)?;
        }
        Ok(())
    }
}

impl<T: Writeable> Writeable for Vec<T> {
    fn write<W: Write>(&self, wtr: &mut W) -> Result<(), AssetFileError> {
        self.as_slice().write(wtr)
    }
}

pub(crate) fn write_count<W: Write>(wtr: &mut W, count: usize) -> Result<(), AssetFileError> {
    Ok(wtr.write_u64::<LittleEndian>(count as u64)?)
}
