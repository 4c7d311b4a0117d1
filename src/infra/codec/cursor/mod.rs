//! Byte cursors used to lay structures out in a fixed little-endian image
//! and read them back, independent of the host memory layout.
use crate::error::{DecodeError, EncodeError};

//==================================================================================STRUCT_WRITER
/// Writer filling a structure image field by field.
pub struct StructWriter<'a> {
    /// Target image (the `[u8; N]` handed to the segmenter).
    buffer: &'a mut [u8],
    /// Number of bytes written so far.
    cursor: usize,
}

macro_rules! write_le {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Write a little-endian `", stringify!($ty), "`.")]
            pub fn $name(&mut self, value: $ty) -> Result<(), EncodeError> {
                self.write_bytes(&value.to_le_bytes())
            }
        )*
    };
}

impl<'a> StructWriter<'a> {
    /// Create a writer positioned at the start of the image.
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    /// Bytes written so far.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// Copy raw bytes at the cursor.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        let end = self.cursor + bytes.len();
        if end > self.buffer.len() {
            return Err(EncodeError::BufferTooSmall {
                asked: bytes.len(),
                available: self.remaining(),
            });
        }
        self.buffer[self.cursor..end].copy_from_slice(bytes);
        self.cursor = end;
        Ok(())
    }

    /// Fill `len` bytes with zeros (reserved / padding fields).
    pub fn skip(&mut self, len: usize) -> Result<(), EncodeError> {
        if len > self.remaining() {
            return Err(EncodeError::BufferTooSmall {
                asked: len,
                available: self.remaining(),
            });
        }
        self.buffer[self.cursor..self.cursor + len].fill(0);
        self.cursor += len;
        Ok(())
    }

    /// Write a boolean as a single `0`/`1` byte.
    pub fn write_bool(&mut self, value: bool) -> Result<(), EncodeError> {
        self.write_u8(value as u8)
    }

    write_le! {
        write_u8: u8,
        write_i8: i8,
        write_u16: u16,
        write_i16: i16,
        write_u32: u32,
        write_i32: i32,
        write_u64: u64,
        write_i64: i64,
        write_f32: f32,
        write_f64: f64,
    }
}

//==================================================================================STRUCT_READER
/// Reader extracting fields from a reassembled structure image.
pub struct StructReader<'a> {
    /// Source image (typically [`Reassembler::unpacked`](crate::protocol::segmentation::reassembler::Reassembler::unpacked)).
    buffer: &'a [u8],
    /// Number of bytes consumed so far.
    cursor: usize,
}

macro_rules! read_le {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Read a little-endian `", stringify!($ty), "`.")]
            pub fn $name(&mut self) -> Result<$ty, DecodeError> {
                let len = core::mem::size_of::<$ty>();
                let mut raw = [0u8; core::mem::size_of::<$ty>()];
                raw.copy_from_slice(self.read_bytes(len)?);
                Ok(<$ty>::from_le_bytes(raw))
            }
        )*
    };
}

impl<'a> StructReader<'a> {
    /// Create a reader positioned at the start of the image.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Bytes still unread.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// Borrow `len` raw bytes at the cursor.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::OutOfBounds {
                asked: len,
                available: self.remaining(),
            });
        }
        let slice = &self.buffer[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(slice)
    }

    /// Advance past `len` bytes without interpreting them.
    pub fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.read_bytes(len).map(|_| ())
    }

    /// Read a boolean byte; anything other than `0`/`1` is rejected.
    pub fn read_bool(&mut self, field: &'static str) -> Result<bool, DecodeError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(DecodeError::InvalidValue { field }),
        }
    }

    read_le! {
        read_u8: u8,
        read_i8: i8,
        read_u16: u16,
        read_i16: i16,
        read_u32: u32,
        read_i32: i32,
        read_u64: u64,
        read_i64: i64,
        read_f32: f32,
        read_f64: f64,
    }
}
