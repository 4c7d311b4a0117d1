//! Public traits exposed by the codec layer. They decouple application
//! structures from the segmentation core, which only ever sees `[u8; N]`.
use super::cursor::{StructReader, StructWriter};
use crate::error::{DecodeError, EncodeError};

//==================================================================================CAN_STRUCTURE
/// Implemented by every structure transported over the bus.
///
/// `N` is the size of the byte image and must be identical on both ends of
/// the link. The image layout is defined by `encode`/`decode` with explicit
/// little-endian fields, so it does not depend on the target architecture.
///
/// ```rust, ignore
/// struct JointPosition {
///     position: f32,
///     velocity: f32,
/// }
///
/// impl CanStructure<8> for JointPosition {
///     fn encode(&self, writer: &mut StructWriter) -> Result<(), EncodeError> {
///         writer.write_f32(self.position)?;
///         writer.write_f32(self.velocity)
///     }
///
///     fn decode(reader: &mut StructReader) -> Result<Self, DecodeError> {
///         Ok(Self {
///             position: reader.read_f32()?,
///             velocity: reader.read_f32()?,
///         })
///     }
/// }
/// ```
pub trait CanStructure<const N: usize>: Sized {
    /// Write every field into the image.
    fn encode(&self, writer: &mut StructWriter<'_>) -> Result<(), EncodeError>;

    /// Rebuild the structure from an image.
    fn decode(reader: &mut StructReader<'_>) -> Result<Self, DecodeError>;

    /// Encode into a fresh image. Bytes left unwritten stay zero.
    fn to_bytes(&self) -> Result<[u8; N], EncodeError> {
        let mut image = [0u8; N];
        self.encode(&mut StructWriter::new(&mut image))?;
        Ok(image)
    }

    /// Decode from a complete image.
    fn from_bytes(image: &[u8; N]) -> Result<Self, DecodeError> {
        Self::decode(&mut StructReader::new(image))
    }
}
