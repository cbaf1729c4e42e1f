//! Element types for numeric arrays (the type registry)

/// Element type of an extracted numeric array.
///
/// The discriminant is the tag written into descriptors, so the order here
/// is part of the wire format. Tag `0` is reserved and never valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DType {
    F32 = 0x01,
    I8 = 0x02,
    I16 = 0x03,
    I32 = 0x04,
    U8 = 0x05,
    U16 = 0x06,
    U32 = 0x07,
}

impl DType {
    /// Every registered type, in tag order
    pub const ALL: [DType; 7] = [
        DType::F32,
        DType::I8,
        DType::I16,
        DType::I32,
        DType::U8,
        DType::U16,
        DType::U32,
    ];

    /// Size in bytes of a single element
    pub fn element_size(self) -> usize {
        match self {
            DType::I8 | DType::U8 => 1,
            DType::I16 | DType::U16 => 2,
            DType::F32 | DType::I32 | DType::U32 => 4,
        }
    }

    /// Try to convert from u8 tag
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(DType::F32),
            0x02 => Some(DType::I8),
            0x03 => Some(DType::I16),
            0x04 => Some(DType::I32),
            0x05 => Some(DType::U8),
            0x06 => Some(DType::U16),
            0x07 => Some(DType::U32),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            DType::F32 => "float32",
            DType::I8 => "int8",
            DType::I16 => "int16",
            DType::I32 => "int32",
            DType::U8 => "uint8",
            DType::U16 => "uint16",
            DType::U32 => "uint32",
        }
    }
}

/// Rust scalar that can be stored in an array.
///
/// Bulk data is little-endian on the wire; `to_le` converts a host value to
/// that order (and back, since the swap is symmetric).
pub trait Element: bytemuck::Pod + PartialEq + std::fmt::Debug {
    const DTYPE: DType;

    fn to_le(self) -> Self;
}

macro_rules! impl_int_element {
    ($($ty:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$dtype;

                fn to_le(self) -> Self {
                    <$ty>::to_le(self)
                }
            }
        )*
    };
}

impl_int_element!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    u8 => U8,
    u16 => U16,
    u32 => U32,
);

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    fn to_le(self) -> Self {
        f32::from_bits(self.to_bits().to_le())
    }
}
