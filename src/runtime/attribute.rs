use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

/// 属性负载中元素的数据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RuntimeDataType {
    #[default]
    Unknown,
    Float32,
    Float64,
    Float16,
    Int32,
    Int64,
    Int16,
    Int8,
    UInt8,
    Bool,
}

impl RuntimeDataType {
    /// 单个元素所占字节数，未知类型返回None
    pub const fn elem_size(&self) -> Option<usize> {
        match self {
            Self::Unknown => None,
            Self::Float64 | Self::Int64 => Some(8),
            Self::Float32 | Self::Int32 => Some(4),
            Self::Float16 | Self::Int16 => Some(2),
            Self::Int8 | Self::UInt8 | Self::Bool => Some(1),
        }
    }
}

/// 算子的一个具名属性，通常是训练得到的权重或偏置。
/// `weight_data`为小端序的原始字节，`shape`为其逻辑形状。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuntimeAttribute {
    pub dtype: RuntimeDataType,
    pub shape: Vec<i32>,
    pub weight_data: Vec<u8>,
}

impl RuntimeAttribute {
    /// 由一组f32数据构造`Float32`属性
    pub fn from_f32(shape: &[i32], values: &[f32]) -> Self {
        Self {
            dtype: RuntimeDataType::Float32,
            shape: shape.to_vec(),
            weight_data: values.iter().flat_map(|v| v.to_le_bytes()).collect(),
        }
    }

    /// 将负载解码为f32序列，仅支持`Float32`类型
    pub fn get_f32(&self) -> Result<Vec<f32>, ParseError> {
        const ELEM_SIZE: usize = std::mem::size_of::<f32>();

        if self.dtype != RuntimeDataType::Float32 {
            return Err(ParseError::AttrDataType {
                expected: RuntimeDataType::Float32,
                got: self.dtype,
            });
        }
        if self.weight_data.len() % ELEM_SIZE != 0 {
            return Err(ParseError::AttrDataLength {
                len: self.weight_data.len(),
                elem_size: ELEM_SIZE,
            });
        }

        Ok(self
            .weight_data
            .chunks_exact(ELEM_SIZE)
            .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            .collect())
    }

    /// 形状中所有维度的乘积；形状为空、含负数或乘积溢出时返回None
    pub fn shape_size(&self) -> Option<usize> {
        if self.shape.is_empty() {
            return None;
        }
        self.shape.iter().try_fold(1usize, |acc, &dim| {
            usize::try_from(dim).ok().and_then(|d| acc.checked_mul(d))
        })
    }
}
