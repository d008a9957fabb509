use serde::{Deserialize, Serialize};

/// 算子的一个具名参数。参数种类是封闭的，绑定时用穷尽匹配取值，
/// 类型不符与缺失一样视为绑定失败。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum RuntimeParameter {
    Unknown,
    Bool(bool),
    Int(i32),
    Float(f32),
    String(String),
    IntArray(Vec<i32>),
    FloatArray(Vec<f32>),
    StringArray(Vec<String>),
}

impl RuntimeParameter {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            Self::IntArray(values) => Some(values),
            _ => None,
        }
    }
}
