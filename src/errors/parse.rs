use thiserror::Error;

use crate::runtime::RuntimeDataType;

/// 由算子描述（`RuntimeOperator`）绑定出具体层时可能返回的错误。
/// 每个必需字段都有各自的变体，便于调用方准确报告是哪一个字段出了问题。
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    // 参数（params）
    #[error("找不到输入通道数参数`in_channels`，或其类型不是整数")]
    MissingInChannel,
    #[error("找不到输出通道数参数`out_channels`，或其类型不是整数")]
    MissingOutChannel,
    #[error("找不到填充参数`padding`，或其不是长度为2的整数数组")]
    MissingPadding,
    #[error("找不到偏置开关参数`bias`，或其类型不是布尔值")]
    MissingUseBias,
    #[error("找不到步长参数`stride`，或其不是长度为2的整数数组")]
    MissingStride,
    #[error("找不到卷积核参数`kernel_size`，或其不是长度为2的整数数组")]
    MissingKernel,
    #[error("参数`{name}`的取值无效：{reason}")]
    InvalidParameter { name: String, reason: String },

    // 属性（attributes）
    #[error("找不到偏置属性`bias`，或其形状与输出通道数不符")]
    MissingAttrBias,
    #[error("找不到权重属性`weight`，或其形状为空")]
    MissingAttrWeight,
    #[error("属性的数据类型为{got:?}，无法解析为{expected:?}")]
    AttrDataType {
        expected: RuntimeDataType,
        got: RuntimeDataType,
    },
    #[error("属性的字节数{len}不是元素大小{elem_size}的整数倍")]
    AttrDataLength { len: usize, elem_size: usize },

    // 数据分发到张量
    #[error("权重数据数量不符：层需要{expected}个值，实际提供了{got}个")]
    WeightDataMismatch { expected: usize, got: usize },
    #[error("偏置数据数量不符：层需要{expected}个值，实际提供了{got}个")]
    BiasDataMismatch { expected: usize, got: usize },
    #[error("第{index}个权重张量的形状应为{expected:?}，实际为{got:?}")]
    WeightShapeMismatch {
        index: usize,
        expected: [usize; 3],
        got: [usize; 3],
    },
}

/// 层注册表（`LayerRegistry`）相关错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("未注册的层类型：{0}")]
    UnknownLayerType(String),
    #[error("层类型{0}已被注册")]
    DuplicateLayerType(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
