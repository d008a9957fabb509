use thiserror::Error;

/// 层在前向推理（`forward`）时可能返回的错误。
/// 检查顺序即变体的声明顺序。
#[derive(Error, Debug, PartialEq, Eq)]
pub enum InferError {
    // 输入特征图
    #[error("卷积层的输入特征图为空")]
    InputEmpty,

    // 权重/偏置配置
    #[error("卷积层的权重参数为空")]
    WeightMissing,
    #[error("权重与偏置的数量不匹配：权重{weights}个，偏置{bias}个")]
    BiasParameterMismatch { weights: usize, bias: usize },

    // 输入形状
    #[error("卷积核与输入的通道数不匹配：卷积核为{expected}，输入为{got}")]
    ChannelMismatch { expected: usize, got: usize },
    #[error(
        "输出特征图尺寸无效：输入{input_h}x{input_w}（已填充），卷积核{kernel_h}x{kernel_w}，步长{stride}"
    )]
    OutputSizeInvalid {
        input_h: usize,
        input_w: usize,
        kernel_h: usize,
        kernel_w: usize,
        stride: usize,
    },
}
