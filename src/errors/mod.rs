/*
 * @Description  : 各类错误类型：张量、推理（Forward）以及参数绑定（Build）
 */

use thiserror::Error;

mod infer;
mod parse;
pub use self::infer::*;
pub use self::parse::*;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    #[error("元素数量不一致：张量需要{expected}个元素，实际提供了{got}个")]
    SizeMismatch { expected: usize, got: usize },

    #[error("通道索引{index}越界，张量只有{channels}个通道")]
    ChannelOutOfRange { index: usize, channels: usize },
}
