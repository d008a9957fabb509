/*
 * @Description  : 推理层（Layer）模块
 *
 * - TraitLayer：所有层共有的前向推理接口
 * - Layer：封闭的层枚举，经enum_dispatch静态分派
 * - LayerRegistry：按算子类型名创建层的注册表
 *
 * 层由`get_instance`从`RuntimeOperator`绑定而来，绑定完成后只读，
 * 可被多个线程同时调用`forward`。
 */

use enum_dispatch::enum_dispatch;

use crate::errors::InferError;
use crate::tensor::Tensor;

mod convolution;
mod registry;

pub use convolution::ConvolutionLayer;
pub use registry::{LayerCreator, LayerRegistry};

#[cfg(test)]
mod tests;

#[enum_dispatch]
pub trait TraitLayer {
    fn layer_name(&self) -> &str;

    /// 对一批输入逐个推理，输出与输入一一对应且保持顺序
    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, InferError>;
}

#[enum_dispatch(TraitLayer)]
#[derive(Debug, Clone)]
pub enum Layer {
    Convolution(ConvolutionLayer),
}

impl Layer {
    pub fn as_convolution(&self) -> Option<&ConvolutionLayer> {
        match self {
            Self::Convolution(layer) => Some(layer),
        }
    }
}
