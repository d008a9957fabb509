//! # Only Infer
//!
//! `only_infer`是一个纯rust的推理算子库，目前提供：
//! - 直接（逐窗口循环）实现的2D卷积层`ConvolutionLayer`；
//! - 将未定型的算子描述`RuntimeOperator`绑定为强类型层的参数校验流程；
//! - 按算子类型名创建层的注册表`LayerRegistry`。
//!
//! ```ignore
//! use only_infer::layer::{LayerRegistry, TraitLayer};
//!
//! let registry = LayerRegistry::default();
//! let layer = registry.create_layer(&op)?;
//! let outputs = layer.forward(&inputs)?;
//! ```

pub mod errors;
pub mod layer;
pub mod runtime;
pub mod tensor;
pub mod utils;
