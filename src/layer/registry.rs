use std::collections::HashMap;
use std::fmt;

use log::{error, trace};

use super::{ConvolutionLayer, Layer};
use crate::errors::{ParseError, RegistryError};
use crate::runtime::RuntimeOperator;

/// 由算子描述创建层的函数
pub type LayerCreator = fn(&RuntimeOperator) -> Result<Layer, ParseError>;

/// 算子类型名到层创建函数的映射。
/// 由图加载器显式持有，生命周期随加载器，而非进程级的全局状态。
#[derive(Clone)]
pub struct LayerRegistry {
    creators: HashMap<String, LayerCreator>,
}

impl LayerRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            creators: HashMap::new(),
        }
    }

    /// 创建注册了本库所有内置层的注册表
    pub fn with_builtin_layers() -> Self {
        let mut registry = Self::new();
        registry
            .creators
            .insert(ConvolutionLayer::TYPE_NAME.to_string(), ConvolutionLayer::get_instance);
        registry
    }

    /// 注册一个层类型，同名类型不可重复注册
    pub fn register(&mut self, type_name: &str, creator: LayerCreator) -> Result<(), RegistryError> {
        if self.creators.contains_key(type_name) {
            error!("层类型{type_name}已被注册");
            return Err(RegistryError::DuplicateLayerType(type_name.to_string()));
        }
        trace!("注册层类型{type_name}");
        self.creators.insert(type_name.to_string(), creator);
        Ok(())
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.creators.contains_key(type_name)
    }

    /// 已注册的类型名（按字典序）
    pub fn layer_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.creators.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// 按`op.type_name`分派到对应的创建函数
    pub fn create_layer(&self, op: &RuntimeOperator) -> Result<Layer, RegistryError> {
        let Some(creator) = self.creators.get(&op.type_name) else {
            error!("算子{}的类型{}未注册", op.name, op.type_name);
            return Err(RegistryError::UnknownLayerType(op.type_name.clone()));
        };
        Ok(creator(op)?)
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::with_builtin_layers()
    }
}

impl fmt::Debug for LayerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerRegistry")
            .field("layer_types", &self.layer_types())
            .finish()
    }
}
