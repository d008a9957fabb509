/*
 * @Description  : 算子描述（RuntimeOperator）：模型文件反序列化后、尚未做类型检查的单个计算图节点
 *
 * - params：具名参数（整数、布尔、整数数组……）
 * - attributes：具名属性（带形状的数值负载，如权重和偏置）
 *
 * 描述本身可经serde（如JSON）传递，绑定为具体层的工作由各层的`get_instance`完成。
 */

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

mod attribute;
mod parameter;

pub use attribute::{RuntimeAttribute, RuntimeDataType};
pub use parameter::RuntimeParameter;


/// 单个算子节点的未定型描述
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuntimeOperator {
    /// 节点名称，如`conv1`
    pub name: String,
    /// 算子类型名，注册表据此分派，如`nn.Conv2d`
    pub type_name: String,
    #[serde(default)]
    pub params: HashMap<String, RuntimeParameter>,
    #[serde(default)]
    pub attributes: HashMap<String, RuntimeAttribute>,
}

impl RuntimeOperator {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_param(mut self, key: &str, param: RuntimeParameter) -> Self {
        self.params.insert(key.to_string(), param);
        self
    }

    pub fn with_attribute(mut self, key: &str, attribute: RuntimeAttribute) -> Self {
        self.attributes.insert(key.to_string(), attribute);
        self
    }

    /// 从JSON文本解析算子描述
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
