/*
 * @Description  : Layer 模块单元测试
 *
 * 测试策略：
 * 1. 卷积层前向推理（形状、数值、padding、stride、bias）
 * 2. 前向推理的各类失败信号
 * 3. 由算子描述绑定卷积层（参数/属性缺失或不符）
 * 4. 注册表分派
 */


use crate::runtime::{RuntimeAttribute, RuntimeOperator, RuntimeParameter};

/// 构造一个参数与属性齐全的`nn.Conv2d`算子描述，权重取`0, 1, 2, ...`
fn conv_op(
    in_channels: i32,
    out_channels: i32,
    kernel: [i32; 2],
    padding: i32,
    stride: i32,
    use_bias: bool,
) -> RuntimeOperator {
    let weight_count = (out_channels * in_channels * kernel[0] * kernel[1]) as usize;
    let weights: Vec<f32> = (0..weight_count).map(|x| x as f32).collect();
    let bias: Vec<f32> = (0..out_channels).map(|x| x as f32 + 0.5).collect();

    RuntimeOperator::new("conv", "nn.Conv2d")
        .with_param("in_channels", RuntimeParameter::Int(in_channels))
        .with_param("out_channels", RuntimeParameter::Int(out_channels))
        .with_param("padding", RuntimeParameter::IntArray(vec![padding, padding]))
        .with_param("bias", RuntimeParameter::Bool(use_bias))
        .with_param("stride", RuntimeParameter::IntArray(vec![stride, stride]))
        .with_param("kernel_size", RuntimeParameter::IntArray(kernel.to_vec()))
        .with_attribute("bias", RuntimeAttribute::from_f32(&[out_channels], &bias))
        .with_attribute(
            "weight",
            RuntimeAttribute::from_f32(
                &[out_channels, in_channels, kernel[0], kernel[1]],
                &weights,
            ),
        )
}
