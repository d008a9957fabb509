/*
 * @Description  : 2D 卷积层（直接卷积，仅推理）
 *
 * 输入/输出形状：
 * - 输入：批内每项为 [in_channels, H, W]
 * - 输出：批内每项为 [out_channels, H', W']
 *
 * 输出尺寸计算（H、W 为填充前的尺寸）：
 * H' = (H + 2*padding - kernel_h) / stride + 1
 * W' = (W + 2*padding - kernel_w) / stride + 1
 *
 * padding 与 stride 在高、宽两个方向上共用一个值。
 */

use std::collections::HashMap;

use log::{debug, error, warn};

use super::{Layer, TraitLayer};
use crate::errors::{InferError, ParseError};
use crate::runtime::{RuntimeOperator, RuntimeParameter};
use crate::tensor::Tensor;

/// 2D 卷积层
///
/// 每个输出通道对应一个形状为`[in_channels, kernel_h, kernel_w]`的卷积核，
/// 启用偏置时每个输出通道另有一个形状为`[1, 1, 1]`的偏置。
#[derive(Debug, Clone)]
pub struct ConvolutionLayer {
    in_channels: usize,
    out_channels: usize,
    kernel_h: usize,
    kernel_w: usize,
    padding: usize,
    stride: usize,
    use_bias: bool,

    /// 卷积核，共`out_channels`个
    pub(in crate::layer) weights: Vec<Tensor>,
    /// 偏置，启用时共`out_channels`个，否则为空
    pub(in crate::layer) bias: Vec<Tensor>,
}

impl ConvolutionLayer {
    /// 注册表中使用的算子类型名
    pub const TYPE_NAME: &'static str = "nn.Conv2d";

    /// 创建卷积层，权重与偏置全部初始化为0。
    /// `kernel_h`、`kernel_w`、`stride`须大于0，否则会panic。
    pub fn new(
        out_channels: usize,
        in_channels: usize,
        kernel_h: usize,
        kernel_w: usize,
        padding: usize,
        stride: usize,
        use_bias: bool,
    ) -> Self {
        assert!(
            kernel_h > 0 && kernel_w > 0,
            "卷积核尺寸须大于0，得到{kernel_h}x{kernel_w}"
        );
        assert!(stride > 0, "步长须大于0");

        let weights = (0..out_channels)
            .map(|_| Tensor::new(in_channels, kernel_h, kernel_w))
            .collect();
        let bias = if use_bias {
            (0..out_channels).map(|_| Tensor::new(1, 1, 1)).collect()
        } else {
            Vec::new()
        };

        Self {
            in_channels,
            out_channels,
            kernel_h,
            kernel_w,
            padding,
            stride,
            use_bias,
            weights,
            bias,
        }
    }

    pub const fn in_channels(&self) -> usize {
        self.in_channels
    }

    pub const fn out_channels(&self) -> usize {
        self.out_channels
    }

    /// (kernel_h, kernel_w)
    pub const fn kernel_size(&self) -> (usize, usize) {
        (self.kernel_h, self.kernel_w)
    }

    pub const fn padding(&self) -> usize {
        self.padding
    }

    pub const fn stride(&self) -> usize {
        self.stride
    }

    pub const fn use_bias(&self) -> bool {
        self.use_bias
    }

    pub fn weights(&self) -> &[Tensor] {
        &self.weights
    }

    pub fn bias(&self) -> &[Tensor] {
        &self.bias
    }

    /// 将展平的权重数据按（卷积核→通道→行→列）顺序依次填入各卷积核
    pub fn set_weights(&mut self, values: &[f32]) -> Result<(), ParseError> {
        let expected = self.weights.iter().map(Tensor::size).sum::<usize>();
        if values.len() != expected {
            error!("权重数据数量{}与卷积层所需的{expected}不符", values.len());
            return Err(ParseError::WeightDataMismatch {
                expected,
                got: values.len(),
            });
        }

        let mut offset = 0;
        for weight in &mut self.weights {
            let size = weight.size();
            weight
                .fill(&values[offset..offset + size])
                .map_err(|_| ParseError::WeightDataMismatch {
                    expected,
                    got: values.len(),
                })?;
            offset += size;
        }
        Ok(())
    }

    /// 将偏置数据依次填入各输出通道的偏置。
    /// 未启用偏置时数据被忽略。
    pub fn set_bias(&mut self, values: &[f32]) -> Result<(), ParseError> {
        if !self.use_bias {
            debug!("卷积层未启用偏置，忽略{}个偏置数据", values.len());
            return Ok(());
        }
        if values.len() != self.bias.len() {
            error!(
                "偏置数据数量{}与输出通道数{}不符",
                values.len(),
                self.bias.len()
            );
            return Err(ParseError::BiasDataMismatch {
                expected: self.bias.len(),
                got: values.len(),
            });
        }

        for (bias, &value) in self.bias.iter_mut().zip(values) {
            bias[[0, 0, 0]] = value;
        }
        Ok(())
    }

    /// 整体替换卷积核，数量与形状都须与层的配置一致
    pub fn set_weight_tensors(&mut self, weights: Vec<Tensor>) -> Result<(), ParseError> {
        if weights.len() != self.out_channels {
            error!(
                "卷积核数量{}与输出通道数{}不符",
                weights.len(),
                self.out_channels
            );
            return Err(ParseError::WeightDataMismatch {
                expected: self.out_channels,
                got: weights.len(),
            });
        }
        let expected = [self.in_channels, self.kernel_h, self.kernel_w];
        if let Some((index, weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| w.shape() != expected)
        {
            error!("第{index}个卷积核的形状{:?}与{expected:?}不符", weight.shape());
            return Err(ParseError::WeightShapeMismatch {
                index,
                expected,
                got: weight.shape(),
            });
        }

        self.weights = weights;
        Ok(())
    }

    /// 整体替换偏置，每个偏置须为`[1, 1, 1]`。
    /// 未启用偏置时传入的张量被忽略。
    pub fn set_bias_tensors(&mut self, bias: Vec<Tensor>) -> Result<(), ParseError> {
        if !self.use_bias {
            debug!("卷积层未启用偏置，忽略{}个偏置张量", bias.len());
            return Ok(());
        }
        if bias.len() != self.out_channels || bias.iter().any(|b| b.shape() != [1, 1, 1]) {
            error!("偏置张量须为{}个[1, 1, 1]张量", self.out_channels);
            return Err(ParseError::BiasDataMismatch {
                expected: self.out_channels,
                got: bias.iter().map(Tensor::size).sum(),
            });
        }

        self.bias = bias;
        Ok(())
    }

    /// 对单个输入做卷积，返回形状为`[out_channels, H', W']`的输出
    fn convolve(&self, input: &Tensor) -> Result<Tensor, InferError> {
        let padded;
        let input = if self.padding > 0 {
            let p = self.padding;
            padded = input.padding(p, p, p, p, 0.);
            &padded
        } else {
            input
        };
        let [input_c, input_h, input_w] = input.shape();
        let stride = self.stride;
        let kernel_count = self.weights.len();

        let mut output: Option<Tensor> = None;
        for (k, kernel) in self.weights.iter().enumerate() {
            if kernel.channels() != input_c {
                error!(
                    "卷积核与输入的通道数不匹配：卷积核为{}，输入为{input_c}",
                    kernel.channels()
                );
                return Err(InferError::ChannelMismatch {
                    expected: kernel.channels(),
                    got: input_c,
                });
            }

            let (kernel_h, kernel_w) = (kernel.rows(), kernel.cols());
            let (span_h, span_w) =
                match (input_h.checked_sub(kernel_h), input_w.checked_sub(kernel_w)) {
                    (Some(span_h), Some(span_w)) => (span_h, span_w),
                    _ => {
                        error!(
                            "输出特征图尺寸无效：输入{input_h}x{input_w}，卷积核{kernel_h}x{kernel_w}"
                        );
                        return Err(InferError::OutputSizeInvalid {
                            input_h,
                            input_w,
                            kernel_h,
                            kernel_w,
                            stride,
                        });
                    }
                };
            let output_h = span_h / stride + 1;
            let output_w = span_w / stride + 1;

            let output = output.get_or_insert_with(|| Tensor::new(kernel_count, output_h, output_w));
            debug_assert_eq!(output.shape(), [kernel_count, output_h, output_w]);

            let mut output_channel = output.channel_mut(k);
            for ic in 0..input_c {
                let input_channel = input.channel(ic);
                let kernel_channel = kernel.channel(ic);

                for r in (0..=span_h).step_by(stride) {
                    for c in (0..=span_w).step_by(stride) {
                        let mut sum = 0.;
                        for kh in 0..kernel_h {
                            for kw in 0..kernel_w {
                                sum += input_channel[[r + kh, c + kw]] * kernel_channel[[kh, kw]];
                            }
                        }
                        output_channel[[r / stride, c / stride]] += sum;
                    }
                }
            }

            if self.use_bias {
                let bias = self.bias[k][[0, 0, 0]];
                output_channel.mapv_inplace(|x| x + bias);
            }
        }

        let Some(output) = output else {
            unreachable!("卷积核非空时输出必然已分配");
        };
        assert!(!output.is_empty(), "卷积输出不应为空");
        Ok(output)
    }

    /// 由算子描述绑定出卷积层，并填入权重与偏置。
    /// 所有参数与属性校验通过后才分配权重张量。
    pub fn get_instance(op: &RuntimeOperator) -> Result<Layer, ParseError> {
        let params = &op.params;

        let in_channels = int_param(params, "in_channels", ParseError::MissingInChannel)?;
        let out_channels = int_param(params, "out_channels", ParseError::MissingOutChannel)?;
        let paddings = int_pair_param(params, "padding", ParseError::MissingPadding)?;
        let Some(use_bias) = params.get("bias").and_then(RuntimeParameter::as_bool) else {
            error!("找不到偏置开关参数`bias`");
            return Err(ParseError::MissingUseBias);
        };
        let strides = int_pair_param(params, "stride", ParseError::MissingStride)?;
        let kernels = int_pair_param(params, "kernel_size", ParseError::MissingKernel)?;

        let in_channels = positive("in_channels", in_channels)?;
        let out_channels = positive("out_channels", out_channels)?;
        let [kernel_h, kernel_w] = validate_pair("kernel_size", kernels, positive)?;
        let [stride, _] = validate_pair("stride", strides, positive)?;
        let [padding, _] = validate_pair("padding", paddings, non_negative)?;

        // 只支持对称的padding/stride，仅取数组的第一个元素
        if paddings[0] != paddings[1] || strides[0] != strides[1] {
            warn!(
                "算子{}的padding{paddings:?}或stride{strides:?}在两个方向上不同，仅使用第一个值",
                op.name
            );
        }

        let Some(weight_count) = [in_channels, kernel_h, kernel_w]
            .into_iter()
            .try_fold(out_channels, usize::checked_mul)
        else {
            error!(
                "卷积层的权重总数溢出：out={out_channels}，in={in_channels}，kernel={kernel_h}x{kernel_w}"
            );
            return Err(ParseError::InvalidParameter {
                name: "kernel_size".to_string(),
                reason: format!(
                    "权重总数{out_channels}x{in_channels}x{kernel_h}x{kernel_w}溢出"
                ),
            });
        };

        // 加载偏置与权重
        let attrs = &op.attributes;
        let Some(bias) = attrs.get("bias") else {
            error!("找不到偏置属性`bias`");
            return Err(ParseError::MissingAttrBias);
        };
        if bias.shape.first().copied() != i32::try_from(out_channels).ok() {
            error!("偏置属性的形状{:?}与输出通道数{out_channels}不符", bias.shape);
            return Err(ParseError::MissingAttrBias);
        }
        let bias_values = bias.get_f32()?;
        if use_bias && bias_values.len() != out_channels {
            error!(
                "偏置数据数量{}与输出通道数{out_channels}不符",
                bias_values.len()
            );
            return Err(ParseError::BiasDataMismatch {
                expected: out_channels,
                got: bias_values.len(),
            });
        }

        let Some(weight) = attrs.get("weight") else {
            error!("找不到权重属性`weight`");
            return Err(ParseError::MissingAttrWeight);
        };
        if weight.shape_size().is_none() {
            error!("权重属性的形状{:?}为空或无效", weight.shape);
            return Err(ParseError::MissingAttrWeight);
        }
        let weight_values = weight.get_f32()?;
        if weight_values.len() != weight_count {
            error!(
                "权重数据数量{}与卷积层所需的{weight_count}不符",
                weight_values.len()
            );
            return Err(ParseError::WeightDataMismatch {
                expected: weight_count,
                got: weight_values.len(),
            });
        }

        let mut conv_layer = ConvolutionLayer::new(
            out_channels,
            in_channels,
            kernel_h,
            kernel_w,
            padding,
            stride,
            use_bias,
        );
        conv_layer.set_bias(&bias_values)?;
        conv_layer.set_weights(&weight_values)?;

        debug!(
            "绑定卷积层{}：out={out_channels}，in={in_channels}，kernel={kernel_h}x{kernel_w}，padding={padding}，stride={stride}，bias={use_bias}",
            op.name
        );
        Ok(Layer::Convolution(conv_layer))
    }
}

impl TraitLayer for ConvolutionLayer {
    fn layer_name(&self) -> &str {
        "Convolution"
    }

    fn forward(&self, inputs: &[Tensor]) -> Result<Vec<Tensor>, InferError> {
        if inputs.is_empty() {
            error!("卷积层的输入特征图为空");
            return Err(InferError::InputEmpty);
        }
        if self.weights.is_empty() {
            error!("卷积层的权重参数为空");
            return Err(InferError::WeightMissing);
        }
        if self.use_bias && self.bias.len() != self.weights.len() {
            error!(
                "权重与偏置的数量不匹配：权重{}个，偏置{}个",
                self.weights.len(),
                self.bias.len()
            );
            return Err(InferError::BiasParameterMismatch {
                weights: self.weights.len(),
                bias: self.bias.len(),
            });
        }

        inputs.iter().map(|input| self.convolve(input)).collect()
    }
}

fn int_param(
    params: &HashMap<String, RuntimeParameter>,
    key: &str,
    missing: ParseError,
) -> Result<i32, ParseError> {
    params.get(key).and_then(RuntimeParameter::as_int).ok_or_else(|| {
        error!("找不到整数参数`{key}`");
        missing
    })
}

fn int_pair_param(
    params: &HashMap<String, RuntimeParameter>,
    key: &str,
    missing: ParseError,
) -> Result<[i32; 2], ParseError> {
    match params.get(key).and_then(RuntimeParameter::as_int_array) {
        Some(&[first, second]) => Ok([first, second]),
        _ => {
            error!("找不到长度为2的整数数组参数`{key}`");
            Err(missing)
        }
    }
}

/// 逐个校验数组参数的两个元素
fn validate_pair(
    name: &str,
    pair: [i32; 2],
    check: fn(&str, i32) -> Result<usize, ParseError>,
) -> Result<[usize; 2], ParseError> {
    Ok([check(name, pair[0])?, check(name, pair[1])?])
}

fn positive(name: &str, value: i32) -> Result<usize, ParseError> {
    match usize::try_from(value) {
        Ok(value) if value > 0 => Ok(value),
        _ => {
            error!("参数`{name}`须大于0，得到{value}");
            Err(ParseError::InvalidParameter {
                name: name.to_string(),
                reason: format!("须大于0，得到{value}"),
            })
        }
    }
}

fn non_negative(name: &str, value: i32) -> Result<usize, ParseError> {
    usize::try_from(value).map_err(|_| {
        error!("参数`{name}`须大于等于0，得到{value}");
        ParseError::InvalidParameter {
            name: name.to_string(),
            reason: format!("须大于等于0，得到{value}"),
        }
    })
}
