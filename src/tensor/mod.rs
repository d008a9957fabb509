/*
 * @Description  : 三维张量，按（通道，行，列）寻址，用于承载特征图、卷积核与偏置
 */

use ndarray::Array3;

use crate::errors::TensorError;

mod fill;
mod index;
mod padding;
mod property;

#[cfg(test)]
mod tests;

/// 定义张量的结构体，形状固定为`[channels, rows, cols]`。
/// 注：偏置这类标量用形状为`[1, 1, 1]`的张量承载；
/// 形状在创建后不再改变（`padding_mut`除外，它会整体替换内部存储）。
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: Array3<f32>,
}

impl Tensor {
    /// 创建一个全零张量
    pub fn new(channels: usize, rows: usize, cols: usize) -> Tensor {
        Tensor {
            data: Array3::zeros((channels, rows, cols)),
        }
    }

    /// 按行主序（通道→行→列）由`data`创建张量。
    /// `data`的长度必须和`shape`中所有元素的乘积相等，否则会panic。
    pub fn from_data(data: &[f32], shape: [usize; 3]) -> Tensor {
        let expected = shape.iter().product::<usize>();
        assert!(
            data.len() == expected,
            "{}",
            TensorError::SizeMismatch {
                expected,
                got: data.len(),
            }
        );
        let mut tensor = Tensor::new(shape[0], shape[1], shape[2]);
        tensor.data.iter_mut().zip(data).for_each(|(dst, &src)| *dst = src);
        tensor
    }

    /// 创建一个所有元素都为`value`的张量
    pub fn full(value: f32, channels: usize, rows: usize, cols: usize) -> Tensor {
        Tensor {
            data: Array3::from_elem((channels, rows, cols), value),
        }
    }
}
