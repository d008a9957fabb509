use std::ops::{Index, IndexMut};

use ndarray::{ArrayView2, ArrayViewMut2, Axis};

use super::Tensor;
use crate::errors::TensorError;

// 引用式索引
impl Index<[usize; 3]> for Tensor {
    type Output = f32;

    fn index(&self, index: [usize; 3]) -> &f32 {
        &self.data[index]
    }
}

impl IndexMut<[usize; 3]> for Tensor {
    fn index_mut(&mut self, index: [usize; 3]) -> &mut f32 {
        &mut self.data[index]
    }
}

// 按通道取二维平面
impl Tensor {
    /// 取第`index`个通道的二维平面（只读视图）。
    /// 通道越界会panic。
    pub fn channel(&self, index: usize) -> ArrayView2<'_, f32> {
        self.assert_channel(index);
        self.data.index_axis(Axis(0), index)
    }

    /// 取第`index`个通道的二维平面（可变视图）。
    /// 通道越界会panic。
    pub fn channel_mut(&mut self, index: usize) -> ArrayViewMut2<'_, f32> {
        self.assert_channel(index);
        self.data.index_axis_mut(Axis(0), index)
    }

    fn assert_channel(&self, index: usize) {
        let channels = self.channels();
        assert!(
            index < channels,
            "{}",
            TensorError::ChannelOutOfRange { index, channels }
        );
    }
}
