/*
 * @Description  : 本文件仅包含一些属性方法，不包含任何运算方法，所以不会需要用到mut
 */

use super::Tensor;

impl Tensor {
    /// 张量的形状，依次为通道数、行数、列数
    pub fn shape(&self) -> [usize; 3] {
        let (c, h, w) = self.data.dim();
        [c, h, w]
    }

    pub fn channels(&self) -> usize {
        self.data.dim().0
    }

    pub fn rows(&self) -> usize {
        self.data.dim().1
    }

    pub fn cols(&self) -> usize {
        self.data.dim().2
    }

    /// 计算张量中所有元素的数量
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// 任一维度为0时张量为空
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 判断两个张量的形状是否严格一致
    pub fn is_same_shape(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }

    /// 按行主序（通道→行→列）展开为一维数据
    pub fn values(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }
}
