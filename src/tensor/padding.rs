use ndarray::{Array3, s};

use super::Tensor;

impl Tensor {
    /// 在每个通道平面的四周填充`fill_value`，返回新的张量，原张量不变。
    /// 新形状为`[c, rows + top + bottom, cols + left + right]`。
    pub fn padding(
        &self,
        left: usize,
        right: usize,
        top: usize,
        bottom: usize,
        fill_value: f32,
    ) -> Tensor {
        let [c, h, w] = self.shape();
        let mut data = Array3::from_elem((c, h + top + bottom, w + left + right), fill_value);
        data.slice_mut(s![.., top..top + h, left..left + w])
            .assign(&self.data);
        Tensor { data }
    }

    /// `padding`的原地版本
    pub fn padding_mut(
        &mut self,
        left: usize,
        right: usize,
        top: usize,
        bottom: usize,
        fill_value: f32,
    ) {
        *self = self.padding(left, right, top, bottom, fill_value);
    }
}
