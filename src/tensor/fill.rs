use super::Tensor;
use crate::errors::TensorError;

impl Tensor {
    /// 按行主序（通道→行→列）用`values`覆盖张量的全部元素，形状不变。
    /// `values`的数量必须与张量元素数量一致。
    pub fn fill(&mut self, values: &[f32]) -> Result<(), TensorError> {
        if values.len() != self.size() {
            return Err(TensorError::SizeMismatch {
                expected: self.size(),
                got: values.len(),
            });
        }
        self.data
            .iter_mut()
            .zip(values)
            .for_each(|(dst, &src)| *dst = src);
        Ok(())
    }
}
