use crate::tensor::Tensor;

#[test]
fn test_shape_and_dims() {
    let tensor = Tensor::new(3, 5, 7);
    assert_eq!(tensor.shape(), [3, 5, 7]);
    assert_eq!(tensor.channels(), 3);
    assert_eq!(tensor.rows(), 5);
    assert_eq!(tensor.cols(), 7);
}

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓size↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
#[test]
fn test_size() {
    // 标量容器
    assert_eq!(Tensor::new(1, 1, 1).size(), 1);
    assert_eq!(Tensor::new(2, 3, 4).size(), 24);
}

#[test]
fn test_is_empty() {
    assert!(!Tensor::new(1, 1, 1).is_empty());
    assert!(Tensor::new(0, 3, 3).is_empty());
    assert!(Tensor::new(2, 0, 3).is_empty());
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑size↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

#[test]
fn test_compare_shapes() {
    let tensor1 = Tensor::new(1, 2, 3);
    let tensor2 = Tensor::full(9., 1, 2, 3);
    assert!(tensor1.is_same_shape(&tensor2));

    let tensor3 = Tensor::new(1, 3, 2);
    assert!(!tensor1.is_same_shape(&tensor3));
}

#[test]
fn test_values() {
    let data = [1., 2., 3., 4., 5., 6.];
    let tensor = Tensor::from_data(&data, [1, 2, 3]);
    assert_eq!(tensor.values(), data.to_vec());
}
