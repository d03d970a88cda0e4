use wi_core::Image;

/// Step-edge kernel of `(2v + 1) x (2h + 1)` taps.
///
/// Rows above the center are `+1`, rows below are `-1`, the center row is
/// `0`; every column carries the same profile. Stored separably as the
/// vertical sign profile and a horizontal box of ones.
#[derive(Debug, Clone, PartialEq)]
pub struct StepKernel2D {
    pub vertical: Vec<f32>,
    pub horizontal: Vec<f32>,
}

impl StepKernel2D {
    pub fn new(vertical_half: usize, horizontal_half: usize) -> Self {
        let vertical = (0..2 * vertical_half + 1)
            .map(|i| match i.cmp(&vertical_half) {
                core::cmp::Ordering::Less => 1.0,
                core::cmp::Ordering::Equal => 0.0,
                core::cmp::Ordering::Greater => -1.0,
            })
            .collect();
        let horizontal = vec![1.0f32; 2 * horizontal_half + 1];

        Self {
            vertical,
            horizontal,
        }
    }

    pub fn rows(&self) -> usize {
        self.vertical.len()
    }

    pub fn cols(&self) -> usize {
        self.horizontal.len()
    }

    pub fn to_dense(&self) -> Image<f32> {
        Image::from_fn(self.cols(), self.rows(), |x, y| {
            self.vertical[y] * self.horizontal[x]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::StepKernel2D;

    #[test]
    fn default_sized_kernel_layout() {
        let k = StepKernel2D::new(7, 4);
        assert_eq!(k.rows(), 15);
        assert_eq!(k.cols(), 9);

        let dense = k.to_dense();
        assert_eq!(dense.width(), 9);
        assert_eq!(dense.height(), 15);
        for x in 0..9 {
            assert_eq!(dense.get(x, 0), Some(&1.0));
            assert_eq!(dense.get(x, 6), Some(&1.0));
            assert_eq!(dense.get(x, 7), Some(&0.0));
            assert_eq!(dense.get(x, 8), Some(&-1.0));
            assert_eq!(dense.get(x, 14), Some(&-1.0));
        }
        assert_eq!(dense.data().iter().sum::<f32>(), 0.0);
    }

    #[test]
    fn zero_half_height_is_a_null_kernel() {
        let k = StepKernel2D::new(0, 1);
        assert_eq!(k.vertical, vec![0.0]);
        assert!(k.to_dense().data().iter().all(|&v| v == 0.0));
    }
}
