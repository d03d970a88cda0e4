use wi_core::{BorderMode, Error, Image, ImageView, Point2i, Rect};

use crate::{StepKernel2D, convolve_step_kernel};

/// Step-kernel responses over the left and right margin strips of a frame.
///
/// Each map has the size of its strip; a map pixel `(u, v)` corresponds to
/// raster pixel `(rect.x + u, rect.y + v)`.
#[derive(Debug, Clone, PartialEq)]
pub struct StripResponses {
    pub left: Image<f32>,
    pub right: Image<f32>,
    pub left_rect: Rect,
    pub right_rect: Rect,
}

impl StripResponses {
    /// Convolves both strips. Each strip is borrowed from `raster` and handled
    /// as a standalone image, so `border` applies at the strip edges.
    pub fn compute(
        raster: &ImageView<'_, u8>,
        left: Rect,
        right: Rect,
        kernel: &StepKernel2D,
        border: &BorderMode<f32>,
    ) -> Result<Self, Error> {
        Ok(Self {
            left: convolve_strip(raster, left, kernel, border)?,
            right: convolve_strip(raster, right, kernel, border)?,
            left_rect: left,
            right_rect: right,
        })
    }

    /// Response at raster point `p`.
    ///
    /// The map is picked by column alone (left strip first); `None` if `p.x`
    /// is in neither strip or the point lies outside the picked map.
    ///
    /// Both axes are taken relative to the strip origin, so a strip that
    /// starts below row 0 is read at `p.y - rect.y`. With the usual full-height
    /// strips (`y = 0`) this is the raster row itself.
    pub fn sample(&self, p: Point2i) -> Option<f32> {
        let (map, rect) = if self.left_rect.contains_x(p.x) {
            (&self.left, &self.left_rect)
        } else if self.right_rect.contains_x(p.x) {
            (&self.right, &self.right_rect)
        } else {
            return None;
        };

        let (u, v) = rect.local(p)?;
        map.get(u, v).copied()
    }
}

fn convolve_strip(
    raster: &ImageView<'_, u8>,
    rect: Rect,
    kernel: &StepKernel2D,
    border: &BorderMode<f32>,
) -> Result<Image<f32>, Error> {
    let strip = raster.subview(rect.x, rect.y, rect.width, rect.height)?;
    Ok(convolve_step_kernel(&strip, kernel, border))
}

#[cfg(test)]
mod tests {
    use wi_core::{BorderMode, Error, Image, Point2i, Rect};

    use crate::{StepKernel2D, StripResponses, convolve_step_kernel};

    fn frame() -> Image<u8> {
        Image::from_fn(64, 48, |x, y| ((x * 7 + y * y) % 251) as u8)
    }

    #[test]
    fn samples_come_from_the_matching_strip() {
        let img = frame();
        let left = Rect::new(0, 0, 10, 48);
        let right = Rect::new(50, 4, 14, 40);
        let kernel = StepKernel2D::new(2, 1);
        let border = BorderMode::Reflect101;

        let strips =
            StripResponses::compute(&img.as_view(), left, right, &kernel, &border).expect("fits");
        assert_eq!((strips.left.width(), strips.left.height()), (10, 48));
        assert_eq!((strips.right.width(), strips.right.height()), (14, 40));

        let right_view = img.as_view().subview(50, 4, 14, 40).expect("fits");
        let expected = convolve_step_kernel(&right_view, &kernel, &border);

        assert_eq!(strips.sample(Point2i::new(53, 10)), expected.get(3, 6).copied());
        assert_eq!(strips.sample(Point2i::new(7, 20)), strips.left.get(7, 20).copied());
    }

    #[test]
    fn rows_are_offset_by_the_strip_origin() {
        let img = frame();
        let left = Rect::new(2, 8, 10, 30);
        let kernel = StepKernel2D::new(1, 1);
        let strips = StripResponses::compute(
            &img.as_view(),
            left,
            Rect::new(50, 0, 14, 48),
            &kernel,
            &BorderMode::Reflect101,
        )
        .expect("fits");

        assert_eq!(strips.sample(Point2i::new(5, 20)), strips.left.get(3, 12).copied());
        assert_eq!(strips.sample(Point2i::new(5, 7)), None);
        assert_eq!(strips.sample(Point2i::new(5, 37)), strips.left.get(3, 29).copied());
        assert_eq!(strips.sample(Point2i::new(5, 38)), None);
        assert_eq!(strips.sample(Point2i::new(55, 20)), strips.right.get(5, 20).copied());
    }

    #[test]
    fn central_band_and_rows_outside_the_strip_have_no_sample() {
        let img = frame();
        let strips = StripResponses::compute(
            &img.as_view(),
            Rect::new(0, 0, 10, 48),
            Rect::new(50, 4, 14, 40),
            &StepKernel2D::new(1, 1),
            &BorderMode::Clamp,
        )
        .expect("fits");

        assert_eq!(strips.sample(Point2i::new(10, 5)), None);
        assert_eq!(strips.sample(Point2i::new(49, 5)), None);
        assert_eq!(strips.sample(Point2i::new(55, 2)), None);
        assert_eq!(strips.sample(Point2i::new(55, 44)), None);
        assert!(strips.sample(Point2i::new(55, 43)).is_some());
    }

    #[test]
    fn strip_outside_the_frame_is_an_error() {
        let img = frame();
        let err = StripResponses::compute(
            &img.as_view(),
            Rect::new(0, 0, 10, 48),
            Rect::new(60, 0, 10, 48),
            &StepKernel2D::new(1, 1),
            &BorderMode::Clamp,
        )
        .unwrap_err();

        assert_eq!(
            err,
            Error::RegionOutOfBounds {
                x: 60,
                y: 0,
                width: 10,
                height: 48
            }
        );
    }
}
