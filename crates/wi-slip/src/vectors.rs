use wi_core::Polygon;

/// Step from vertex `i` to vertex `i + 1` of a boundary polygon.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeVector {
    pub dx: i32,
    pub dy: i32,
    /// `atan2(dy, dx)` in degrees.
    pub angle_deg: f64,
    /// `angle_deg` of this vector plus that of the previous one.
    pub angle_sum: f64,
}

impl EdgeVector {
    /// Step at exactly +-45 or +-135 degrees.
    pub fn is_chamfer(&self) -> bool {
        self.dx != 0 && self.dx.abs() == self.dy.abs()
    }

    pub fn is_unit_horizontal(&self) -> bool {
        self.dy == 0 && self.dx.abs() == 1
    }

    pub fn is_unit_vertical(&self) -> bool {
        self.dy.abs() == 1 && !self.is_chamfer()
    }
}

/// Edge vectors for a polygon of `n` vertices.
///
/// The result has `n - 1` entries. Entry 0 is a zero placeholder so that the
/// scan can always compare against `i - 1`; entries `1..=n-2` hold the steps.
/// The closing step from the last vertex back to the first is not included.
pub fn derive_edge_vectors(polygon: &Polygon) -> Vec<EdgeVector> {
    let points = polygon.as_slice();
    let mut vectors = vec![EdgeVector::default(); points.len().saturating_sub(1)];

    for i in 1..vectors.len() {
        let dx = points[i + 1].x - points[i].x;
        let dy = points[i + 1].y - points[i].y;
        let angle_deg = f64::from(dy).atan2(f64::from(dx)).to_degrees();

        vectors[i] = EdgeVector {
            dx,
            dy,
            angle_deg,
            angle_sum: angle_deg + vectors[i - 1].angle_deg,
        };
    }

    vectors
}
