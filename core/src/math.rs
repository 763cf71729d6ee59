//! Math type aliases and helper functions.
//!
//! Canvas geometry is 2D and double precision. Affine transforms are stored
//! as plain `[f64; 6]` arrays so they can be copied into attribute snapshots
//! without aliasing; composition and inversion go through `nalgebra`.

pub use nalgebra;

/// 2D vector (f64).
pub type Vec2 = nalgebra::Vector2<f64>;

/// 2D point (f64).
pub type Point2 = nalgebra::Point2<f64>;

/// 3x3 homogeneous matrix (f64).
pub type Mat3 = nalgebra::Matrix3<f64>;

/// 2D affine transform laid out as `[a, b, c, d, tx, ty]`.
///
/// Maps a point with `x' = a*x + c*y + tx` and `y' = b*x + d*y + ty`.
pub type Affine = [f64; 6];

/// Index of the x translation component in an [`Affine`].
pub const AFFINE_TX: usize = 4;

/// Index of the y translation component in an [`Affine`].
pub const AFFINE_TY: usize = 5;

/// The identity transform.
pub const IDENTITY: Affine = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

// ===== Helper functions =====

/// Convert an affine array to a homogeneous 3x3 matrix.
pub fn mat3_from_affine(tf: &Affine) -> Mat3 {
    let [a, b, c, d, tx, ty] = *tf;
    #[rustfmt::skip]
    let result = Mat3::new(
        a,   c,   tx,
        b,   d,   ty,
        0.0, 0.0, 1.0,
    );
    result
}

/// Convert a homogeneous 3x3 matrix back to an affine array.
///
/// The projective row is ignored.
pub fn affine_from_mat3(m: &Mat3) -> Affine {
    [
        m[(0, 0)],
        m[(1, 0)],
        m[(0, 1)],
        m[(1, 1)],
        m[(0, 2)],
        m[(1, 2)],
    ]
}

/// Compose two transforms: the result applies `rhs` first, then `lhs`.
pub fn affine_multiply(lhs: &Affine, rhs: &Affine) -> Affine {
    affine_from_mat3(&(mat3_from_affine(lhs) * mat3_from_affine(rhs)))
}

/// Invert a transform. Returns `None` for a singular transform
/// (zero width or height scale).
pub fn affine_invert(tf: &Affine) -> Option<Affine> {
    mat3_from_affine(tf)
        .try_inverse()
        .map(|m| affine_from_mat3(&m))
}

/// Build a translation-only transform.
pub fn affine_from_translation(x: f64, y: f64) -> Affine {
    affine_from_mat3(&Mat3::new_translation(&Vec2::new(x, y)))
}

/// Build a rotation-only transform (radians, about the origin).
pub fn affine_from_rotation(angle: f64) -> Affine {
    affine_from_mat3(&Mat3::new_rotation(angle))
}

/// Rotation angle of a transform in radians, in `(-PI, PI]`.
pub fn affine_rotation(tf: &Affine) -> f64 {
    tf[1].atan2(tf[0])
}

/// Rotate an already-placed transform by `angle` radians about `center`,
/// which is given in the same space the transform maps into.
pub fn affine_rotate_about(tf: &Affine, angle: f64, center: Point2) -> Affine {
    let pivot = Mat3::new_translation(&center.coords)
        * Mat3::new_rotation(angle)
        * Mat3::new_translation(&-center.coords);
    affine_from_mat3(&(pivot * mat3_from_affine(tf)))
}

/// Map a point through a transform.
pub fn affine_transform_point(tf: &Affine, p: Point2) -> Point2 {
    let [a, b, c, d, tx, ty] = *tf;
    Point2::new(a * p.x + c * p.y + tx, b * p.x + d * p.y + ty)
}

// ===== Bounds =====

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point2,
    pub max: Point2,
}

impl Bounds {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point. `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Point2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first, first);
        for p in iter {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    /// Bounds of the `width` x `height` box at the origin after `tf`.
    pub fn of_transformed_rect(tf: &Affine, width: f64, height: f64) -> Self {
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(width, 0.0),
            Point2::new(width, height),
            Point2::new(0.0, height),
        ];
        let mapped = corners.map(|p| affine_transform_point(tf, p));
        let mut bounds = Self::new(mapped[0], mapped[0]);
        for p in &mapped[1..] {
            bounds = bounds.union(&Self::new(*p, *p));
        }
        bounds
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, other: &Self) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }
}
