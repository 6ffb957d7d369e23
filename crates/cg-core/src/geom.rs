use core::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2f {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2f {
    pub x: f32,
    pub y: f32,
}

impl Point2f {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance. Non-finite coordinates yield a non-finite result.
    pub fn distance(self, other: Point2f) -> f32 {
        (self - other).norm()
    }
}

impl Vec2f {
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y
    }

    pub fn norm(self) -> f32 {
        self.dot(self).sqrt()
    }
}

impl Add<Vec2f> for Point2f {
    type Output = Point2f;

    fn add(self, rhs: Vec2f) -> Self::Output {
        Point2f {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub<Point2f> for Point2f {
    type Output = Vec2f;

    fn sub(self, rhs: Point2f) -> Self::Output {
        Vec2f {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl From<[f32; 2]> for Point2f {
    fn from(v: [f32; 2]) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

impl From<(f32, f32)> for Point2f {
    fn from(v: (f32, f32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::{Point2f, Vec2f};

    #[test]
    fn vec_norm_and_dot() {
        let a = Vec2f { x: 3.0, y: 4.0 };
        let b = Vec2f { x: 1.0, y: -2.0 };

        assert!((a.dot(b) + 5.0).abs() < 1e-6);
        assert!((a.norm() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn point_distance() {
        let p = Point2f::new(0.0, 0.0);
        let q = Point2f::new(3.0, 4.0);

        assert_eq!(p.distance(q), 5.0);
        assert_eq!(q.distance(p), 5.0);
        assert_eq!(p.distance(p), 0.0);
        assert_eq!(p + Vec2f { x: 1.0, y: 2.0 }, Point2f::new(1.0, 2.0));
    }

    #[test]
    fn non_finite_distance_propagates() {
        let p = Point2f::new(f32::NAN, 0.0);
        let q = Point2f::new(f32::INFINITY, 1.0);
        let o = Point2f::default();

        assert!(!p.is_finite());
        assert!(p.distance(o).is_nan());
        assert!(!q.distance(o).is_finite());
        assert!(o.is_finite());
    }
}
