//! Fixed-point 2D and 3D vectors.

use core::ops::{
    Add,
    Mul,
    Neg,
    Shr,
    Sub,
};

use crate::scalar::{
    self,
    Scalar,
    ZERO,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Vec2 {
    pub x: Scalar,
    pub y: Scalar,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(ZERO, ZERO);

    #[inline]
    pub const fn new(x: Scalar, y: Scalar) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Self) -> Scalar {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length(self) -> Scalar {
        scalar::sqrt(self.dot(self))
    }

    /// Clamps each component to `[-limit, limit]`.
    #[inline]
    pub fn clamp(self, limit: Scalar) -> Self {
        Self::new(self.x.clamp(-limit, limit), self.y.clamp(-limit, limit))
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<Scalar> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Scalar) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Shr<u32> for Vec2 {
    type Output = Self;

    #[inline]
    fn shr(self, rhs: u32) -> Self::Output {
        Self::new(self.x >> rhs, self.y >> rhs)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Vec3 {
    pub x: Scalar,
    pub y: Scalar,
    pub z: Scalar,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(ZERO, ZERO, ZERO);

    #[inline]
    pub const fn new(x: Scalar, y: Scalar, z: Scalar) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn xy(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn dot(self, other: Self) -> Scalar {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length(self) -> Scalar {
        scalar::sqrt(self.dot(self))
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    ///
    /// Components are first divided by the largest magnitude so short vectors
    /// keep their precision instead of squaring down to nothing.
    pub fn normalized(self) -> Self {
        let m = self.x.abs().max(self.y.abs()).max(self.z.abs());
        if m == ZERO {
            return self;
        }
        let s = Self::new(self.x / m, self.y / m, self.z / m);
        let len = s.length();
        Self::new(s.x / len, s.y / len, s.z / len)
    }

    /// Rescales to the given length.
    pub fn scaled_to(self, length: Scalar) -> Self {
        self.normalized() * length
    }

    /// Linear interpolation `self + (to - self) * t`.
    #[inline]
    pub fn lerp(self, to: Self, t: Scalar) -> Self {
        self + (to - self) * t
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<Scalar> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Scalar) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Shr<u32> for Vec3 {
    type Output = Self;

    #[inline]
    fn shr(self, rhs: u32) -> Self::Output {
        Self::new(self.x >> rhs, self.y >> rhs, self.z >> rhs)
    }
}
