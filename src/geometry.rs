//! 2D affine transforms in PDF matrix convention.

use serde::Serialize;

/// Affine map `[a b c d e f]`: `x' = a·x + c·y + e`, `y' = b·x + d·y + f`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// Counter-clockwise rotation in degrees (y axis pointing up).
    pub fn rotation(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::IDENTITY
        }
    }

    /// `self ∘ inner`: `inner` is applied first, then `self`.
    pub fn then_local(&self, inner: &Affine) -> Affine {
        Affine {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            e: self.a * inner.e + self.c * inner.f + self.e,
            f: self.b * inner.e + self.d * inner.f + self.f,
        }
    }

    /// Move the local origin, like a PDF `cm` translation.
    pub fn translate(&self, tx: f64, ty: f64) -> Affine {
        self.then_local(&Affine::translation(tx, ty))
    }

    /// Rotate the local axes, like a PDF `cm` rotation.
    pub fn rotate(&self, degrees: f64) -> Affine {
        self.then_local(&Affine::rotation(degrees))
    }

    pub fn scale(&self, sx: f64, sy: f64) -> Affine {
        self.then_local(&Affine::scaling(sx, sy))
    }

    pub fn apply(&self, point: (f64, f64)) -> (f64, f64) {
        let (x, y) = point;
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Matrix entries in PDF operand order.
    pub fn to_array(&self) -> [f32; 6] {
        [
            self.a as f32,
            self.b as f32,
            self.c as f32,
            self.d as f32,
            self.e as f32,
            self.f as f32,
        ]
    }
}

/// Axis-aligned rectangle in some local coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The same rectangle with non-negative width and height.
    pub fn normalized(&self) -> Rect {
        let (x0, x1) = ordered(self.x, self.x + self.width);
        let (y0, y1) = ordered(self.y, self.y + self.height);
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Overlap of two rectangles, or `None` when they share no area.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let (a, b) = (self.normalized(), other.normalized());
        let x0 = a.x.max(b.x);
        let y0 = a.y.max(b.y);
        let x1 = (a.x + a.width).min(b.x + b.width);
        let y1 = (a.y + a.height).min(b.y + b.height);
        (x1 > x0 && y1 > y0).then(|| Rect::new(x0, y0, x1 - x0, y1 - y0))
    }

    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.x, self.y),
            (self.x + self.width, self.y),
            (self.x + self.width, self.y + self.height),
            (self.x, self.y + self.height),
        ]
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
