//! Triangle measures used by the curvature-based knee methods.
//!
//! A [`Triangle`] is three `[x, y]` vertices. The Menger curvature of the
//! triangle is the reciprocal of its circumradius:
//!
//! ```text
//! κ = 4·A / (|P₀P₁|·|P₁P₂|·|P₂P₀|)
//! κ² = 4·(2A)² / (d₀₁²·d₁₂²·d₂₀²)
//! ```
//!
//! where `2A` is the absolute value of the homogeneous determinant
//! `det([[x₀, y₀, 1], [x₁, y₁, 1], [x₂, y₂, 1]])`.
use nalgebra::Matrix3;

/// Three 2-D vertices, one `[x, y]` pair per entry.
pub type Triangle = [[f64; 2]; 3];

/// Twice the unsigned area of `vertices`.
///
/// Evaluated as `|det|` of the homogeneous 3×3 vertex matrix, so collinear
/// vertices give exactly `0.0` up to rounding.
pub fn double_triangle_area(vertices: &Triangle) -> f64 {
    let [[x0, y0], [x1, y1], [x2, y2]] = *vertices;
    #[rustfmt::skip]
    let homogeneous = Matrix3::new(
        x0, y0, 1.0,
        x1, y1, 1.0,
        x2, y2, 1.0,
    );
    homogeneous.determinant().abs()
}

/// Squared lengths of the edges `P₀P₁`, `P₁P₂`, `P₂P₀`, in that order.
pub fn squared_edge_lengths(vertices: &Triangle) -> [f64; 3] {
    let mut lengths = [0.0; 3];
    for (i, length) in lengths.iter_mut().enumerate() {
        let [xa, ya] = vertices[i];
        let [xb, yb] = vertices[(i + 1) % 3];
        let (dx, dy) = (xb - xa, yb - ya);
        *length = dx * dx + dy * dy;
    }
    lengths
}

/// Menger curvature of `vertices` (reciprocal circumradius).
///
/// Returns `NaN` when two vertices coincide, since the circumcircle is then
/// undefined. Upstream validation guarantees strictly increasing x, which
/// rules that case out for every triple the knee methods build.
pub fn menger_curvature(vertices: &Triangle) -> f64 {
    let double_area = double_triangle_area(vertices);
    let edge_product: f64 = squared_edge_lengths(vertices).iter().product();
    (4.0 * double_area * double_area / edge_product).sqrt()
}
