//! # Geofence Test
//!
//! Point-in-polygon by crossing number (ray casting).
//!
//! A horizontal ray is cast from the test point towards increasing
//! longitude; the point is inside when the ray crosses an odd number of
//! edges. With `y` = latitude and `x` = longitude, for each edge from
//! vertex `j` (the previous vertex, starting at `n - 1`) to vertex `i`:
//!
//! ```text
//! (y_i > lat) != (y_j > lat)
//!     && lon < (x_j - x_i) * (lat - y_i) / (y_j - y_i) + x_i
//! ```
//!
//! The first clause counts an edge only when the test latitude falls in the
//! half-open span between its endpoint latitudes, so horizontal edges are
//! never counted and a vertex shared by two edges is counted once. The
//! division is safe because the clause guarantees `y_i != y_j`.
//!
//! Arithmetic is plain IEEE-754 `f64` evaluated in exactly the order written
//! above (Rust never contracts it into a fused multiply-add), with no
//! bounding-box shortcut, so identical inputs give identical answers on every
//! platform. Boundary classification is whatever this formula yields; it is
//! pinned by the reference vectors in the tests below.
//!
//! Non-finite test coordinates fail every comparison and are classified
//! outside.

/// Crossing-number test of `(lat, lon)` against a closed polygon.
///
/// `latitudes[k]` and `longitudes[k]` are the k-th vertex; the last vertex
/// implicitly connects back to the first. Callers must supply slices of
/// equal length holding at least three distinct vertices;
/// [`Fence`](super::envelope::Fence) guarantees this.
pub fn point_in_polygon(latitudes: &[f64], longitudes: &[f64], lat: f64, lon: f64) -> bool {
    debug_assert_eq!(latitudes.len(), longitudes.len());
    let n = latitudes.len().min(longitudes.len());
    if n == 0 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (yi, xi) = (latitudes[i], longitudes[i]);
        let (yj, xj) = (latitudes[j], longitudes[j]);

        if ((yi > lat) != (yj > lat)) && (lon < (xj - xi) * (lat - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}
