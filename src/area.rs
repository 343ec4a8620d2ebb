//! # Area Containment
//!
//! Decides whether a point lies inside a boundary ring using the even-odd
//! ray-casting rule.
//!
//! ## Axis convention
//! The ray test runs on X = latitude and Y = longitude. Edges with equal
//! longitude at both ends count as "horizontal" and are skipped. Swapping the
//! axes changes which edges are skipped and the results for non-rectangular
//! rings, so the convention is fixed here.
//!
//! ## Two-point shorthand
//! A boundary of exactly two points stands for the axis-aligned rectangle
//! spanned by their min/max latitude and longitude.
//!
//! ## Points on the boundary
//! A point lying exactly on an edge or corner is classified by floating-point
//! tie-breaking: on the rectangle shorthand the minimum-latitude and
//! minimum-longitude sides come out as outside, the opposite sides as inside.

use crate::error::{NauticalError, Result};
use crate::location::GeoPoint;
use tracing::debug;

/// True when `point` lies inside the ring described by `boundary`.
///
/// The ring closes implicitly from the last point back to the first. Fails with
/// [`NauticalError::DegenerateBoundary`] for fewer than two points.
///
/// # Example
/// ```
/// use nautical_lib::area::contains;
/// use nautical_lib::location::GeoPoint;
///
/// let corners = [
///     GeoPoint::new(30.0, -80.0, 0.0).unwrap(),
///     GeoPoint::new(40.0, -70.0, 0.0).unwrap(),
/// ];
/// let buoy = GeoPoint::new(35.0, -75.0, 0.0).unwrap();
/// assert!(contains(&corners, &buoy).unwrap());
/// ```
pub fn contains(boundary: &[GeoPoint], point: &GeoPoint) -> Result<bool> {
    let inside = match boundary {
        [] | [_] => {
            return Err(NauticalError::DegenerateBoundary {
                count: boundary.len(),
            })
        }
        [a, b] => crossings(&rectangle(a, b), point) % 2 == 1,
        ring => crossings(ring, point) % 2 == 1,
    };

    debug!(%point, vertices = boundary.len(), inside, "area containment");
    Ok(inside)
}

/// Reduce a set of points to the two-point (min corner, max corner) shorthand.
///
/// Returns `None` for an empty set.
pub fn bounding_box(points: &[GeoPoint]) -> Option<[GeoPoint; 2]> {
    let first = points.first()?;
    let init = (first.x(), first.x(), first.y(), first.y());
    let (min_lat, max_lat, min_lon, max_lon) =
        points[1..].iter().fold(init, |(min_lat, max_lat, min_lon, max_lon), p| {
            (
                min_lat.min(p.x()),
                max_lat.max(p.x()),
                min_lon.min(p.y()),
                max_lon.max(p.y()),
            )
        });

    // Extremes of validated points are themselves in range.
    let min = GeoPoint::new(min_lat, min_lon, 0.0).ok()?;
    let max = GeoPoint::new(max_lat, max_lon, 0.0).ok()?;
    Some([min, max])
}

/// Corners of the rectangle spanned by two points, in ring order.
fn rectangle(a: &GeoPoint, b: &GeoPoint) -> [Corner; 4] {
    let (min_lat, max_lat) = (a.x().min(b.x()), a.x().max(b.x()));
    let (min_lon, max_lon) = (a.y().min(b.y()), a.y().max(b.y()));

    [
        Corner { x: min_lat, y: min_lon },
        Corner { x: min_lat, y: max_lon },
        Corner { x: max_lat, y: max_lon },
        Corner { x: max_lat, y: min_lon },
    ]
}

/// A ring vertex in ray-test coordinates.
#[derive(Clone, Copy, Debug)]
struct Corner {
    x: f64,
    y: f64,
}

trait Vertex {
    fn corner(&self) -> Corner;
}

impl Vertex for Corner {
    fn corner(&self) -> Corner {
        *self
    }
}

impl Vertex for GeoPoint {
    fn corner(&self) -> Corner {
        Corner {
            x: self.x(),
            y: self.y(),
        }
    }
}

/// Number of ring edges crossed by the ray from `point`.
fn crossings<V: Vertex>(ring: &[V], point: &GeoPoint) -> usize {
    let p = point.corner();
    let mut count = 0;

    for (i, vertex) in ring.iter().enumerate() {
        let curr = vertex.corner();
        let next = ring[(i + 1) % ring.len()].corner();

        if curr.y == next.y {
            continue;
        }

        let within_y = p.y > curr.y.min(next.y) && p.y <= curr.y.max(next.y);
        if within_y && p.x <= curr.x.max(next.x) {
            let x_intercept = (p.y - curr.y) * (next.x - curr.x) / (next.y - curr.y) + curr.x;
            if curr.x == next.x || p.x <= x_intercept {
                count += 1;
            }
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(latitude, longitude, 0.0).unwrap()
    }

    #[test]
    fn rectangle_shorthand() {
        let boundary = [pt(10.0, 10.0), pt(0.0, 0.0)];

        assert!(contains(&boundary, &pt(5.0, 5.0)).unwrap());
        assert!(contains(&boundary, &pt(0.5, 9.5)).unwrap());

        assert!(!contains(&boundary, &pt(15.0, 5.0)).unwrap());
        assert!(!contains(&boundary, &pt(5.0, 15.0)).unwrap());
        assert!(!contains(&boundary, &pt(-1.0, -1.0)).unwrap());
    }

    #[test]
    fn rectangle_edges_and_corners_fall_outside() {
        let boundary = [pt(0.0, 0.0), pt(10.0, 10.0)];

        // minimum latitude side
        assert!(!contains(&boundary, &pt(0.0, 5.0)).unwrap());
        // minimum longitude side
        assert!(!contains(&boundary, &pt(5.0, 0.0)).unwrap());
        // corner
        assert!(!contains(&boundary, &pt(0.0, 0.0)).unwrap());
    }

    #[test]
    fn rectangle_maximum_sides_fall_inside() {
        let boundary = [pt(0.0, 0.0), pt(10.0, 10.0)];

        // maximum latitude side
        assert!(contains(&boundary, &pt(10.0, 5.0)).unwrap());
        // maximum longitude side
        assert!(contains(&boundary, &pt(5.0, 10.0)).unwrap());
    }

    #[test]
    fn triangle_ring() {
        let ring = [pt(0.0, 0.0), pt(10.0, 0.0), pt(0.0, 10.0)];

        assert!(contains(&ring, &pt(2.0, 2.0)).unwrap());
        assert!(contains(&ring, &pt(1.0, 7.5)).unwrap());
        assert!(!contains(&ring, &pt(8.0, 8.0)).unwrap());
        assert!(!contains(&ring, &pt(-1.0, 5.0)).unwrap());
    }

    #[test]
    fn concave_ring() {
        // U shape opening towards high latitude
        let ring = [
            pt(0.0, 0.0),
            pt(0.0, 30.0),
            pt(30.0, 30.0),
            pt(30.0, 20.0),
            pt(10.0, 20.0),
            pt(10.0, 10.0),
            pt(30.0, 10.0),
            pt(30.0, 0.0),
        ];

        assert!(contains(&ring, &pt(20.0, 5.0)).unwrap());
        assert!(contains(&ring, &pt(20.0, 25.0)).unwrap());
        assert!(contains(&ring, &pt(5.0, 15.0)).unwrap());
        assert!(!contains(&ring, &pt(20.0, 15.0)).unwrap());
    }

    #[test]
    fn fewer_than_two_points_is_degenerate() {
        assert_eq!(
            contains(&[pt(1.0, 1.0)], &pt(1.0, 1.0)).unwrap_err(),
            NauticalError::DegenerateBoundary { count: 1 }
        );
        assert!(contains(&[], &pt(1.0, 1.0)).is_err());
    }

    #[test]
    fn bounding_box_spans_extremes() {
        let points = [pt(5.0, -3.0), pt(-2.0, 8.0), pt(1.0, 1.0)];
        let [min, max] = bounding_box(&points).unwrap();
        assert_eq!((min.latitude(), min.longitude()), (-2.0, -3.0));
        assert_eq!((max.latitude(), max.longitude()), (5.0, 8.0));

        assert!(contains(&[min, max], &pt(0.0, 0.0)).unwrap());
        assert!(bounding_box(&[]).is_none());
    }
}
