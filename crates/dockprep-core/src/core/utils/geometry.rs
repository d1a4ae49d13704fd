use nalgebra::{Point3, Vector3};

/// Mean of `points`, or `None` when there are none.
pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Point3<f64>> {
    let mut sum = Vector3::zeros();
    let mut count = 0usize;
    for p in points {
        sum += p.coords;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(Point3::from(sum / count as f64))
    }
}

/// Axis-aligned extents of a point cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Bounds {
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let bounds = iter.fold(
            Self {
                min: first,
                max: first,
            },
            |acc, p| Self {
                min: acc.min.inf(p),
                max: acc.max.sup(p),
            },
        );
        Some(bounds)
    }

    /// `max - min` along each axis.
    pub fn extent(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Axes (0 = x, 1 = y, 2 = z) on which `point` lies outside `[min, max]`. A NaN
    /// coordinate is outside.
    pub fn axes_outside(&self, point: &Point3<f64>) -> Vec<usize> {
        (0..3)
            .filter(|&axis| !(self.min[axis] <= point[axis] && point[axis] <= self.max[axis]))
            .collect()
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        self.axes_outside(point).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn centroid_of_nothing_is_none() {
        let points: Vec<Point3<f64>> = Vec::new();
        assert!(centroid(&points).is_none());
    }

    #[test]
    fn centroid_averages_each_axis() {
        let points = [
            Point3::new(1.0, 0.0, 3.0),
            Point3::new(2.0, 4.0, 3.0),
            Point3::new(3.0, 2.0, 3.0),
        ];
        let c = centroid(&points).unwrap();
        assert!((c - Point3::new(2.0, 2.0, 3.0)).norm() < EPS);
    }

    #[test]
    fn bounds_track_min_and_max_per_axis() {
        let points = [
            Point3::new(0.0, -5.0, 10.0),
            Point3::new(100.0, 5.0, -10.0),
            Point3::new(50.0, 0.0, 0.0),
        ];
        let b = Bounds::from_points(&points).unwrap();
        assert_eq!(b.min, Point3::new(0.0, -5.0, -10.0));
        assert_eq!(b.max, Point3::new(100.0, 5.0, 10.0));
        assert_eq!(b.extent(), Vector3::new(100.0, 10.0, 20.0));
    }

    #[test]
    fn containment_is_inclusive_and_per_axis() {
        let b = Bounds {
            min: Point3::new(0.0, 0.0, 0.0),
            max: Point3::new(10.0, 10.0, 10.0),
        };
        assert!(b.contains(&Point3::new(0.0, 10.0, 5.0)));
        assert_eq!(b.axes_outside(&Point3::new(5.0, 11.0, 5.0)), vec![1]);
        assert_eq!(b.axes_outside(&Point3::new(-1.0, 5.0, 12.0)), vec![0, 2]);
    }

    #[test]
    fn nan_coordinate_is_outside() {
        let b = Bounds {
            min: Point3::new(0.0, 0.0, 0.0),
            max: Point3::new(100.0, 100.0, 100.0),
        };
        let point = Point3::new(f64::NAN, 50.0, 50.0);
        assert_eq!(b.axes_outside(&point), vec![0]);
        assert!(!b.contains(&point));
    }
}
