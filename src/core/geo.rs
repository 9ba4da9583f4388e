use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// The whole-world bounds tile services advertise
    pub fn world() -> Self {
        Self::from_coords(-90.0, -180.0, 90.0, 180.0)
    }

    /// Creates the smallest bounds enclosing all of the given points,
    /// or `None` for an empty slice
    pub fn from_points(points: &[LatLng]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self::new(*first, *first);
        for point in &points[1..] {
            bounds.extend(point);
        }
        Some(bounds)
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Returns the union of this bounds with another bounds
    pub fn union(&self, other: &LatLngBounds) -> LatLngBounds {
        let south = self.south_west.lat.min(other.south_west.lat);
        let west = self.south_west.lng.min(other.south_west.lng);
        let north = self.north_east.lat.max(other.north_east.lat);
        let east = self.north_east.lng.max(other.north_east.lng);

        LatLngBounds::new(LatLng::new(south, west), LatLng::new(north, east))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(40.7128, -74.0060);
        assert_eq!(coord.lat, 40.7128);
        assert_eq!(coord.lng, -74.0060);
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = LatLngBounds::from_coords(40.0, -75.0, 41.0, -73.0);
        let point_inside = LatLng::new(40.5, -74.0);
        let point_outside = LatLng::new(42.0, -74.0);

        assert!(bounds.contains(&point_inside));
        assert!(!bounds.contains(&point_outside));
    }

    #[test]
    fn test_bounds_from_points() {
        let points = vec![
            LatLng::new(40.0, -74.0),
            LatLng::new(41.0, -73.0),
            LatLng::new(40.5, -73.5),
        ];

        let bounds = LatLngBounds::from_points(&points).unwrap();
        assert_eq!(bounds.south_west.lat, 40.0);
        assert_eq!(bounds.north_east.lat, 41.0);
        assert_eq!(bounds.south_west.lng, -74.0);
        assert_eq!(bounds.north_east.lng, -73.0);

        assert!(LatLngBounds::from_points(&[]).is_none());
    }

    #[test]
    fn test_bounds_union() {
        let a = LatLngBounds::from_coords(0.0, 0.0, 10.0, 10.0);
        let b = LatLngBounds::from_coords(-5.0, 5.0, 5.0, 15.0);

        let union = a.union(&b);
        assert_eq!(union.south_west.lat, -5.0);
        assert_eq!(union.south_west.lng, 0.0);
        assert_eq!(union.north_east.lat, 10.0);
        assert_eq!(union.north_east.lng, 15.0);
    }

    #[test]
    fn test_bounds_center() {
        let bounds = LatLngBounds::from_coords(10.0, 20.0, 20.0, 40.0);
        let center = bounds.center();
        assert_eq!(center.lat, 15.0);
        assert_eq!(center.lng, 30.0);
    }
}
