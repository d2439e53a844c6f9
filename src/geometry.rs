//! Area-of-interest summarisation.
//!
//! Derives a geodesic area and a centroid from a project's GeoJSON geometry.
//! Both values are best effort: anything that cannot be parsed or has a
//! self-intersecting ring simply yields no value.

use geo::{Centroid, GeodesicArea, Geometry, Polygon, Validation};
use serde_json::Value;

const SQ_METERS_PER_SQ_KM: f64 = 1_000_000.0;

/// Derived geometry fields of a project
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometrySummary {
    /// Geodesic area on WGS84 in km², rounded to 2 decimals
    pub area_sq_km: Option<f64>,
    /// `[longitude, latitude]`, each rounded to 4 decimals
    pub centroid: Option<[f64; 2]>,
}

impl GeometrySummary {
    pub fn is_empty(&self) -> bool {
        self.area_sq_km.is_none() && self.centroid.is_none()
    }
}

/// Summarise a GeoJSON geometry object.
///
/// `None` input skips all work. Area and centroid are computed separately
/// once the geometry parses, so one can be present without the other.
pub fn summarize_geometry(geometry: Option<&Value>) -> GeometrySummary {
    let Some(geometry) = geometry.and_then(parse_geometry) else {
        return GeometrySummary::default();
    };

    GeometrySummary {
        area_sq_km: area_sq_km(&geometry),
        centroid: centroid(&geometry),
    }
}

fn parse_geometry(value: &Value) -> Option<Geometry<f64>> {
    let parsed = geojson::Geometry::from_json_value(value.clone()).ok()?;
    let geometry = Geometry::<f64>::try_from(parsed).ok()?;
    is_well_formed(&geometry).then_some(geometry)
}

/// Polygons are checked one by one: parts of a multipolygon may touch.
fn is_well_formed(geometry: &Geometry<f64>) -> bool {
    match geometry {
        Geometry::MultiPolygon(multi) => multi.0.iter().all(Validation::is_valid),
        Geometry::GeometryCollection(collection) => collection.0.iter().all(is_well_formed),
        other => other.is_valid(),
    }
}

fn area_sq_km(geometry: &Geometry<f64>) -> Option<f64> {
    let area = geodesic_area_sq_m(geometry) / SQ_METERS_PER_SQ_KM;
    area.is_finite().then(|| round_to(area, 2))
}

// Signed area per polygon, so ring winding never matters.
fn geodesic_area_sq_m(geometry: &Geometry<f64>) -> f64 {
    match geometry {
        Geometry::Polygon(polygon) => polygon_area(polygon),
        Geometry::MultiPolygon(multi) => multi.0.iter().map(polygon_area).sum(),
        Geometry::GeometryCollection(collection) => {
            collection.0.iter().map(geodesic_area_sq_m).sum()
        }
        other => other.geodesic_area_signed().abs(),
    }
}

fn polygon_area(polygon: &Polygon<f64>) -> f64 {
    polygon.geodesic_area_signed().abs()
}

fn centroid(geometry: &Geometry<f64>) -> Option<[f64; 2]> {
    let point = geometry.centroid()?;
    let (x, y) = (point.x(), point.y());
    (x.is_finite() && y.is_finite()).then(|| [round_to(x, 4), round_to(y, 4)])
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
