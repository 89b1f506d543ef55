//! Country geometry index.
//!
//! Built once from a GeoJSON feature collection keyed by the `name`
//! property. Each feature's centroid is computed at build time and cached;
//! the index is immutable afterwards and safe to share between sessions.

use crate::{CountryId, EngineError, LatLon, Result};
use geojson::{Feature, FeatureCollection, Value};
use std::collections::HashMap;
use tracing::info;

/// Planar shoelace centroid of one ring: `(|area|, cx, cy)` in degrees.
/// Falls back to the vertex mean when the ring area degenerates.
fn ring_centroid(ring: &[Vec<f64>]) -> Option<(f64, f64, f64)> {
    if ring.len() < 3 || ring.iter().any(|p| p.len() < 2) {
        return None;
    }

    let n = ring.len();
    let mut area2 = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for i in 0..n {
        let (x1, y1) = (ring[i][0], ring[i][1]);
        let j = (i + 1) % n;
        let (x2, y2) = (ring[j][0], ring[j][1]);
        let cross = x1 * y2 - x2 * y1;
        area2 += cross;
        cx += (x1 + x2) * cross;
        cy += (y1 + y2) * cross;
    }

    if area2.abs() < 1e-12 {
        let (sx, sy) = ring
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p[0], sy + p[1]));
        return Some((0.0, sx / n as f64, sy / n as f64));
    }

    let area = area2 / 2.0;
    Some((area.abs(), cx / (6.0 * area), cy / (6.0 * area)))
}

/// Representative point for a feature geometry. Polygons use the exterior
/// ring; multipolygons are area-weighted over their members.
fn centroid_of(value: &Value) -> Option<LatLon> {
    match value {
        Value::Point(position) => {
            if position.len() < 2 {
                return None;
            }
            Some(LatLon::new(position[1], position[0]))
        }
        Value::Polygon(rings) => {
            let (_, cx, cy) = ring_centroid(rings.first()?)?;
            Some(LatLon::new(cy, cx))
        }
        Value::MultiPolygon(polygons) => {
            let mut total = 0.0;
            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            let mut parts = Vec::new();

            for rings in polygons {
                let Some(ring) = rings.first() else { continue };
                let Some((area, cx, cy)) = ring_centroid(ring) else {
                    continue;
                };
                total += area;
                sum_x += cx * area;
                sum_y += cy * area;
                parts.push((cx, cy));
            }

            if total > 0.0 {
                Some(LatLon::new(sum_y / total, sum_x / total))
            } else if !parts.is_empty() {
                // All member areas degenerate: plain average of the parts.
                let n = parts.len() as f64;
                let (sx, sy) = parts
                    .iter()
                    .fold((0.0, 0.0), |(ax, ay), (x, y)| (ax + x, ay + y));
                Some(LatLon::new(sy / n, sx / n))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Read-only index of country centroids and display geometry.
#[derive(Debug, Clone)]
pub struct GeoIndex {
    centroids: HashMap<CountryId, LatLon>,
    features: HashMap<CountryId, Feature>,
    ids: Vec<CountryId>,
}

impl GeoIndex {
    /// Build the index from a feature collection. Features missing a `name`
    /// property or a usable geometry are skipped with a count; an input
    /// yielding no countries at all is a fatal error.
    pub fn from_feature_collection(collection: FeatureCollection) -> Result<Self> {
        let mut centroids = HashMap::new();
        let mut features = HashMap::new();
        let mut skipped = 0;

        for feature in collection.features {
            let name = feature
                .property("name")
                .and_then(|v| v.as_str())
                .map(str::to_owned);
            let Some(name) = name else {
                skipped += 1;
                continue;
            };
            let Some(centroid) = feature.geometry.as_ref().and_then(|g| centroid_of(&g.value))
            else {
                skipped += 1;
                continue;
            };
            centroids.insert(name.clone(), centroid);
            features.insert(name, feature);
        }

        if centroids.is_empty() {
            return Err(EngineError::NoCountries);
        }
        if skipped > 0 {
            info!("Skipped {} features without a name or usable geometry", skipped);
        }

        let mut ids: Vec<CountryId> = centroids.keys().cloned().collect();
        ids.sort();

        Ok(Self {
            centroids,
            features,
            ids,
        })
    }

    /// Cached centroid for a country, if it is in the index.
    pub fn centroid(&self, id: &str) -> Option<LatLon> {
        self.centroids.get(id).copied()
    }

    /// Great-circle distance between two centroids in km.
    pub fn distance_km(&self, a: &LatLon, b: &LatLon) -> f64 {
        a.distance_km(b)
    }

    /// All indexed ids, sorted; order is stable across calls.
    pub fn all_ids(&self) -> &[CountryId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Clone-subset of the stored features restricted to `ids`, in the given
    /// order, for the view model only. Unknown ids are ignored.
    pub fn geometry_for(&self, ids: &[CountryId]) -> FeatureCollection {
        let features = ids
            .iter()
            .filter_map(|id| self.features.get(id).cloned())
            .collect();
        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
