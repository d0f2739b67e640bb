use geojson::{FeatureCollection, Feature, Geometry, Value};
use crate::{
    error::Result,
    error::SkeletonError,
    types::{GridPoint, Polyline, TracedSkeleton},
};

impl TracedSkeleton {
    pub fn to_geojson(&self) -> Result<FeatureCollection> {
        let mut features = Vec::new();

        for (i, polyline) in self.polylines.iter().enumerate() {
            let coordinates = polyline
                .iter()
                .map(|p| vec![f64::from(p.x), f64::from(p.y)])
                .collect();

            let geometry = Geometry::new(Value::LineString(coordinates));

            let mut properties = serde_json::Map::new();
            properties.insert("id".to_string(), serde_json::Value::Number(serde_json::Number::from(i)));
            properties.insert("point_count".to_string(), serde_json::Value::Number(serde_json::Number::from(polyline.len())));
            properties.insert("length".to_string(), serde_json::Value::Number(
                serde_json::Number::from_f64(polyline.length()).unwrap_or(serde_json::Number::from(0))
            ));

            let feature = Feature {
                bbox: None,
                geometry: Some(geometry),
                id: Some(geojson::feature::Id::Number(serde_json::Number::from(i))),
                properties: Some(properties),
                foreign_members: None,
            };

            features.push(feature);
        }

        // Add metadata to foreign members of the FeatureCollection
        let mut foreign_members = serde_json::Map::new();
        foreign_members.insert("image_width".to_string(), serde_json::Value::Number(serde_json::Number::from(self.image_width)));
        foreign_members.insert("image_height".to_string(), serde_json::Value::Number(serde_json::Number::from(self.image_height)));
        foreign_members.insert("polyline_count".to_string(), serde_json::Value::Number(serde_json::Number::from(self.polylines.len())));

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        })
    }

    /// Export to GeoJSON and serialize to JSON string
    pub fn to_geojson_string(&self) -> Result<String> {
        let geojson = self.to_geojson()?;
        Ok(serde_json::to_string_pretty(&geojson)?)
    }

    /// Save GeoJSON to file
    pub fn save_geojson(&self, path: &str) -> Result<()> {
        let geojson_string = self.to_geojson_string()?;
        std::fs::write(path, geojson_string)?;
        Ok(())
    }

    /// Load TracedSkeleton from GeoJSON file
    pub fn from_geojson_file(path: &str) -> Result<Self> {
        let geojson_str = std::fs::read_to_string(path)?;
        Self::from_geojson_string(&geojson_str)
    }

    /// Load TracedSkeleton from GeoJSON string
    pub fn from_geojson_string(geojson_str: &str) -> Result<Self> {
        let geojson: FeatureCollection = geojson_str.parse()?;

        // Extract metadata from foreign members
        let foreign_members = geojson.foreign_members.as_ref()
            .ok_or_else(|| SkeletonError::GeometricComputation("Missing metadata in GeoJSON".to_string()))?;

        let image_width = foreign_members.get("image_width")
            .and_then(|v| v.as_u64())
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| SkeletonError::GeometricComputation("Missing or invalid image_width".to_string()))?;

        let image_height = foreign_members.get("image_height")
            .and_then(|v| v.as_u64())
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| SkeletonError::GeometricComputation("Missing or invalid image_height".to_string()))?;

        let mut polylines = Vec::new();

        for feature in geojson.features {
            let Some(geometry) = feature.geometry else {
                continue;
            };
            if let Value::LineString(coords) = geometry.value {
                let points = coords
                    .iter()
                    .filter(|coord| coord.len() >= 2)
                    .map(|coord| GridPoint::new(coord[0].round() as i32, coord[1].round() as i32))
                    .collect();
                polylines.push(Polyline::new(points));
            }
        }

        Ok(TracedSkeleton {
            polylines,
            image_width,
            image_height,
        })
    }
}
