/// The map the overlay is drawn on.
pub trait RenderSurface {
    fn fit_bounds(&mut self, bounds: &geo::Rect, padding: u32);
    /// Draw the static flight path, replacing any previous one.
    fn draw_flight_path(&mut self, path: &geo::LineString);
    /// Move the overlay with this id onto new corners (top-right, bottom-right, bottom-left,
    /// top-left), creating it on first use.
    fn set_overlay_coordinates(&mut self, overlay_id: &str, corners: [geo::Coord; 4]);
}

pub const FLIGHT_PATH_ID: &str = "flight_path";

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayState {
    pub corners: [geo::Coord; 4],
    pub updates: usize,
}

/// Keeps the current map state so it can be exported as GeoJSON.
pub struct GeoJsonSurface {
    pub configuration: crate::configuration::MapConfiguration,
    pub camera_bounds: Option<(geo::Rect, u32)>,
    pub flight_path: Option<geo::LineString>,
    pub overlays: std::collections::BTreeMap<String, OverlayState>,
}

impl GeoJsonSurface {
    pub fn new(configuration: &crate::configuration::MapConfiguration) -> Self {
        Self {
            configuration: configuration.to_owned(),
            camera_bounds: None,
            flight_path: None,
            overlays: std::collections::BTreeMap::new(),
        }
    }

    pub fn overlay(&self, overlay_id: &str) -> Option<&OverlayState> {
        self.overlays.get(overlay_id)
    }

    pub fn feature_collection(&self) -> geojson::FeatureCollection {
        let mut features = vec![];

        if let Some(path) = &self.flight_path {
            let mut properties = geojson::JsonObject::new();
            properties.insert(
                "line-color".to_string(),
                serde_json::Value::String(self.configuration.path_color.to_owned()),
            );
            properties.insert(
                "line-width".to_string(),
                serde_json::json!(self.configuration.path_width),
            );

            features.push(geojson::Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::LineString(
                    path.coords().map(|coord| vec![coord.x, coord.y]).collect(),
                ))),
                id: Some(geojson::feature::Id::String(FLIGHT_PATH_ID.to_string())),
                properties: Some(properties),
                foreign_members: None,
            });
        }

        for (overlay_id, overlay) in &self.overlays {
            let mut ring: Vec<Vec<f64>> = overlay
                .corners
                .iter()
                .map(|corner| vec![corner.x, corner.y])
                .collect();
            ring.push(ring[0].to_owned());

            let mut properties = geojson::JsonObject::new();
            properties.insert("raster-opacity".to_string(), serde_json::json!(1.0));
            properties.insert("raster-fade-duration".to_string(), serde_json::json!(0));
            properties.insert("updates".to_string(), serde_json::json!(overlay.updates));

            features.push(geojson::Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::Polygon(vec![ring]))),
                id: Some(geojson::feature::Id::String(overlay_id.to_owned())),
                properties: Some(properties),
                foreign_members: None,
            });
        }

        geojson::FeatureCollection {
            bbox: self.camera_bounds.map(|(bounds, _)| {
                vec![
                    bounds.min().x,
                    bounds.min().y,
                    bounds.max().x,
                    bounds.max().y,
                ]
            }),
            features,
            foreign_members: None,
        }
    }
}

impl RenderSurface for GeoJsonSurface {
    fn fit_bounds(&mut self, bounds: &geo::Rect, padding: u32) {
        self.camera_bounds = Some((*bounds, padding));
    }

    fn draw_flight_path(&mut self, path: &geo::LineString) {
        self.flight_path = Some(path.to_owned());
    }

    fn set_overlay_coordinates(&mut self, overlay_id: &str, corners: [geo::Coord; 4]) {
        match self.overlays.get_mut(overlay_id) {
            Some(overlay) => {
                overlay.corners = corners;
                overlay.updates += 1;
            }
            None => {
                self.overlays.insert(
                    overlay_id.to_owned(),
                    OverlayState {
                        corners,
                        updates: 1,
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(offset: f64) -> [geo::Coord; 4] {
        [
            geo::coord! { x: offset, y: -offset },
            geo::coord! { x: offset, y: offset },
            geo::coord! { x: -offset, y: offset },
            geo::coord! { x: -offset, y: -offset },
        ]
    }

    #[test]
    fn test_overlay_is_updated_in_place() {
        let mut surface = GeoJsonSurface::new(&crate::configuration::MapConfiguration::default());

        surface.set_overlay_coordinates("video", square(1.0));
        surface.set_overlay_coordinates("video", square(2.0));

        assert_eq!(surface.overlays.len(), 1);
        let overlay = surface.overlay("video").unwrap();
        assert_eq!(overlay.corners, square(2.0));
        assert_eq!(overlay.updates, 2);
    }

    #[test]
    fn test_feature_collection() {
        let mut surface = GeoJsonSurface::new(&crate::configuration::MapConfiguration::default());
        surface.fit_bounds(
            &geo::Rect::new(
                geo::coord! { x: -1.0, y: -2.0 },
                geo::coord! { x: 3.0, y: 4.0 },
            ),
            50,
        );
        surface.draw_flight_path(&geo::LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]));
        surface.set_overlay_coordinates("video", square(0.5));

        let collection = surface.feature_collection();

        assert_eq!(collection.bbox, Some(vec![-1.0, -2.0, 3.0, 4.0]));
        assert_eq!(collection.features.len(), 2);

        let path = &collection.features[0];
        assert_eq!(
            path.id,
            Some(geojson::feature::Id::String(FLIGHT_PATH_ID.to_string()))
        );
        assert_eq!(
            path.property("line-color"),
            Some(&serde_json::Value::String("#6706CE".to_string()))
        );

        let overlay = &collection.features[1];
        match &overlay.geometry.as_ref().unwrap().value {
            geojson::Value::Polygon(rings) => {
                assert_eq!(rings[0].len(), 5);
                assert_eq!(rings[0][0], vec![0.5, -0.5]);
                assert_eq!(rings[0][4], vec![0.5, -0.5]);
            }
            _ => panic!("overlay is not a polygon"),
        }

        assert!(geojson::GeoJson::FeatureCollection(collection)
            .to_string()
            .contains("\"video\""));
    }
}
