use geo::RhumbDestination;

pub const M_PER_FT: f64 = 0.3048;

/// diagonal field of view of the camera, in degrees
pub const DEFAULT_FIELD_OF_VIEW: f64 = 59.0;

/// Pixel size of the current video frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameDimensions {
    pub width: u32,
    pub height: u32,
}

impl FrameDimensions {
    /// `None` until the player has reported a usable width
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 {
            None
        } else {
            Some(Self { width, height })
        }
    }

    /// half-angle, in degrees, of the frame diagonal relative to its width axis
    pub fn aspect_offset(&self) -> f64 {
        (self.height as f64 / self.width as f64).atan().to_degrees()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraParameters {
    pub field_of_view: f64,
}

impl Default for CameraParameters {
    fn default() -> Self {
        Self {
            field_of_view: DEFAULT_FIELD_OF_VIEW,
        }
    }
}

impl CameraParameters {
    pub fn new(field_of_view: f64) -> Self {
        Self { field_of_view }
    }

    /// Ground distance from the nadir point to each frame corner, looking straight down over flat
    /// ground. Camera tilt is ignored.
    pub fn half_diagonal(&self, altitude_meters: f64) -> f64 {
        altitude_meters * self.field_of_view.to_radians().tan() / 2.0
    }
}

/// Map any angle in degrees into (-180, 180].
pub fn normalize_bearing(degrees: f64) -> f64 {
    let normalized = ((degrees % 360.0) + 540.0) % 360.0 - 180.0;
    if normalized == -180.0 {
        180.0
    } else {
        normalized
    }
}

/// Bearings from the nadir point to each corner of the frame, in degrees within (-180, 180].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerBearings {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerBearings {
    pub fn new(compass_heading: f64, dimensions: &FrameDimensions) -> Self {
        let bearing = (compass_heading - 90.0) % 360.0;
        let aspect_offset = dimensions.aspect_offset();

        Self {
            top_left: normalize_bearing(bearing - aspect_offset + 180.0),
            top_right: normalize_bearing(bearing + aspect_offset + 180.0),
            bottom_right: normalize_bearing(bearing - aspect_offset),
            bottom_left: normalize_bearing(bearing + aspect_offset),
        }
    }
}

/// Ground corners a single video frame is warped onto, as (longitude, latitude).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub top_right: geo::Coord,
    pub bottom_right: geo::Coord,
    pub bottom_left: geo::Coord,
    pub top_left: geo::Coord,
}

impl Footprint {
    /// Corners in the order the rendering surface expects: top-right, bottom-right, bottom-left,
    /// top-left. Any other order shows the frame mirrored or rotated.
    pub fn corners(&self) -> [geo::Coord; 4] {
        [
            self.top_right,
            self.bottom_right,
            self.bottom_left,
            self.top_left,
        ]
    }

    pub fn to_polygon(&self) -> geo::Polygon {
        geo::Polygon::new(geo::LineString::from(self.corners().to_vec()), vec![])
    }

    /// mean of the four corners
    pub fn center(&self) -> geo::Coord {
        let corners = self.corners();
        let x = corners.iter().map(|corner| corner.x).sum::<f64>() / 4.0;
        let y = corners.iter().map(|corner| corner.y).sum::<f64>() / 4.0;
        geo::coord! { x: x, y: y }
    }
}

/// Project the frame seen from `position` onto the ground.
///
/// Each corner is the rhumb-line destination `half_diagonal` meters away along its corner bearing.
/// At zero altitude all four corners coincide with `position`.
pub fn project(
    position: geo::Coord,
    altitude_meters: f64,
    compass_heading: f64,
    camera: &CameraParameters,
    dimensions: &FrameDimensions,
) -> Footprint {
    let half_diagonal = camera.half_diagonal(altitude_meters);
    let bearings = CornerBearings::new(compass_heading, dimensions);
    let center = geo::Point::from(position);

    let corner = |bearing: f64| -> geo::Coord { center.rhumb_destination(bearing, half_diagonal).0 };

    Footprint {
        top_right: corner(bearings.top_right),
        bottom_right: corner(bearings.bottom_right),
        bottom_left: corner(bearings.bottom_left),
        top_left: corner(bearings.top_left),
    }
}

impl crate::telemetry::TelemetryRecord {
    /// `None` when the record lacks a finite position, altitude or heading.
    pub fn footprint(
        &self,
        camera: &CameraParameters,
        dimensions: &FrameDimensions,
    ) -> Option<Footprint> {
        let position = self.coord()?;
        let altitude_meters = self.altitude_meters()?;
        let compass_heading = self.compass_heading_degrees?;

        Some(project(
            position,
            altitude_meters,
            compass_heading,
            camera,
            dimensions,
        ))
    }
}
