pub mod robot;
pub mod vector;

pub use robot::{path_polyline, RobotOutline};
pub use vector::{LineStyle, Polygon, PolygonStyle, Polyline, SerializableColor};
