use anyhow::Result;
use rerun as rr;

use crate::sim::attenuation::scene::WallScene;
use crate::{Point, Polygon};

const SESSION_NAME: &str = "Fader3d";

/// Converts Point to the native format of Rerun
impl From<Point> for rr::Vec3D {
    fn from(val: Point) -> Self {
        rr::Vec3D([val.x as f32, val.y as f32, val.z as f32])
    }
}

fn color(rgba: (f32, f32, f32, f32)) -> rr::Color {
    let (r, g, b, a) = rgba;
    rr::Color(rr::Rgba32::from_linear_unmultiplied_rgba_f32(r, g, b, a))
}

pub fn start_session() -> Result<rr::RecordingStream> {
    // Connect to the Rerun gRPC server using the default address and port: localhost:9876
    let session = rr::RecordingStreamBuilder::new("fader3d").spawn()?;

    Ok(session)
}

/// Draws a polygon outline as a closed line strip.
pub fn draw_polygon_outline(
    session: &rr::RecordingStream,
    polygon: &Polygon,
    radius: f32,
    rgba: (f32, f32, f32, f32),
) -> Result<()> {
    let mut strip: Vec<rr::Vec3D> = polygon.vertices().iter().map(|p| (*p).into()).collect();
    if let Some(first) = strip.first().copied() {
        strip.push(first);
    }

    let name = format!("{}/{}", SESSION_NAME, polygon.name);
    session.log_static(
        name,
        &rr::LineStrips3D::new([strip])
            .with_radii([radius])
            .with_colors([color(rgba)]),
    )?;

    Ok(())
}

/// Draws all wall outlines of a scene.
pub fn draw_walls(
    session: &rr::RecordingStream,
    scene: &WallScene,
    rgba: (f32, f32, f32, f32),
) -> Result<()> {
    for wall in scene.walls() {
        for polygon in wall.polygons() {
            draw_polygon_outline(session, polygon, 0.02, rgba)?;
        }
    }
    Ok(())
}

/// Draws the signal source as a single highlighted point.
pub fn draw_source(session: &rr::RecordingStream, source: Point) -> Result<()> {
    let name = format!("{}/source", SESSION_NAME);
    session.log_static(
        name,
        &rr::Points3D::new([source])
            .with_radii([0.3_f32])
            .with_colors([color((0.0, 0.5, 1.0, 1.0))]),
    )?;
    Ok(())
}
