//! Paints an attenuation heatmap over a two-room floor plan in Rerun.
//!
//! Start a Rerun viewer first (`rerun`), then run:
//! cargo run --example attenuation_heatmap

use anyhow::Result;
use fader3d::draw::rerun::{draw_source, draw_walls, start_session};
use fader3d::draw::RerunSink;
use fader3d::{
    AttenuationCalculator, AttenuationSettings, LengthUnit, PaintSession, PlanarFace, Point,
    Polygon, SamplerConfig, Wall, WallScene,
};

fn main() -> Result<()> {
    env_logger::init();

    // 40x25 ft apartment with a thick dividing wall and an inner partition
    let floor = PlanarFace::new(Polygon::new(
        "floor",
        vec![
            Point::new(0., 0., 0.),
            Point::new(40., 0., 0.),
            Point::new(40., 25., 0.),
            Point::new(0., 25., 0.),
        ],
    )?);

    let scene = WallScene::new(vec![
        Wall::vertical_thick("divider", 20., 0., 20., 18., 12., 0.8)?,
        Wall::vertical("partition", 0., 12., 14., 12., 12.)?,
    ]);

    let settings = AttenuationSettings::default();
    let calc = AttenuationCalculator::new(&scene, settings, LengthUnit::Feet)?;

    let source = Point::new(5., 5., 0.);

    let session = start_session()?;
    draw_walls(&session, &scene, (0.7, 0.7, 0.7, 0.8))?;
    draw_source(&session, source)?;

    let mut paint = PaintSession::new(RerunSink::new(session));
    let config = SamplerConfig {
        resolution: 20,
        ..SamplerConfig::new()
    };
    let field = paint.paint_face("floor", &floor, source, &calc, &config)?;

    if let Some((min, max)) = field.value_range() {
        println!(
            "painted {} samples, attenuation {min:.1} .. {max:.1} dB",
            field.len()
        );
    }

    Ok(())
}
