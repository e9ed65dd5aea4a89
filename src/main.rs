use anyhow::Result;
use fader3d::{
    AttenuationCalculator, AttenuationSettings, LengthUnit, MemorySink, PaintSession, PlanarFace,
    Point, Polygon, SamplerConfig, Wall, WallScene,
};

fn main() -> Result<()> {
    env_logger::init();

    // A 30x30 ft floor slab with two partition walls
    let floor = PlanarFace::new(Polygon::new(
        "floor",
        vec![
            Point::new(0., 0., 0.),
            Point::new(30., 0., 0.),
            Point::new(30., 30., 0.),
            Point::new(0., 30., 0.),
        ],
    )?);

    let scene = WallScene::new(vec![
        Wall::vertical("partition_a", 0., 10., 20., 10., 10.)?,
        Wall::vertical("partition_b", 10., 20., 30., 20., 10.)?,
    ]);

    let settings = AttenuationSettings::load("fader3d.json")?;
    let calc = AttenuationCalculator::new(&scene, settings, LengthUnit::Feet)?;

    let source = Point::new(15., 2., 0.);
    let mut session = PaintSession::new(MemorySink::new());
    let field = session.paint_face("floor", &floor, source, &calc, &SamplerConfig::new())?;

    println!("sampled {} points from {:.1}", field.len(), source);
    if let Some((min, max)) = field.value_range() {
        println!("attenuation range: {min:.2} .. {max:.2} dB");
    }
    for (pt, value) in field.iter() {
        println!("  {pt} -> {value:.2} dB");
    }

    Ok(())
}
