pub mod attenuation;
pub mod rerun;

pub use self::attenuation::RerunSink;
pub use self::rerun::start_session;
