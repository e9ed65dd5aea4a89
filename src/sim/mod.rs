pub mod attenuation;
