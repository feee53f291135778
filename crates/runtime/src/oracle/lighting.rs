use creature_core::{Color, LightingOracle, OracleError};
use glam::Vec3;

/// Point light with linear falloff to zero at `radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub radius: f32,
    pub intensity: f32,
}

impl PointLight {
    pub fn new(position: Vec3, radius: f32, intensity: f32) -> Self {
        Self {
            position,
            radius,
            intensity,
        }
    }

    fn contribution(&self, point: Vec3) -> f32 {
        if self.radius <= 0.0 {
            return 0.0;
        }
        let falloff = 1.0 - point.distance(self.position) / self.radius;
        self.intensity * falloff.max(0.0)
    }
}

/// Gray-scale light field: an ambient floor plus point lights.
///
/// Outdoors the ambient level follows the daylight value; indoors it is
/// whatever [`LightField::with_ambient`] set.
#[derive(Clone, Debug, PartialEq)]
pub struct LightField {
    daylight: f32,
    ambient: f32,
    lights: Vec<PointLight>,
}

impl LightField {
    pub fn new(daylight: f32) -> Self {
        let daylight = daylight.clamp(0.0, 1.0);
        Self {
            daylight,
            ambient: daylight,
            lights: Vec::new(),
        }
    }

    pub fn with_ambient(mut self, ambient: f32) -> Self {
        self.ambient = ambient.clamp(0.0, 1.0);
        self
    }

    pub fn with_light(mut self, light: PointLight) -> Self {
        self.lights.push(light);
        self
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Brightness in `[0, 1]` at `point`.
    pub fn level_at(&self, point: Vec3) -> f32 {
        let lit: f32 = self.lights.iter().map(|l| l.contribution(point)).sum();
        (self.ambient + lit).clamp(0.0, 1.0)
    }
}

impl LightingOracle for LightField {
    fn light_at(&self, point: Vec3) -> Result<Color, OracleError> {
        let level = self.level_at(point);
        Ok(Color::rgb(level, level, level))
    }

    fn daylight(&self) -> f32 {
        self.daylight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_light_fades_linearly() {
        let field = LightField::new(0.0).with_light(PointLight::new(Vec3::ZERO, 10.0, 0.8));
        assert!((field.level_at(Vec3::ZERO) - 0.8).abs() < 1e-6);
        assert!((field.level_at(Vec3::new(5.0, 0.0, 0.0)) - 0.4).abs() < 1e-6);
        assert_eq!(field.level_at(Vec3::new(12.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn overlapping_lights_saturate() {
        let field = LightField::new(0.6)
            .with_light(PointLight::new(Vec3::ZERO, 4.0, 1.0))
            .with_light(PointLight::new(Vec3::X, 4.0, 1.0));
        let color = field.light_at(Vec3::ZERO).unwrap();
        assert_eq!(color, Color::WHITE);
    }

    #[test]
    fn indoor_ambient_overrides_daylight() {
        let field = LightField::new(1.0).with_ambient(0.1);
        assert_eq!(field.daylight(), 1.0);
        assert!((field.level_at(Vec3::ONE) - 0.1).abs() < 1e-6);
    }
}
