/// Tunable parameters for perception and decision making.
///
/// Every field has a default; a partial `config.toml` only needs to name the
/// values it changes. Distances are in world units, times in seconds, periods
/// in frames.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    // ===== surrender =====
    /// Health fraction at or below which surrender is considered.
    pub surrender_health_fraction: f32,
    /// Magicka above which a creature that knows a heal makes a last stand instead.
    pub last_stand_magicka: u32,
    /// Width of the random delay gate before surrendering.
    pub surrender_delay: f32,

    // ===== recovery =====
    pub fall_height_threshold: f32,
    pub free_action_delay: f32,
    pub combat_prep_delay: f32,

    // ===== light buff =====
    pub light_check_period: u64,
    /// Lighting grayscale at the target below which a light spell is worth casting.
    pub light_threshold: f32,

    // ===== healing =====
    pub heal_cooldown_min: f32,
    pub heal_cooldown_max: f32,
    pub self_heal_fraction: f32,
    /// Allies at or above this health fraction do not need an area heal.
    pub area_heal_need_fraction: f32,
    /// Radius used for area spells and area heal tallies.
    pub area_radius: f32,

    // ===== reposition =====
    pub levitate_vertical_threshold: f32,
    /// Spacing of ground samples along a straight walking path.
    pub path_sample_step: f32,
    /// Largest ground height change between samples a creature can walk.
    pub max_step_height: f32,

    // ===== ranged spells =====
    /// Projectile speed; throws are aimed where a moving target will be.
    pub ranged_spell_speed: f32,
    pub ranged_spell_radius: f32,
    pub ranged_spell_range: f32,

    // ===== vision =====
    pub point_blank_distance: f32,
    pub auto_detect_distance: f32,
    pub wary_multiplier: f32,
    /// Divisor of `log10(distance)` in the detection threshold.
    pub threshold_divisor: f32,
    pub crouch_modifier: f32,
    pub minimum_movement_angle: f32,
    pub movement_exposure_divisor: f32,
    pub silhouette_divisor: f32,
    /// Fraction of background light reflected by scenery.
    pub background_reflectance: f32,
    pub holy_ward_radius: f32,

    // ===== hearing =====
    pub hearing_threshold: f32,
    pub acute_hearing_multiplier: f32,
    pub improved_acute_hearing_multiplier: f32,

    // ===== passive light detection =====
    pub light_detection_period: u64,
    pub light_detection_max_distance: f32,
    pub light_detection_margin: f32,
    /// Range assumed for a light spell with no carried light source.
    pub default_light_range: f32,

    // ===== awareness =====
    pub ally_alert_radius: f32,
    /// Seconds a creature remembers a target it can neither see nor hear.
    pub target_memory: f32,
}

impl AiConfig {
    pub const DEFAULT_SURRENDER_HEALTH_FRACTION: f32 = 0.2;
    pub const DEFAULT_LAST_STAND_MAGICKA: u32 = 10;
    pub const DEFAULT_HEAL_COOLDOWN: (f32, f32) = (2.5, 5.0);
    pub const DEFAULT_AREA_RADIUS: f32 = 4.3;
    pub const DEFAULT_HEARING_THRESHOLD: f32 = 7.0;

    pub fn new() -> Self {
        Self {
            surrender_health_fraction: Self::DEFAULT_SURRENDER_HEALTH_FRACTION,
            last_stand_magicka: Self::DEFAULT_LAST_STAND_MAGICKA,
            surrender_delay: 1.5,

            fall_height_threshold: 5.0,
            free_action_delay: 1.5,
            combat_prep_delay: 1.4,

            light_check_period: 20,
            light_threshold: 0.25,

            heal_cooldown_min: Self::DEFAULT_HEAL_COOLDOWN.0,
            heal_cooldown_max: Self::DEFAULT_HEAL_COOLDOWN.1,
            self_heal_fraction: 1.0 / 3.0,
            area_heal_need_fraction: 0.6,
            area_radius: Self::DEFAULT_AREA_RADIUS,

            levitate_vertical_threshold: 4.0,
            path_sample_step: 1.0,
            max_step_height: 1.2,

            ranged_spell_speed: 25.0,
            ranged_spell_radius: 0.45,
            ranged_spell_range: 50.0,

            point_blank_distance: 1.0,
            auto_detect_distance: 2.1,
            wary_multiplier: 1.5,
            threshold_divisor: 35.0,
            crouch_modifier: 0.8,
            minimum_movement_angle: 10.0,
            movement_exposure_divisor: 2.5,
            silhouette_divisor: 4.0,
            background_reflectance: 0.2,
            holy_ward_radius: 4.5,

            hearing_threshold: Self::DEFAULT_HEARING_THRESHOLD,
            acute_hearing_multiplier: 1.3,
            improved_acute_hearing_multiplier: 1.5,

            light_detection_period: 87,
            light_detection_max_distance: 20.0,
            light_detection_margin: 2.0,
            default_light_range: 10.0,

            ally_alert_radius: 12.0,
            target_memory: 15.0,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new()
    }
}
