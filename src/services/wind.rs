//! Wind classification helpers.
//!
//! Maps numeric wind readings from the provider into the qualitative terms
//! used in the human-readable response: a Beaufort-scale-inspired intensity
//! descriptor and a 16-point compass direction name.

/// Compass names every 22.5°, starting at north. The table carries "north"
/// at both ends so a bearing that rounds up to 360° needs no index wrap.
const DIRECTIONS: [&str; 17] = [
    "north",
    "north-northeast",
    "northeast",
    "east-northeast",
    "east",
    "east-southeast",
    "southeast",
    "south-southeast",
    "south",
    "south-southwest",
    "southwest",
    "west-southwest",
    "west",
    "west-northwest",
    "northwest",
    "north-northwest",
    "north",
];

/// Qualitative wind-intensity descriptor for a speed in m/s.
///
/// Thresholds follow the Beaufort scale
/// (https://en.wikipedia.org/wiki/Beaufort_scale); boundary values belong to
/// the lower bucket.
pub fn describe_speed(speed: f64) -> &'static str {
    match speed {
        s if s <= 0.5 => "Calm",
        s if s <= 1.5 => "Light air",
        s if s <= 3.3 => "Light breeze",
        s if s <= 5.5 => "Gentle breeze",
        s if s <= 7.9 => "Moderate breeze",
        s if s <= 10.7 => "Fresh breeze",
        s if s <= 13.8 => "Strong breeze",
        s if s <= 17.1 => "High wind",
        s if s <= 20.7 => "Gale",
        s if s <= 24.4 => "Strong/severe gale",
        s if s <= 28.4 => "Storm",
        s if s <= 32.6 => "Violent storm",
        _ => "Hurricane force",
    }
}

/// Compass name for a bearing in degrees clockwise from north.
///
/// Bearings outside [0, 360) are normalized first, so negative and >360
/// inputs name the same direction as their in-range equivalent.
pub fn direction_name(bearing: i64) -> &'static str {
    let normalized = bearing.rem_euclid(360) as f64;
    // f64::round rounds half away from zero, so 30° → 1.33 → index 1.
    DIRECTIONS[(normalized / 22.5).round() as usize]
}
