/// Golden-ratio hue step, spreads consecutive hues evenly around the wheel
const HUE_STEP: f32 = 0.618_034;

pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let c = v * s;
    let h_prime = h.rem_euclid(1.0) * 6.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h_prime as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [r + m, g + m, b + m]
}

/// Distinct colours for `count` sibling objects (layers, rungs, rings)
pub fn palette(count: usize, start_hue: f32, saturation: f32, value: f32) -> Vec<[f32; 3]> {
    (0..count)
        .map(|i| hsv_to_rgb(start_hue + i as f32 * HUE_STEP, saturation, value))
        .collect()
}
