//! Quarter-wave sine table in 4.12 fixed point.
//!
//! A full circle is 512 units. Entry `n` holds `sin(n * 2π / 512) * 4096` for
//! the first quadrant; the other three are mirrored out of it by
//! [`sin_lut`].

pub const FULL_CIRCLE: i32 = 512;
const QUARTER: i32 = FULL_CIRCLE / 4;

#[rustfmt::skip]
const SIN_QUARTER: [i16; 129] = [
    0, 50, 101, 151, 201, 251, 301, 351,
    401, 451, 501, 551, 601, 651, 700, 750,
    799, 848, 897, 946, 995, 1044, 1092, 1141,
    1189, 1237, 1285, 1332, 1380, 1427, 1474, 1521,
    1567, 1614, 1660, 1706, 1751, 1797, 1842, 1886,
    1931, 1975, 2019, 2062, 2106, 2149, 2191, 2234,
    2276, 2317, 2359, 2399, 2440, 2480, 2520, 2559,
    2598, 2637, 2675, 2713, 2751, 2788, 2824, 2861,
    2896, 2932, 2967, 3001, 3035, 3068, 3102, 3134,
    3166, 3198, 3229, 3260, 3290, 3320, 3349, 3378,
    3406, 3433, 3461, 3487, 3513, 3539, 3564, 3588,
    3612, 3636, 3659, 3681, 3703, 3724, 3745, 3765,
    3784, 3803, 3822, 3839, 3857, 3873, 3889, 3905,
    3920, 3934, 3948, 3961, 3973, 3985, 3996, 4007,
    4017, 4027, 4036, 4044, 4052, 4059, 4065, 4071,
    4076, 4081, 4085, 4088, 4091, 4093, 4095, 4096,
    4096,
];

/// Sine of `angle` (512 units per turn) in 4.12 fixed point.
pub const fn sin_lut(angle: i32) -> i32 {
    let a = angle.rem_euclid(FULL_CIRCLE);
    let (idx, negate) = match a / QUARTER {
        0 => (a, false),
        1 => (2 * QUARTER - a, false),
        2 => (a - 2 * QUARTER, true),
        _ => (FULL_CIRCLE - a, true),
    };
    let v = SIN_QUARTER[idx as usize] as i32;
    if negate { -v } else { v }
}

/// Cosine of `angle` in 4.12 fixed point.
pub const fn cos_lut(angle: i32) -> i32 {
    sin_lut(angle + QUARTER)
}
