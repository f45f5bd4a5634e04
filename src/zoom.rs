//! Zoom constants and stepping shared by controllers and settings.

pub const ZOOM_MIN: f32 = 8.33;
pub const ZOOM_MAX: f32 = 6400.0;

/// Sentinel for "no zoom pending". Never a real zoom value.
pub const INVALID_ZOOM: f32 = -99.0;

pub const DEFAULT_ZOOM_LEVELS: [f32; 25] = [
    8.33, 12.5, 18.0, 25.0, 33.33, 50.0, 66.67, 75.0, 100.0, 125.0, 150.0, 200.0, 300.0, 400.0,
    600.0, 800.0, 1000.0, 1200.0, 1600.0, 2000.0, 2400.0, 3200.0, 4000.0, 4800.0, 6400.0,
];

pub fn is_valid_zoom(zoom: f32) -> bool {
    (ZOOM_MIN..=ZOOM_MAX).contains(&zoom)
}

/// The next zoom on the way from `curr_zoom` to `towards_level`, either by
/// the relative `increment` (percent, disabled when <= 0) or through the
/// `levels` table. Comparisons truncate to whole percent because hosted
/// browser controls only report integer zoom; the result always differs from
/// `curr_zoom` by at least 1% unless the target is already reached.
pub fn next_zoom_step(curr_zoom: f32, towards_level: f32, levels: &[f32], increment: f32) -> f32 {
    if let Some(mut zoom) = step_by_increment(curr_zoom, towards_level, increment) {
        if zoom as i32 == curr_zoom as i32 {
            zoom += 1.0;
        }
        return zoom;
    }

    let icurr = curr_zoom as i32;
    let mut inew = towards_level as i32;
    if (icurr as f32) < towards_level {
        for &level in levels {
            if level as i32 > icurr {
                inew = level as i32;
                break;
            }
        }
    } else if (icurr as f32) > towards_level {
        for &level in levels.iter().rev() {
            if (level as i32) < icurr {
                inew = level as i32;
                break;
            }
        }
    }
    inew as f32
}

fn step_by_increment(curr: f32, towards: f32, increment: f32) -> Option<f32> {
    if increment <= 0.0 {
        return None;
    }
    let factor = increment / 100.0 + 1.0;
    if curr < towards {
        Some((curr * factor).min(towards))
    } else if curr > towards {
        Some((curr / factor).max(towards))
    } else {
        None
    }
}
