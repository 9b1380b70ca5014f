//! Latitude/longitude grid lines.

use geo_types::Coord;

/// Sampling step along grid lines, in degrees.
const PRECISION: f64 = 2.5;

/// Minor lines stop short of the poles.
const MINOR_EXTENT: f64 = 80.0;

const STEP: f64 = 10.0;
const EPSILON: f64 = 1e-6;

/// Generates a 10° graticule.
///
/// Meridians run every 10° from -180° to 170°; those on multiples of 90° reach
/// the poles, the rest stop at ±80°. Parallels run every 10° from -80° to 80°
/// across all longitudes.
pub fn graticule_lines() -> Vec<Vec<Coord<f64>>> {
    let mut lines = Vec::new();

    let mut lon = -180.0;
    while lon < 180.0 - EPSILON {
        let extent = if is_multiple(lon, 90.0) {
            90.0 - EPSILON
        } else {
            MINOR_EXTENT
        };
        lines.push(meridian(lon, -extent, extent));
        lon += STEP;
    }

    let mut lat = -MINOR_EXTENT;
    while lat <= MINOR_EXTENT + EPSILON {
        lines.push(parallel(lat, -180.0, 180.0));
        lat += STEP;
    }

    lines
}

/// The equator, sampled every degree.
pub fn equator() -> Vec<Coord<f64>> {
    (0..=360)
        .map(|d| Coord {
            x: d as f64 - 180.0,
            y: 0.0,
        })
        .collect()
}

/// The prime meridian, sampled every degree.
pub fn prime_meridian() -> Vec<Coord<f64>> {
    (0..=180)
        .map(|d| Coord {
            x: 0.0,
            y: d as f64 - 90.0,
        })
        .collect()
}

fn is_multiple(value: f64, of: f64) -> bool {
    let r = value.rem_euclid(of);
    r < EPSILON || of - r < EPSILON
}

fn meridian(lon: f64, lat0: f64, lat1: f64) -> Vec<Coord<f64>> {
    sample(lat0, lat1).map(|lat| Coord { x: lon, y: lat }).collect()
}

fn parallel(lat: f64, lon0: f64, lon1: f64) -> Vec<Coord<f64>> {
    sample(lon0, lon1).map(|lon| Coord { x: lon, y: lat }).collect()
}

/// `from`, `from + PRECISION`, ... and finally `to` itself.
fn sample(from: f64, to: f64) -> impl Iterator<Item = f64> {
    let steps = ((to - from) / PRECISION).ceil() as usize;
    (0..steps)
        .map(move |i| from + i as f64 * PRECISION)
        .chain(std::iter::once(to))
}
