// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

//! Simple, auxiliary functions and constants used through the `venus_gmx` library.

/******************************/
/*         CONSTANTS          */
/******************************/

/// Smallest coordinate supported by GRO. The actual minimal supported coordinate is
/// -999.999 nm but due to floating point shenanigans, we are slightly more restrictive to be safe.
pub(crate) const GRO_MIN_COORDINATE: f64 = -999.0;
/// Largest coordinate supported by GRO. The actual maximal supported coordinate is
/// 9999.999 nm but due to floating point shenanigans, we are slightly more restrictive to be safe.
pub(crate) const GRO_MAX_COORDINATE: f64 = 9999.0;

/******************************/
/*      NUMBER PARSING        */
/******************************/

/// Parse a floating point number which may use the Fortran `D` exponent marker (e.g. `1.5D+01`).
pub(crate) fn parse_float(token: &str) -> Option<f64> {
    match token.parse::<f64>() {
        Ok(x) => Some(x),
        Err(_) if token.contains(['D', 'd']) => token.replace(['D', 'd'], "E").parse::<f64>().ok(),
        Err(_) => None,
    }
}

/// Get the whitespace-separated token at position `index` in `line`.
#[inline]
pub(crate) fn nth_token(line: &str, index: usize) -> Option<&str> {
    line.split_whitespace().nth(index)
}

/******************************/
/*         UNIT TESTS         */
/******************************/
