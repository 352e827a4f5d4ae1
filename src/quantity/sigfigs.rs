/// Count the significant figures of a numeric literal.
///
/// The sign and any scientific-notation exponent are ignored; digits of the
/// mantissa are counted with leading zeros stripped. Trailing zeros of a
/// bare integer are not significant ("2000" has one sigfig), while decimal
/// digits always are ("2000.0" has five).
pub fn count_sigfigs(literal: &str) -> u32 {
    let mantissa = literal
        .trim()
        .trim_start_matches(['-', '+'])
        .split(['e', 'E'])
        .next()
        .unwrap_or("");

    let (integer, decimal) = match mantissa.split_once('.') {
        Some((i, d)) => (i, d),
        None => (mantissa, ""),
    };

    if !decimal.is_empty() {
        let combined = format!("{}{}", integer, decimal);
        combined.trim_start_matches('0').len() as u32
    } else {
        integer.trim_matches('0').len() as u32
    }
}

/// Count the significant figures of a float via its shortest display form.
pub fn count_sigfigs_of(value: f64) -> u32 {
    count_sigfigs(&format!("{}", value))
}

/// Round `value` to `sigfigs` significant figures. Pure display-side
/// rounding; internal computation always keeps full precision.
pub fn round_sigfigs(value: f64, sigfigs: u32) -> f64 {
    if value == 0.0 || sigfigs == 0 || !value.is_finite() {
        return value;
    }
    let digits = value.abs().log10().floor() as i32 + 1;
    let shift = sigfigs as i32 - digits;
    let scale = 10f64.powi(shift);
    (value * scale).round() / scale
}
