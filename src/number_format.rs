use regex::Regex;
use std::sync::LazyLock;

/// Above this value abbreviations keep four decimals instead of two.
pub const LARGE_VALUE_THRESHOLD: f64 = 10000.0;

const SUFFIXES: [&str; 4] = ["k", "m", "b", "t"];

static EXTRA_DECIMALS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\.[0-9][0-9])[0-9]*$").expect("static regex is valid"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberFormat {
    pub abbreviate: bool,
    pub large_value_threshold: f64,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            abbreviate: false,
            large_value_threshold: LARGE_VALUE_THRESHOLD,
        }
    }
}

impl NumberFormat {
    pub fn new(abbreviate: bool) -> Self {
        Self {
            abbreviate,
            ..Default::default()
        }
    }

    pub fn large_value_threshold(mut self, threshold: f64) -> Self {
        self.large_value_threshold = threshold;
        self
    }

    pub fn format(&self, raw: &str) -> String {
        if !self.abbreviate {
            return format_plain(raw);
        }
        let Some(num) = raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()) else {
            return raw.to_string();
        };
        let places = if num > self.large_value_threshold { 4 } else { 2 };
        abbreviate(num, places).unwrap_or_else(|| {
            log::debug!("Value {} overflows when rounded, shown as received", raw);
            raw.to_string()
        })
    }
}

/// Cut everything past the second decimal, then drop the first ".00".
pub fn format_plain(raw: &str) -> String {
    EXTRA_DECIMALS.replace(raw, "$1").replacen(".00", "", 1)
}

/// Abbreviate with k/m/b/t, picking the largest suffix not above the value.
///
/// A value that rounds to 1000 of one suffix is carried to the next one, so
/// `999_996` at two places is `1m` rather than `1000k`.
pub fn abbreviate_number(num: f64, places: u32) -> String {
    abbreviate(num, places).unwrap_or_else(|| display_number(num))
}

// None when rounding leaves the finite range.
fn abbreviate(num: f64, places: u32) -> Option<String> {
    let mut number = round_half_up(num, places);
    if !number.is_finite() {
        return None;
    }
    let factor = 10f64.powi(places as i32);

    let mut i = SUFFIXES.len();
    while i > 0 {
        i -= 1;
        let size = 10f64.powi(((i + 1) * 3) as i32);
        if size <= number {
            number = (number * factor / size + 0.5).floor() / factor;
            if !number.is_finite() {
                return None;
            }
            if number == 1000.0 && i < SUFFIXES.len() - 1 {
                number = 1.0;
                i += 1;
            }
            return Some(format!("{}{}", display_number(number), SUFFIXES[i]));
        }
    }
    Some(display_number(number))
}

// Decimal shift through the exponent so 1.005 rounds like its written form.
fn round_half_up(num: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let shifted = format!("{}e{}", num, places)
        .parse::<f64>()
        .unwrap_or(num * factor);
    let rounded = (shifted + 0.5).floor();
    format!("{}e-{}", rounded, places)
        .parse::<f64>()
        .unwrap_or(rounded / factor)
}

fn display_number(num: f64) -> String {
    if num == 0.0 {
        return "0".to_string();
    }
    num.to_string()
}
