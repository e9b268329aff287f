// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Unit conversion and small numeric helpers

/// Millimetres per inch
pub const INCH_TO_MM: f64 = 25.4;

/// Convert inches to millimetres
pub fn inches(value: f64) -> f64 {
    value * INCH_TO_MM
}

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// Lowercase ASCII slug used for output file names ("Happy Holidays" -> "happy_holidays")
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        slug.push_str("text");
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inch_conversion() {
        assert!(approx_eq(inches(1.0), 25.4, 1e-12));
        assert!(approx_eq(inches(0.15), 3.81, 1e-9));
        assert!(approx_eq(inches(4.0) / INCH_TO_MM, 4.0, 1e-12));
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0001, 0.001));
        assert!(!approx_eq(1.0, 1.1, 0.001));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Happy Holidays"), "happy_holidays");
        assert_eq!(slugify("  Merry   X-mas! "), "merry_x_mas");
        assert_eq!(slugify("***"), "text");
    }
}
