// src/matrix/format.rs

//! Fixed-width row printing shared by the matrix `Display` impls.
//!
//! Each element is written with a leading sign column (space or `-`), the
//! integer part zero-padded to a common width, and four decimals, so the
//! columns of every row line up.

use std::fmt;

const DECIMALS: usize = 4;

/// Integer digits needed for the largest magnitude in `values`.
pub(crate) fn integer_digits(values: &[f32]) -> usize {
    let big = values.iter().fold(0.0f32, |acc, v| acc.max(v.abs()));
    if !big.is_finite() {
        return 5;
    }
    let mut big = big as u64;
    let mut digits = 1;
    loop {
        big /= 10;
        if big == 0 {
            break;
        }
        digits += 1;
    }
    digits
}

/// Formats one number with a sign column and zero-padded integer part.
pub(crate) fn signed_fixed(num: f32, digits: usize) -> String {
    let sign = if num < 0.0 { '-' } else { ' ' };
    // digits + '.' + decimals
    let width = digits + 1 + DECIMALS;
    format!("{}{:0width$.prec$}", sign, num.abs(), width = width, prec = DECIMALS)
}

/// Writes `rows` of `cols` values, one row per line, followed by a blank line.
pub(crate) fn write_rows(f: &mut fmt::Formatter<'_>, values: &[f32], cols: usize) -> fmt::Result {
    let digits = integer_digits(values);
    for row in values.chunks(cols) {
        let line: Vec<String> = row.iter().map(|v| signed_fixed(*v, digits)).collect();
        writeln!(f, "{}", line.join(" "))?;
    }
    writeln!(f)
}
