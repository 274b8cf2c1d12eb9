//! Small exact-arithmetic helpers shared by the topic generators: GCD/LCM,
//! fraction reduction, the one-decimal rounding policy and the number
//! formatting used in both clue text and canonical answers.

/// π as used in every circle/cylinder/cone/sphere question.
pub const PI: f64 = 3.14;

/// Greatest common divisor (Euclid). `gcd(0, 0)` is 0.
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Least common multiple; 0 if either side is 0.
pub fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b) * b).abs()
}

/// Reduce `n/d` to lowest terms with a positive denominator.
///
/// Returns `None` when `d == 0`.
pub fn reduce(n: i64, d: i64) -> Option<(i64, i64)> {
    if d == 0 {
        return None;
    }
    let g = gcd(n, d).max(1);
    let sign = if d < 0 { -1 } else { 1 };
    Some((sign * n / g, sign * d / g))
}

/// Round to one decimal place, halves away from zero.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Format a number the way answers are compared: whole numbers without a
/// decimal part, everything else in shortest decimal form with a `.`.
pub fn fmt_num(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{}", x)
    }
}

/// LaTeX for a fraction.
pub fn frac_tex(n: i64, d: i64) -> String {
    format!("\\frac{{{}}}{{{}}}", n, d)
}

/// Wrap negative integers in parentheses for inline expressions.
pub fn paren(x: i64) -> String {
    if x < 0 { format!("({})", x) } else { x.to_string() }
}

/// Render `kx + m` with sign folding: `2x - 3`, `x`, `-x + 4`, `5`.
pub fn linear_str(k: i64, m: i64) -> String {
    let x_term = match k {
        0 => String::new(),
        1 => "x".to_string(),
        -1 => "-x".to_string(),
        _ => format!("{}x", k),
    };
    match (x_term.is_empty(), m) {
        (true, m) => m.to_string(),
        (false, 0) => x_term,
        (false, m) if m < 0 => format!("{} - {}", x_term, -m),
        (false, m) => format!("{} + {}", x_term, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_and_lcm() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(0, 6), 0);
    }

    #[test]
    fn reduce_normalises_sign_and_rejects_zero_denominator() {
        assert_eq!(reduce(6, 8), Some((3, 4)));
        assert_eq!(reduce(3, -9), Some((-1, 3)));
        assert_eq!(reduce(1, 0), None);
    }

    #[test]
    fn round1_matches_the_pi_policy() {
        assert_eq!(round1(PI * 16.0 * 10.0), 502.4);
        assert_eq!(round1(2.25), 2.3);
        assert_eq!(fmt_num(round1(PI * 4.0)), "12.6");
    }

    #[test]
    fn fmt_num_drops_trailing_zero() {
        assert_eq!(fmt_num(350.0), "350");
        assert_eq!(fmt_num(-4.0), "-4");
        assert_eq!(fmt_num(502.4), "502.4");
    }

    #[test]
    fn linear_str_folds_signs() {
        assert_eq!(linear_str(2, 3), "2x + 3");
        assert_eq!(linear_str(2, -3), "2x - 3");
        assert_eq!(linear_str(1, 0), "x");
        assert_eq!(linear_str(-1, 4), "-x + 4");
        assert_eq!(linear_str(0, 5), "5");
        assert_eq!(linear_str(8, 0), "8x");
    }
}
