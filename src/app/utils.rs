use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::db::utils::DATE_FORMAT;

pub fn parse_date(field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(field, DATE_FORMAT)
        .with_context(|| format!("Failed to parse date '{}'", field))
}

/// `1234.5` -> `$1,234.50`, `-7` -> `-$7.00`
pub fn format_money(value: &Decimal) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}", sign, group_thousands(&rounded.abs(), 2))
}

pub fn format_shares(value: &Decimal) -> String {
    group_thousands(value, 4)
}

pub fn format_percent(ratio: &Decimal) -> String {
    format!("{:.2}%", ratio * Decimal::ONE_HUNDRED)
}

fn group_thousands(value: &Decimal, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac_part) => format!("{}{}.{}", sign, grouped, frac_part),
        None => format!("{}{}", sign, grouped),
    }
}
