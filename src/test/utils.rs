#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal_macros::dec;

    use crate::{
        app::utils::{format_money, format_percent, format_shares, parse_date},
        models::{AssetClass, TransactionType},
        test::date,
    };

    #[test]
    fn money_is_grouped_and_rounded() {
        assert_eq!(format_money(&dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_money(&dec!(999.5)), "$999.50");
        assert_eq!(format_money(&dec!(-1000)), "-$1,000.00");
        assert_eq!(format_money(&dec!(-0.001)), "$0.00");
    }

    #[test]
    fn shares_keep_four_places() {
        assert_eq!(format_shares(&dec!(12)), "12.0000");
        assert_eq!(format_shares(&dec!(1500.12344)), "1,500.1234");
    }

    #[test]
    fn percent_from_ratio() {
        assert_eq!(format_percent(&dec!(0.1234)), "12.34%");
        assert_eq!(format_percent(&dec!(-0.5)), "-50.00%");
    }

    #[test]
    fn parses_cli_fields() {
        assert_eq!(parse_date("2024-02-29").unwrap(), date("2024-02-29"));
        assert!(parse_date("29/02/2024").is_err());
    }

    #[test]
    fn enums_use_stored_names() {
        assert_eq!(AssetClass::FixedIncome.to_str(), "Fixed Income");
        assert_eq!(AssetClass::from_str("fixed income").unwrap(), AssetClass::FixedIncome);
        assert_eq!(AssetClass::from_str("fixed-income").unwrap(), AssetClass::FixedIncome);
        assert_eq!(AssetClass::from_str("CRYPTO").unwrap(), AssetClass::Crypto);
        assert!(AssetClass::from_str("Real Estate").is_err());

        assert_eq!(TransactionType::Dividend.to_str(), "dividend");
        assert_eq!(TransactionType::from_str("Buy").unwrap(), TransactionType::Buy);
        assert_eq!(TransactionType::from_str("div").unwrap(), TransactionType::Dividend);
    }
}
