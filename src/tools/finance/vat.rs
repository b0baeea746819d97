use crate::utils::error::{Result, ToolError};
use crate::utils::validation::{validate_non_negative, validate_range};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxPreset {
    pub code: &'static str,
    pub country: &'static str,
    pub tax_name: &'static str,
    pub rate: f64,
}

const fn preset(
    code: &'static str,
    country: &'static str,
    tax_name: &'static str,
    rate: f64,
) -> TaxPreset {
    TaxPreset { code, country, tax_name, rate }
}

/// Standard rates; India lists each GST slab separately.
const PRESETS: &[TaxPreset] = &[
    preset("uk", "United Kingdom", "VAT", 20.0),
    preset("de", "Germany", "VAT", 19.0),
    preset("fr", "France", "VAT", 20.0),
    preset("it", "Italy", "VAT", 22.0),
    preset("es", "Spain", "VAT", 21.0),
    preset("nl", "Netherlands", "VAT", 21.0),
    preset("ie", "Ireland", "VAT", 23.0),
    preset("se", "Sweden", "VAT", 25.0),
    preset("za", "South Africa", "VAT", 15.0),
    preset("ae", "United Arab Emirates", "VAT", 5.0),
    preset("au", "Australia", "GST", 10.0),
    preset("nz", "New Zealand", "GST", 15.0),
    preset("ca", "Canada", "GST", 5.0),
    preset("sg", "Singapore", "GST", 9.0),
    preset("jp", "Japan", "Consumption tax", 10.0),
    preset("in-5", "India", "GST", 5.0),
    preset("in-12", "India", "GST", 12.0),
    preset("in-18", "India", "GST", 18.0),
    preset("in-28", "India", "GST", 28.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxBreakdown {
    pub net: f64,
    pub tax: f64,
    pub gross: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GstSplit {
    pub cgst: f64,
    pub sgst: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn presets() -> &'static [TaxPreset] {
    PRESETS
}

pub fn preset_rate(code: &str) -> Result<f64> {
    PRESETS
        .iter()
        .find(|p| p.code.eq_ignore_ascii_case(code))
        .map(|p| p.rate)
        .ok_or_else(|| {
            ToolError::invalid_input(
                "country",
                code,
                format!(
                    "Unknown preset. Available: {}",
                    PRESETS.iter().map(|p| p.code).collect::<Vec<_>>().join(", ")
                ),
            )
        })
}

fn validate_inputs(amount: f64, rate: f64) -> Result<()> {
    validate_non_negative("amount", amount)?;
    validate_range("rate", rate, 0.0, 100.0)
}

/// Net price plus tax.
pub fn add_tax(net: f64, rate: f64) -> Result<TaxBreakdown> {
    validate_inputs(net, rate)?;
    let tax = round2(net * rate / 100.0);
    Ok(TaxBreakdown {
        net: round2(net),
        tax,
        gross: round2(net + tax),
        rate,
    })
}

/// Backs the tax out of a tax-inclusive price.
pub fn remove_tax(gross: f64, rate: f64) -> Result<TaxBreakdown> {
    validate_inputs(gross, rate)?;
    let net = round2(gross / (1.0 + rate / 100.0));
    Ok(TaxBreakdown {
        net,
        tax: round2(gross - net),
        gross: round2(gross),
        rate,
    })
}

/// Intra-state GST is levied half as CGST and half as SGST.
pub fn gst_split(breakdown: &TaxBreakdown) -> GstSplit {
    let cgst = round2(breakdown.tax / 2.0);
    GstSplit {
        cgst,
        sgst: round2(breakdown.tax - cgst),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_tax() {
        let result = add_tax(100.0, 20.0).unwrap();
        assert_eq!(result.tax, 20.0);
        assert_eq!(result.gross, 120.0);
        assert_eq!(result.net, 100.0);
    }

    #[test]
    fn test_remove_tax() {
        let result = remove_tax(120.0, 20.0).unwrap();
        assert_eq!(result.net, 100.0);
        assert_eq!(result.tax, 20.0);

        let odd = remove_tax(99.99, 19.0).unwrap();
        assert_eq!(odd.net, 84.03);
        assert_eq!(odd.tax, 15.96);
    }

    #[test]
    fn test_remove_then_add_restores_gross() {
        for gross in [10.0, 59.99, 1234.56] {
            for rate in [5.0, 12.0, 18.0, 20.0, 23.0] {
                let net = remove_tax(gross, rate).unwrap().net;
                let back = add_tax(net, rate).unwrap().gross;
                assert!((back - gross).abs() <= 0.011, "gross {} rate {}", gross, rate);
            }
        }
    }

    #[test]
    fn test_presets() {
        assert_eq!(preset_rate("UK").unwrap(), 20.0);
        assert_eq!(preset_rate("in-18").unwrap(), 18.0);
        assert!(preset_rate("xx").is_err());
        assert!(presets().iter().all(|p| p.rate > 0.0 && p.rate <= 100.0));
    }

    #[test]
    fn test_gst_split_sums_to_tax() {
        let breakdown = add_tax(333.33, 5.0).unwrap();
        let split = gst_split(&breakdown);
        assert!((split.cgst + split.sgst - breakdown.tax).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(add_tax(-1.0, 20.0).is_err());
        assert!(add_tax(100.0, 120.0).is_err());
        assert!(remove_tax(f64::INFINITY, 20.0).is_err());
    }
}
