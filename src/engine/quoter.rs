// ==========================================
// Abrazaderas - quote calculator
// ==========================================
// developed length -> steel weight -> base cost -> one price per list
// Exact decimal arithmetic; half-up rounding to cents on the base cost and
// on each list price independently.
// ==========================================

use crate::config::QuoterConfig;
use crate::domain::clamp::{
    laminated_allows, laminated_not_allowed, EncodeRequest, LAMINATED_ALLOWED_DIAMETERS,
};
use crate::domain::error::{ClampError, ClampResult};
use crate::domain::quote::{PriceRow, QuoteInputs, QuoteRequest, QuoteResult};
use crate::domain::types::{ClampField, Fabrication, Shape};
use crate::engine::clamp_code::ClampCodec;
use crate::engine::field_parse::{parse_decimal_field, parse_int_field};
use crate::i18n::t;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{info, instrument};

const MONEY_DP: u32 = 2;
const MEASURE_DP: u32 = 4;

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Minimum accepted dollar rate / steel price.
fn min_rate() -> Decimal {
    Decimal::new(1, 4)
}

fn overflow(field: ClampField) -> ClampError {
    ClampError::validation(field, t("quote.amount_overflow"))
}

fn checked_product(factors: &[Decimal]) -> Option<Decimal> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |acc, factor| acc.checked_mul(*factor))
}

// ==========================================
// ClampQuoter
// ==========================================
#[derive(Debug, Clone)]
pub struct ClampQuoter {
    config: QuoterConfig,
    codec: ClampCodec,
}

impl Default for ClampQuoter {
    fn default() -> Self {
        Self::new(QuoterConfig::default())
    }
}

impl ClampQuoter {
    /// Quoter over a config; the codec uses the config's diameter table.
    pub fn new(config: QuoterConfig) -> Self {
        let codec = ClampCodec::new(config.diameter_table());
        Self { config, codec }
    }

    pub fn config(&self) -> &QuoterConfig {
        &self.config
    }

    pub fn codec(&self) -> &ClampCodec {
        &self.codec
    }

    /// Diameters a user may pick for a clamp type.
    ///
    /// `laminada` gets the restricted subset (only those with a weight);
    /// anything else gets the full weight table in order.
    pub fn allowed_diameter_options(&self, clamp_type: &str) -> Vec<String> {
        if clamp_type.trim().eq_ignore_ascii_case(Fabrication::Laminada.quote_key()) {
            return LAMINATED_ALLOWED_DIAMETERS
                .iter()
                .filter(|d| self.config.weight_for(d).is_some())
                .map(|d| d.to_string())
                .collect();
        }
        self.config
            .weights
            .iter()
            .map(|w| w.diameter.clone())
            .collect()
    }

    /// Validate the raw request into typed inputs. The first violation wins.
    ///
    /// # Order
    /// clamp_type, profile_type, diameter, laminada restriction, dollar_rate,
    /// steel_price_usd, supplier_discount_pct, general_increase_pct,
    /// width_mm, length_mm
    pub fn validate(&self, request: &QuoteRequest) -> ClampResult<QuoteInputs> {
        let clamp_type = request
            .clamp_type
            .as_deref()
            .unwrap_or(Fabrication::Trefilada.quote_key())
            .trim()
            .to_lowercase();
        let clamp_type = match clamp_type.as_str() {
            "trefilada" => Fabrication::Trefilada,
            "laminada" => Fabrication::Laminada,
            _ => {
                return Err(ClampError::validation(
                    ClampField::ClampType,
                    t("quote.invalid_clamp_type"),
                ))
            }
        };

        let profile = request
            .profile_type
            .as_deref()
            .unwrap_or(Shape::Plana.as_str())
            .trim()
            .to_uppercase();
        let profile_type = Shape::ALL
            .into_iter()
            .find(|s| s.as_str() == profile)
            .ok_or_else(|| {
                ClampError::validation(ClampField::ProfileType, t("quote.invalid_profile"))
            })?;

        let diameter = request.diameter.trim().to_string();
        if self.config.weight_for(&diameter).is_none() {
            return Err(ClampError::validation(
                ClampField::Diametro,
                t("quote.invalid_diameter"),
            ));
        }
        if clamp_type == Fabrication::Laminada && !laminated_allows(&diameter) {
            return Err(laminated_not_allowed(&diameter));
        }

        let dollar_rate =
            parse_decimal_field(&request.dollar_rate, ClampField::DollarRate, min_rate())?;
        let steel_price_usd =
            parse_decimal_field(&request.steel_price_usd, ClampField::SteelPriceUsd, min_rate())?;
        let supplier_discount_pct = match request.supplier_discount_pct.as_deref() {
            Some(raw) => {
                parse_decimal_field(raw, ClampField::SupplierDiscountPct, Decimal::ZERO)?
            }
            None => self.config.default_supplier_discount_pct,
        };
        let general_increase_pct = match request.general_increase_pct.as_deref() {
            Some(raw) => parse_decimal_field(raw, ClampField::GeneralIncreasePct, Decimal::ZERO)?,
            None => self.config.default_general_increase_pct,
        };
        let width_mm = parse_int_field(&request.width_mm, ClampField::WidthMm, 1)?;
        let length_mm = parse_int_field(&request.length_mm, ClampField::LengthMm, 1)?;

        Ok(QuoteInputs {
            client_name: request.client_name.trim().to_string(),
            dollar_rate,
            steel_price_usd,
            supplier_discount_pct,
            general_increase_pct,
            clamp_type,
            is_zincated: request.is_zincated,
            diameter,
            width_mm,
            length_mm,
            profile_type,
        })
    }

    /// Full quote: validation, cost pipeline, price rows, description and code.
    #[instrument(skip(self, request), fields(diameter = %request.diameter))]
    pub fn calculate(&self, request: &QuoteRequest) -> ClampResult<QuoteResult> {
        let inputs = self.validate(request)?;
        self.calculate_inputs(inputs)
    }

    /// Cost pipeline over already validated inputs.
    pub fn calculate_inputs(&self, inputs: QuoteInputs) -> ClampResult<QuoteResult> {
        let weight_per_meter = self.config.weight_for(&inputs.diameter).ok_or_else(|| {
            ClampError::validation(ClampField::Diametro, t("quote.invalid_diameter"))
        })?;

        let developed_mm = u64::from(inputs.length_mm) * 2
            + u64::from(inputs.width_mm)
            + u64::from(inputs.profile_type.profile_adjustment_mm());
        let development_meters = Decimal::from(developed_mm) / Decimal::ONE_THOUSAND;
        let total_weight_kg = development_meters * weight_per_meter;

        let hundred = Decimal::ONE_HUNDRED;
        let discount_factor = Decimal::ONE - inputs.supplier_discount_pct / hundred;
        let increase_factor = Decimal::ONE + inputs.general_increase_pct / hundred;

        let mut factors = vec![
            total_weight_kg,
            inputs.steel_price_usd,
            discount_factor,
            inputs.dollar_rate,
            increase_factor,
        ];
        if inputs.is_zincated {
            factors.push(self.config.zinc_multiplier);
        }
        if inputs.clamp_type == Fabrication::Laminada {
            factors.push(self.config.laminated_multiplier);
        }
        let base_cost = checked_product(&factors)
            .map(|raw| round_half_up(raw, MONEY_DP))
            .ok_or_else(|| overflow(ClampField::DollarRate))?;

        let price_rows = self
            .config
            .price_lists
            .iter()
            .map(|list| {
                base_cost
                    .checked_mul(list.multiplier)
                    .map(|price| PriceRow {
                        key: list.key.clone(),
                        label: list.label.clone(),
                        multiplier: list.multiplier,
                        final_price: round_half_up(price, MONEY_DP),
                    })
                    .ok_or_else(|| overflow(ClampField::DollarRate))
            })
            .collect::<ClampResult<Vec<_>>>()?;

        let description = build_description(&inputs);
        let encoded = self.codec.encode(&EncodeRequest::new(
            inputs.clamp_type.as_str(),
            &inputs.diameter,
            inputs.width_mm,
            inputs.length_mm,
            inputs.profile_type.as_str(),
        ))?;

        info!(
            code = %encoded.code,
            base_cost = %base_cost,
            zincated = inputs.is_zincated,
            "clamp quote calculated"
        );

        Ok(QuoteResult {
            inputs,
            base_cost,
            description,
            generated_code: encoded.code.clone(),
            generated_code_metadata: encoded,
            development_meters: round_half_up(development_meters, MEASURE_DP),
            total_weight_kg: round_half_up(total_weight_kg, MEASURE_DP),
            price_rows,
        })
    }
}

/// "ABRAZADERA TREFILADA ZINCADA DE 1/2 X 100 X 200 SEMICURVA"
pub fn build_description(inputs: &QuoteInputs) -> String {
    let zinc = if inputs.is_zincated { " ZINCADA" } else { "" };
    format!(
        "ABRAZADERA {}{} DE {} X {} X {} {}",
        inputs.clamp_type.as_str(),
        zinc,
        inputs.diameter,
        inputs.width_mm,
        inputs.length_mm,
        inputs.profile_type.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn request() -> QuoteRequest {
        QuoteRequest {
            clamp_type: Some("trefilada".to_string()),
            profile_type: Some("SEMICURVA".to_string()),
            diameter: "1/2".to_string(),
            dollar_rate: "1000".to_string(),
            steel_price_usd: "1".to_string(),
            supplier_discount_pct: Some("0".to_string()),
            general_increase_pct: Some("23".to_string()),
            width_mm: "100".to_string(),
            length_mm: "200".to_string(),
            ..Default::default()
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_reference_quote() {
        let result = ClampQuoter::default().calculate(&request()).unwrap();
        assert_eq!(result.development_meters, dec("0.51"));
        assert_eq!(result.total_weight_kg, dec("0.5064"));
        assert_eq!(result.base_cost, dec("622.91"));
        assert_eq!(result.price_for("lista_1").unwrap().final_price, dec("872.07"));
        assert_eq!(result.price_for("lista_2").unwrap().final_price, dec("934.37"));
        assert_eq!(result.price_for("lista_3").unwrap().final_price, dec("996.66"));
        assert_eq!(result.price_for("lista_4").unwrap().final_price, dec("1058.95"));
        assert_eq!(result.price_for("facturacion").unwrap().final_price, dec("1245.82"));
        assert_eq!(result.price_rows.len(), 5);
        assert_eq!(
            result.description,
            "ABRAZADERA TREFILADA DE 1/2 X 100 X 200 SEMICURVA"
        );
        assert_eq!(result.generated_code, "ABT12100200S");
        assert_eq!(result.generated_code_metadata.diameter_compact, "12");
    }

    #[test]
    fn test_defaults_applied() {
        let req = QuoteRequest {
            clamp_type: None,
            profile_type: None,
            supplier_discount_pct: None,
            general_increase_pct: None,
            ..request()
        };
        let result = ClampQuoter::default().calculate(&req).unwrap();
        assert_eq!(result.inputs.clamp_type, Fabrication::Trefilada);
        assert_eq!(result.inputs.profile_type, Shape::Plana);
        assert_eq!(result.inputs.general_increase_pct, dec("23"));
        assert_eq!(result.inputs.supplier_discount_pct, Decimal::ZERO);
        // (400 + 100 + 20) / 1000
        assert_eq!(result.development_meters, dec("0.52"));
    }

    #[test]
    fn test_zinc_and_laminated_multipliers() {
        let quoter = ClampQuoter::default();
        let zinc = QuoteRequest {
            is_zincated: true,
            ..request()
        };
        let result = quoter.calculate(&zinc).unwrap();
        assert_eq!(result.base_cost, dec("747.49"));
        assert!(result.description.contains("TREFILADA ZINCADA DE"));

        let trefilada = QuoteRequest {
            diameter: "3/4".to_string(),
            ..request()
        };
        assert_eq!(quoter.calculate(&trefilada).unwrap().base_cost, dec("1402.64"));

        let laminada = QuoteRequest {
            clamp_type: Some("LAMINADA".to_string()),
            ..trefilada
        };
        let result = quoter.calculate(&laminada).unwrap();
        assert_eq!(result.base_cost, dec("2805.29"));
        assert_eq!(result.generated_code, "ABL34100200S");
    }

    #[test]
    fn test_comma_decimal_separator() {
        let req = QuoteRequest {
            steel_price_usd: "1,5".to_string(),
            ..request()
        };
        let result = ClampQuoter::default().calculate(&req).unwrap();
        assert_eq!(result.inputs.steel_price_usd, dec("1.5"));
        assert_eq!(result.base_cost, dec("934.36"));
    }

    #[test]
    fn test_validation_order_and_fields() {
        let quoter = ClampQuoter::default();
        let cases: Vec<(QuoteRequest, ClampField)> = vec![
            (
                QuoteRequest {
                    clamp_type: Some("forjada".into()),
                    profile_type: Some("X".into()),
                    ..request()
                },
                ClampField::ClampType,
            ),
            (
                QuoteRequest {
                    profile_type: Some("P".into()),
                    ..request()
                },
                ClampField::ProfileType,
            ),
            (
                QuoteRequest {
                    diameter: "11/16".into(),
                    ..request()
                },
                ClampField::Diametro,
            ),
            (
                QuoteRequest {
                    dollar_rate: "".into(),
                    steel_price_usd: "".into(),
                    ..request()
                },
                ClampField::DollarRate,
            ),
            (
                QuoteRequest {
                    dollar_rate: "0".into(),
                    ..request()
                },
                ClampField::DollarRate,
            ),
            (
                QuoteRequest {
                    steel_price_usd: "abc".into(),
                    ..request()
                },
                ClampField::SteelPriceUsd,
            ),
            (
                QuoteRequest {
                    supplier_discount_pct: Some("-1".into()),
                    ..request()
                },
                ClampField::SupplierDiscountPct,
            ),
            (
                QuoteRequest {
                    general_increase_pct: Some("".into()),
                    ..request()
                },
                ClampField::GeneralIncreasePct,
            ),
            (
                QuoteRequest {
                    width_mm: "10.5".into(),
                    ..request()
                },
                ClampField::WidthMm,
            ),
            (
                QuoteRequest {
                    length_mm: "0".into(),
                    ..request()
                },
                ClampField::LengthMm,
            ),
        ];

        for (req, field) in cases {
            let err = quoter.calculate(&req).unwrap_err();
            assert!(err.is_validation());
            assert_eq!(err.field(), Some(field), "request {req:?}");
        }
    }

    #[test]
    fn test_laminated_restriction() {
        let req = QuoteRequest {
            clamp_type: Some("laminada".into()),
            ..request()
        };
        let err = ClampQuoter::default().calculate(&req).unwrap_err();
        assert!(matches!(err, ClampError::LaminatedDiameterNotAllowed { .. }));
    }

    #[test]
    fn test_pricing_is_monotonic() {
        let quoter = ClampQuoter::default();
        let mut last = Decimal::ZERO;
        for pct in (0..=60).step_by(5) {
            let req = QuoteRequest {
                general_increase_pct: Some(pct.to_string()),
                ..request()
            };
            let base = quoter.calculate(&req).unwrap().base_cost;
            assert!(base > last, "increase {pct}");
            last = base;
        }

        let mut last = Decimal::MAX;
        for pct in (0..=60).step_by(5) {
            let req = QuoteRequest {
                supplier_discount_pct: Some(pct.to_string()),
                ..request()
            };
            let base = quoter.calculate(&req).unwrap().base_cost;
            assert!(base < last, "discount {pct}");
            last = base;
        }
    }

    #[test]
    fn test_allowed_diameter_options() {
        let quoter = ClampQuoter::default();
        let all = quoter.allowed_diameter_options("trefilada");
        assert_eq!(all.len(), 11);
        assert_eq!(all.first().map(String::as_str), Some("7/16"));
        assert_eq!(quoter.allowed_diameter_options(""), all);
        assert_eq!(
            quoter.allowed_diameter_options(" Laminada "),
            vec!["3/4".to_string(), "1".to_string(), "7/8".to_string()]
        );
    }

    #[test]
    fn test_huge_amounts_do_not_panic() {
        let req = QuoteRequest {
            dollar_rate: "79228162514264337593543950335".into(),
            steel_price_usd: "79228162514264337593543950335".into(),
            ..request()
        };
        let err = ClampQuoter::default().calculate(&req).unwrap_err();
        assert!(err.is_validation());
    }
}
