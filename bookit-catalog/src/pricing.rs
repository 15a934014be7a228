use serde::{Deserialize, Serialize};

/// Rates applied to an experience's base price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Taxes & fees, as a fraction of the subtotal.
    pub tax_rate: f64,

    /// The single promo code the storefront recognises.
    pub promo: PromoRule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoRule {
    /// Compared case-insensitively after trimming.
    pub code: String,

    /// Flat discount, as a fraction of the subtotal.
    pub discount_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: 0.12,
            promo: PromoRule {
                code: "hd10".to_string(),
                discount_rate: 0.10,
            },
        }
    }
}

/// Details-page price summary, every figure to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePreview {
    pub base_price: f64,
    pub taxes: f64,
    pub total: f64,
}

/// Checkout summary. Taxes and discount are whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CheckoutQuote {
    pub subtotal: f64,
    pub taxes: f64,
    pub discount: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PromoOutcome {
    /// Nothing was typed.
    Blank,
    Accepted { code: String, discount: f64 },
    Rejected { input: String },
}

pub struct PricingEngine {
    config: PricingConfig,
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Base price plus tax, shown on the details page before a slot is chosen.
    pub fn preview(&self, base_price: f64) -> PricePreview {
        let taxes = base_price * self.config.tax_rate;
        PricePreview {
            base_price: round_to_cents(base_price),
            taxes: round_to_cents(taxes),
            total: round_to_cents(base_price + taxes),
        }
    }

    pub fn taxes(&self, subtotal: f64) -> f64 {
        round_half_up(subtotal * self.config.tax_rate)
    }

    /// `total = subtotal + taxes - discount`.
    pub fn quote(&self, subtotal: f64, discount: f64) -> CheckoutQuote {
        let taxes = self.taxes(subtotal);
        CheckoutQuote {
            subtotal,
            taxes,
            discount,
            total: round_to_cents(subtotal + taxes - discount),
        }
    }

    pub fn evaluate_promo(&self, input: &str, subtotal: f64) -> PromoOutcome {
        let normalised = input.trim().to_lowercase();
        if normalised.is_empty() {
            return PromoOutcome::Blank;
        }
        if normalised == self.config.promo.code.to_lowercase() {
            PromoOutcome::Accepted {
                code: normalised,
                discount: round_half_up(subtotal * self.config.promo.discount_rate),
            }
        } else {
            PromoOutcome::Rejected {
                input: input.trim().to_string(),
            }
        }
    }
}

/// Round half towards positive infinity, the storefront's rounding for
/// whole-unit amounts.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_adds_twelve_percent() {
        let engine = PricingEngine::default();

        let preview = engine.preview(1000.0);
        assert_eq!(preview.taxes, 120.0);
        assert_eq!(preview.total, 1120.0);

        let preview = engine.preview(999.99);
        assert_eq!(preview.taxes, 120.0);
        assert_eq!(preview.total, 1119.99);
    }

    #[test]
    fn test_preview_of_free_experience() {
        let preview = PricingEngine::default().preview(0.0);
        assert_eq!(preview.total, 0.0);
    }

    #[test]
    fn test_checkout_taxes_round_to_whole_units() {
        let engine = PricingEngine::default();
        // 12% of 1499 = 179.88
        assert_eq!(engine.taxes(1499.0), 180.0);
        // 12% of 1004 = 120.48
        assert_eq!(engine.taxes(1004.0), 120.0);
        // 12% of 1250 = 150.0
        assert_eq!(engine.taxes(1250.0), 150.0);
    }

    #[test]
    fn test_quote_subtracts_discount() {
        let engine = PricingEngine::default();
        let quote = engine.quote(1499.0, 150.0);
        assert_eq!(quote.taxes, 180.0);
        assert_eq!(quote.total, 1499.0 + 180.0 - 150.0);
    }

    #[test]
    fn test_promo_is_case_insensitive_and_trimmed() {
        let engine = PricingEngine::default();
        for input in ["HD10", "hd10", "  Hd10 "] {
            assert_eq!(
                engine.evaluate_promo(input, 1499.0),
                PromoOutcome::Accepted {
                    code: "hd10".to_string(),
                    discount: 150.0
                }
            );
        }
    }

    #[test]
    fn test_unknown_promo_is_rejected() {
        let engine = PricingEngine::default();
        assert_eq!(
            engine.evaluate_promo(" SAVE20 ", 1499.0),
            PromoOutcome::Rejected {
                input: "SAVE20".to_string()
            }
        );
        assert_eq!(engine.evaluate_promo("   ", 1499.0), PromoOutcome::Blank);
    }
}
