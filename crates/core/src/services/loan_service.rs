use crate::models::aggregate::LoanPayment;
use crate::models::controls::AmortizationType;

/// Computes first-year payment figures for an amortized loan.
///
/// Stateless and infallible. Degenerate input yields a zero payment.
pub struct LoanService;

impl LoanService {
    pub fn new() -> Self {
        Self
    }

    /// First-year monthly/annual payment and its interest/principal split.
    ///
    /// - `principal == 0` or `years == 0` → all zero, for every loan type.
    /// - Annuity at 0 % → straight-line repayment of `principal / years`.
    /// - Annuity above 0 % → fixed monthly payment with `r = rate / 12` and
    ///   `n = years * 12`; first-year interest is the simple `principal * rate`.
    /// - Serial → `principal / years` repaid each year plus `principal * rate`.
    /// - Unrecognized type → all zero.
    ///
    /// A non-finite or negative rate is treated as 0 %.
    pub fn compute_loan_payment(
        &self,
        principal: f64,
        annual_rate: f64,
        years: u32,
        amortization_type: AmortizationType,
    ) -> LoanPayment {
        if !principal.is_finite() || principal <= 0.0 || years == 0 {
            return LoanPayment::zero();
        }
        let rate = if annual_rate.is_finite() && annual_rate > 0.0 {
            annual_rate
        } else {
            0.0
        };
        let years = f64::from(years);

        match amortization_type {
            AmortizationType::Annuity => {
                let monthly_rate = rate / 12.0;
                let payments = years * 12.0;
                let growth = (1.0 + monthly_rate).powf(payments);
                // rates too small to move (1 + r)^n behave like 0 %
                if rate == 0.0 || growth <= 1.0 {
                    let annual = principal / years;
                    return LoanPayment {
                        monthly: annual / 12.0,
                        annual,
                        interest: 0.0,
                        principal: annual,
                    };
                }
                // P·r·g / (g − 1) rewritten so an overflowed g yields the limit P·r
                let monthly = principal * monthly_rate / (1.0 - growth.recip());
                let annual = monthly * 12.0;
                let interest = principal * rate;
                LoanPayment {
                    monthly,
                    annual,
                    interest,
                    principal: annual - interest,
                }
            }
            AmortizationType::Serial => {
                let repayment = principal / years;
                let interest = principal * rate;
                let annual = repayment + interest;
                LoanPayment {
                    monthly: annual / 12.0,
                    annual,
                    interest,
                    principal: repayment,
                }
            }
            AmortizationType::Unrecognized => LoanPayment::zero(),
        }
    }
}

impl Default for LoanService {
    fn default() -> Self {
        Self::new()
    }
}
