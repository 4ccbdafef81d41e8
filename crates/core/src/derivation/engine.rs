use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::derivation::catalogue::{BaseFact, Catalogue, Slot, VariableKind};
use crate::derivation::expr::{BinOp, CmpOp, Cond, Expr};
use crate::derivation::variables::VarId;
use crate::discount::PricingResult;
use crate::errors::Result;
use crate::facts::{FinalizationFacts, RawTransactionFacts};
use crate::utils::{format_currency_brl, format_percent};

/// Value of one evaluated slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotValue {
    Number(Decimal),
    Label(String),
    /// The slot depends on a finalization fact that has not arrived yet.
    NotFinalized,
}

/// Record of a slot that could not be evaluated and was degraded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub var: VarId,
    pub message: String,
}

/// One full evaluation of the catalogue over a transaction.
///
/// Holds every slot value in catalogue order plus the diagnostics of slots
/// that degraded. The machine view feeds persistence and reporting; the
/// display view is what receipts and ledger exports print.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedVariableSet {
    pub catalogue_version: String,
    values: Vec<SlotValue>,
    diagnostics: Vec<Diagnostic>,
}

impl DerivedVariableSet {
    pub fn value(&self, var: VarId) -> &SlotValue {
        &self.values[var.index()]
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_degraded(&self, var: VarId) -> bool {
        self.diagnostics.iter().any(|d| d.var == var)
    }

    /// Exact values in catalogue order, for persistence and assertions.
    pub fn machine_view(&self) -> Vec<(&'static str, SlotValue)> {
        VarId::ALL
            .iter()
            .map(|var| (var.identifier(), self.values[var.index()].clone()))
            .collect()
    }

    /// Formatted strings in catalogue order, for receipts and exports.
    pub fn display_view(&self) -> Vec<(&'static str, String)> {
        VarId::ALL
            .iter()
            .map(|var| (var.identifier(), self.display(*var)))
            .collect()
    }

    /// Deterministic display string for one slot.
    pub fn display(&self, var: VarId) -> String {
        if self.is_degraded(var) {
            return String::new();
        }
        match &self.values[var.index()] {
            SlotValue::NotFinalized => "Not finalized".to_string(),
            SlotValue::Label(text) => text.clone(),
            SlotValue::Number(value) => match Catalogue::v1().kind(var) {
                VariableKind::Currency => format_currency_brl(*value),
                VariableKind::Percentage => format_percent(*value),
                VariableKind::Quantity => value
                    .to_i64()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| value.to_string()),
                VariableKind::Label => value.to_string(),
            },
        }
    }
}

/// Evaluates the variable catalogue over one transaction.
///
/// Evaluation is pure: no clocks, no I/O, no randomness. Identical facts,
/// pricing, finalization and catalogue version always produce identical
/// machine values and display strings, which is what lets the receipt path
/// and the bulk reporting path be run independently.
#[derive(Clone)]
pub struct VariableDerivationEngine {
    catalogue: &'static Catalogue,
}

impl VariableDerivationEngine {
    pub fn new() -> Result<Self> {
        let catalogue = Catalogue::v1();
        catalogue.validate()?;
        Ok(Self { catalogue })
    }

    pub fn catalogue_version(&self) -> &'static str {
        self.catalogue.version()
    }

    pub fn derive(
        &self,
        facts: &RawTransactionFacts,
        pricing: &PricingResult,
        finalization: &FinalizationFacts,
    ) -> DerivedVariableSet {
        let mut values: Vec<SlotValue> = Vec::with_capacity(self.catalogue.len());
        let mut diagnostics = Vec::new();

        for var in VarId::ALL.iter() {
            let kind = self.catalogue.kind(*var);
            let outcome = match self.catalogue.slot(*var) {
                Slot::Base(base) => Ok(resolve_base(*base, facts, pricing, finalization)),
                Slot::Formula(expr) => eval(expr, &values),
            };
            let value = match outcome {
                Ok(value) => finish(value, kind),
                Err(message) => {
                    log::debug!(
                        "Variable {} degraded: {}",
                        var.identifier(),
                        message
                    );
                    diagnostics.push(Diagnostic { var: *var, message });
                    match kind {
                        VariableKind::Label => SlotValue::Label(String::new()),
                        _ => SlotValue::Number(Decimal::ZERO),
                    }
                }
            };
            values.push(value);
        }

        DerivedVariableSet {
            catalogue_version: self.catalogue.version().to_string(),
            values,
            diagnostics,
        }
    }
}

/// Rounds a finished slot value according to its kind.
fn finish(value: SlotValue, kind: VariableKind) -> SlotValue {
    match (value, kind) {
        (SlotValue::Number(n), VariableKind::Currency) => SlotValue::Number(
            n.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        ),
        (SlotValue::Number(n), VariableKind::Percentage) => SlotValue::Number(
            n.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero),
        ),
        (SlotValue::Number(n), VariableKind::Quantity) => SlotValue::Number(
            n.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        ),
        (value, _) => value,
    }
}

fn label(text: impl Into<String>) -> SlotValue {
    SlotValue::Label(text.into())
}

fn opt_amount(value: Option<Decimal>) -> SlotValue {
    value.map(SlotValue::Number).unwrap_or(SlotValue::NotFinalized)
}

fn opt_date(value: Option<chrono::NaiveDate>) -> SlotValue {
    value
        .map(|d| label(d.format("%Y-%m-%d").to_string()))
        .unwrap_or(SlotValue::NotFinalized)
}

fn resolve_base(
    base: BaseFact,
    facts: &RawTransactionFacts,
    pricing: &PricingResult,
    finalization: &FinalizationFacts,
) -> SlotValue {
    match base {
        BaseFact::TransactionDate => {
            label(facts.transaction_date.format("%Y-%m-%d").to_string())
        }
        BaseFact::TransactionTime => {
            label(facts.transaction_time.format("%H:%M:%S").to_string())
        }
        BaseFact::TerminalSerial => label(facts.terminal_serial.clone()),
        BaseFact::TerminalId => label(facts.terminal_id.clone()),
        BaseFact::ChannelName => label(facts.channel_name.clone()),
        BaseFact::StoreName => label(facts.store_name.clone()),
        BaseFact::StoreId => label(facts.store_id.clone()),
        BaseFact::CustomerDocument => {
            label(facts.customer_document.clone().unwrap_or_default())
        }
        BaseFact::PaymentMethodCode => label(facts.payment_method.as_str()),
        BaseFact::CardBrand => label(facts.card_brand.clone().unwrap_or_default()),
        BaseFact::TransactionNsu => label(facts.transaction_nsu.clone()),
        BaseFact::AcquirerNsu => label(facts.acquirer_nsu.clone().unwrap_or_default()),
        BaseFact::GrossAmount => SlotValue::Number(facts.gross_amount),
        BaseFact::InstallmentCount => SlotValue::Number(Decimal::from(facts.installment_count)),
        BaseFact::ProgramTier => label(if facts.is_club() { "Club" } else { "Standard" }),

        BaseFact::DiscountRate => SlotValue::Number(pricing.standard.discount_rate),
        BaseFact::CommissionRate => SlotValue::Number(pricing.commission_rate),
        BaseFact::AcquirerCostRate => SlotValue::Number(pricing.acquirer_cost_rate),
        BaseFact::PartnerRate => SlotValue::Number(pricing.partner_rate),
        BaseFact::AnticipationRate => SlotValue::Number(pricing.standard.anticipation_rate),
        BaseFact::TaxRate => SlotValue::Number(pricing.tax_rate),
        BaseFact::CashbackProgramRate => SlotValue::Number(pricing.cashback_program_rate),
        BaseFact::SettlementDelayDays => {
            SlotValue::Number(Decimal::from(pricing.settlement_days))
        }
        BaseFact::NetAmount => SlotValue::Number(pricing.standard.net_amount),
        BaseFact::InstallmentAmount => SlotValue::Number(pricing.standard.per_installment),
        BaseFact::CashbackBaseAmount => SlotValue::Number(pricing.standard.net_amount),
        BaseFact::CashbackProgramNet => SlotValue::Number(
            pricing
                .cashback_program
                .as_ref()
                .map(|b| b.net_amount)
                .unwrap_or(pricing.standard.net_amount),
        ),
        BaseFact::CashbackAmount => SlotValue::Number(pricing.cashback_amount),
        BaseFact::EffectiveCostRate => SlotValue::Number(pricing.effective_cost_rate),
        BaseFact::CashbackPayoutDate => label(
            pricing
                .cashback_payout_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ),
        BaseFact::ReceiptMessage => label(pricing.adjustment.receipt_message()),
        BaseFact::SettlementDueDate => {
            label(pricing.settlement_due_date.format("%Y-%m-%d").to_string())
        }

        BaseFact::AcquirerSettledAmount => opt_amount(finalization.acquirer_settled_amount),
        BaseFact::AcquirerSettledDate => opt_date(finalization.acquirer_settled_on),
        BaseFact::MerchantRemittedAmount => opt_amount(finalization.merchant_remitted_amount),
        BaseFact::MerchantRemittedDate => opt_date(finalization.merchant_remitted_on),
        BaseFact::CashbackPaidAmount => opt_amount(finalization.cashback_paid_amount),
        BaseFact::PartnerInvoicedAmount => opt_amount(finalization.partner_invoiced_amount),
        BaseFact::PartnerPaidAmount => opt_amount(finalization.partner_paid_amount),
    }
}

/// Evaluates a formula over the already-computed prefix of the value vector.
///
/// `Err` means a type mismatch; the caller degrades the slot. The
/// not-finalized sentinel propagates through every operator and condition.
fn eval(expr: &Expr, values: &[SlotValue]) -> std::result::Result<SlotValue, String> {
    match expr {
        Expr::Var(id) => Ok(values[id.index()].clone()),
        Expr::Number(n) => Ok(SlotValue::Number(*n)),
        Expr::Text(t) => Ok(label(*t)),
        Expr::Bin(op, lhs, rhs) => {
            let lhs = numeric(eval(lhs, values)?)?;
            let rhs = numeric(eval(rhs, values)?)?;
            match (lhs, rhs) {
                (Some(a), Some(b)) => Ok(SlotValue::Number(apply(*op, a, b))),
                _ => Ok(SlotValue::NotFinalized),
            }
        }
        Expr::Abs(inner) => match numeric(eval(inner, values)?)? {
            Some(n) => Ok(SlotValue::Number(n.abs())),
            None => Ok(SlotValue::NotFinalized),
        },
        Expr::If(cond, then, otherwise) => match check(cond, values)? {
            None => Ok(SlotValue::NotFinalized),
            Some(true) => eval(then, values),
            Some(false) => eval(otherwise, values),
        },
    }
}

fn apply(op: BinOp, lhs: Decimal, rhs: Decimal) -> Decimal {
    match op {
        BinOp::Add => lhs + rhs,
        BinOp::Sub => lhs - rhs,
        BinOp::Mul => lhs * rhs,
        BinOp::Div => {
            if rhs.is_zero() {
                Decimal::ZERO
            } else {
                lhs / rhs
            }
        }
    }
}

/// `Ok(None)` is the not-finalized sentinel; `Err` is a type mismatch.
fn numeric(value: SlotValue) -> std::result::Result<Option<Decimal>, String> {
    match value {
        SlotValue::Number(n) => Ok(Some(n)),
        SlotValue::NotFinalized => Ok(None),
        SlotValue::Label(text) => Err(format!(
            "expected a number, found label '{}'",
            text
        )),
    }
}

fn check(cond: &Cond, values: &[SlotValue]) -> std::result::Result<Option<bool>, String> {
    match cond {
        Cond::Cmp(op, lhs, rhs) => {
            let lhs = numeric(eval(lhs, values)?)?;
            let rhs = numeric(eval(rhs, values)?)?;
            Ok(match (lhs, rhs) {
                (Some(a), Some(b)) => Some(match op {
                    CmpOp::Lt => a < b,
                    CmpOp::Le => a <= b,
                    CmpOp::Gt => a > b,
                    CmpOp::Ge => a >= b,
                    CmpOp::Eq => a == b,
                }),
                _ => None,
            })
        }
        Cond::LabelIs(id, expected) => match &values[id.index()] {
            SlotValue::Label(text) => Ok(Some(text == expected)),
            SlotValue::NotFinalized => Ok(None),
            SlotValue::Number(n) => Err(format!(
                "label condition on numeric value {}",
                n
            )),
        },
    }
}
