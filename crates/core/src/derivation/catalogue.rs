use std::sync::OnceLock;

use rust_decimal_macros::dec;

use crate::constants::{CATALOGUE_VERSION, VARIABLE_COUNT};
use crate::derivation::derivation_errors::DerivationError;
use crate::derivation::expr::{CmpOp, Cond, Expr};
use crate::derivation::variables::VarId;

/// Value family of a variable slot, which fixes its rounding and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// Money, rounded to 2 decimal places, displayed as `R$ 1.234,56`.
    Currency,
    /// Ratio, rounded to 4 decimal places, displayed as `2.34%`.
    Percentage,
    /// Integer count, displayed without decimals.
    Quantity,
    /// Free text, displayed verbatim.
    Label,
}

/// Source of a base slot's value.
///
/// Base slots copy directly out of the inputs; the engine resolves each
/// variant against the facts, the pricing result or the finalization facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseFact {
    // Transaction facts
    TransactionDate,
    TransactionTime,
    TerminalSerial,
    TerminalId,
    ChannelName,
    StoreName,
    StoreId,
    CustomerDocument,
    PaymentMethodCode,
    CardBrand,
    TransactionNsu,
    AcquirerNsu,
    GrossAmount,
    InstallmentCount,
    ProgramTier,
    // Pricing result
    DiscountRate,
    CommissionRate,
    AcquirerCostRate,
    PartnerRate,
    AnticipationRate,
    TaxRate,
    CashbackProgramRate,
    SettlementDelayDays,
    NetAmount,
    InstallmentAmount,
    CashbackBaseAmount,
    CashbackProgramNet,
    CashbackAmount,
    EffectiveCostRate,
    CashbackPayoutDate,
    ReceiptMessage,
    SettlementDueDate,
    // Finalization facts; absent fields evaluate to the sentinel
    AcquirerSettledAmount,
    AcquirerSettledDate,
    MerchantRemittedAmount,
    MerchantRemittedDate,
    CashbackPaidAmount,
    PartnerInvoicedAmount,
    PartnerPaidAmount,
}

/// Definition of one catalogue slot.
#[derive(Debug, Clone)]
pub enum Slot {
    Base(BaseFact),
    Formula(Expr),
}

/// The closed set of variable definitions, version `"v1"`.
///
/// Declaration order is evaluation order; the validator enforces that
/// formulas only reference earlier slots, so dependency resolution is a
/// single forward pass with no cycle detection at runtime.
pub struct Catalogue {
    slots: Vec<(VariableKind, Slot)>,
}

impl Catalogue {
    /// The active catalogue, built once per process.
    pub fn v1() -> &'static Catalogue {
        static INSTANCE: OnceLock<Catalogue> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let slots = VarId::ALL.iter().map(|var| define(*var)).collect();
            Catalogue { slots }
        })
    }

    pub fn version(&self) -> &'static str {
        CATALOGUE_VERSION
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn kind(&self, var: VarId) -> VariableKind {
        self.slots[var.index()].0
    }

    pub fn slot(&self, var: VarId) -> &Slot {
        &self.slots[var.index()].1
    }

    /// Checks the structural invariants of the catalogue.
    ///
    /// Every formula may only reference slots declared before it, and every
    /// `LabelIs` condition must target a label slot. Run once at engine
    /// construction.
    pub fn validate(&self) -> Result<(), DerivationError> {
        if self.slots.len() != VARIABLE_COUNT {
            return Err(DerivationError::CatalogueInvalid(format!(
                "expected {} slots, found {}",
                VARIABLE_COUNT,
                self.slots.len()
            )));
        }
        for (index, var) in VarId::ALL.iter().enumerate() {
            if var.index() != index {
                return Err(DerivationError::CatalogueInvalid(format!(
                    "variable {} is out of order",
                    var.identifier()
                )));
            }
            if let Slot::Formula(expr) = self.slot(*var) {
                let mut refs = Vec::new();
                expr.refs(&mut refs);
                for referenced in refs {
                    if referenced.index() >= index {
                        return Err(DerivationError::CatalogueInvalid(format!(
                            "{} references {} which is not declared earlier",
                            var.identifier(),
                            referenced.identifier()
                        )));
                    }
                }
                validate_label_conditions(expr, self)?;
            }
        }
        Ok(())
    }
}

fn validate_label_conditions(expr: &Expr, catalogue: &Catalogue) -> Result<(), DerivationError> {
    match expr {
        Expr::If(cond, then, otherwise) => {
            if let Cond::LabelIs(var, _) = cond.as_ref() {
                if catalogue.kind(*var) != VariableKind::Label {
                    return Err(DerivationError::CatalogueInvalid(format!(
                        "label condition targets non-label slot {}",
                        var.identifier()
                    )));
                }
            }
            validate_label_conditions(then, catalogue)?;
            validate_label_conditions(otherwise, catalogue)
        }
        Expr::Bin(_, lhs, rhs) => {
            validate_label_conditions(lhs, catalogue)?;
            validate_label_conditions(rhs, catalogue)
        }
        Expr::Abs(inner) => validate_label_conditions(inner, catalogue),
        Expr::Var(_) | Expr::Number(_) | Expr::Text(_) => Ok(()),
    }
}

fn v(id: VarId) -> Expr {
    Expr::var(id)
}

fn gt_zero(id: VarId) -> Cond {
    Cond::Cmp(CmpOp::Gt, v(id), Expr::num(dec!(0)))
}

/// Ratio of an amount slot over the gross amount.
fn over_gross(id: VarId) -> Expr {
    Expr::div(v(id), v(VarId::GrossAmount))
}

/// Ratio of an amount slot over the net amount.
fn over_net(id: VarId) -> Expr {
    Expr::div(v(id), v(VarId::NetAmount))
}

fn per_installment(id: VarId) -> Expr {
    Expr::div(v(id), v(VarId::InstallmentCount))
}

/// The single source of truth for what each variable means.
fn define(var: VarId) -> (VariableKind, Slot) {
    use BaseFact as B;
    use Slot::{Base, Formula};
    use VariableKind::{Currency, Label, Percentage, Quantity};

    match var {
        // Transaction bases
        VarId::TransactionDate => (Label, Base(B::TransactionDate)),
        VarId::TransactionTime => (Label, Base(B::TransactionTime)),
        VarId::TerminalSerial => (Label, Base(B::TerminalSerial)),
        VarId::TerminalId => (Label, Base(B::TerminalId)),
        VarId::ChannelName => (Label, Base(B::ChannelName)),
        VarId::StoreName => (Label, Base(B::StoreName)),
        VarId::StoreId => (Label, Base(B::StoreId)),
        VarId::CustomerDocument => (Label, Base(B::CustomerDocument)),
        VarId::PaymentMethodCode => (Label, Base(B::PaymentMethodCode)),
        VarId::CardBrand => (Label, Base(B::CardBrand)),
        VarId::TransactionNsu => (Label, Base(B::TransactionNsu)),
        VarId::AcquirerNsu => (Label, Base(B::AcquirerNsu)),
        VarId::GrossAmount => (Currency, Base(B::GrossAmount)),
        VarId::InstallmentCount => (Quantity, Base(B::InstallmentCount)),
        VarId::ProgramTier => (Label, Base(B::ProgramTier)),

        // Rate bases
        VarId::DiscountRate => (Percentage, Base(B::DiscountRate)),
        VarId::CommissionRate => (Percentage, Base(B::CommissionRate)),
        VarId::AcquirerCostRate => (Percentage, Base(B::AcquirerCostRate)),
        VarId::PartnerRate => (Percentage, Base(B::PartnerRate)),
        VarId::AnticipationRate => (Percentage, Base(B::AnticipationRate)),
        VarId::TaxRate => (Percentage, Base(B::TaxRate)),
        VarId::CashbackProgramRate => (Percentage, Base(B::CashbackProgramRate)),
        VarId::SettlementDelayDays => (Quantity, Base(B::SettlementDelayDays)),

        // Pricing bases
        VarId::NetAmount => (Currency, Base(B::NetAmount)),
        VarId::InstallmentAmount => (Currency, Base(B::InstallmentAmount)),
        VarId::CashbackBaseAmount => (Currency, Base(B::CashbackBaseAmount)),
        VarId::CashbackProgramNet => (Currency, Base(B::CashbackProgramNet)),
        VarId::CashbackAmount => (Currency, Base(B::CashbackAmount)),
        VarId::EffectiveCostRate => (Percentage, Base(B::EffectiveCostRate)),
        VarId::CashbackPayoutDate => (Label, Base(B::CashbackPayoutDate)),
        VarId::ReceiptMessage => (Label, Base(B::ReceiptMessage)),

        // Customer-facing formulas
        VarId::DiscountAmount => (
            Currency,
            Formula(Expr::mul(v(VarId::GrossAmount), v(VarId::DiscountRate))),
        ),
        VarId::DiscountedAmount => (
            Currency,
            Formula(Expr::sub(v(VarId::GrossAmount), v(VarId::DiscountAmount))),
        ),
        VarId::AnticipationFactor => (
            Percentage,
            Formula(Expr::mul(
                v(VarId::AnticipationRate),
                Expr::div(
                    Expr::add(Expr::num(dec!(1)), v(VarId::InstallmentCount)),
                    Expr::num(dec!(2)),
                ),
            )),
        ),
        VarId::AnticipationCost => (
            Currency,
            Formula(Expr::mul(
                v(VarId::DiscountedAmount),
                v(VarId::AnticipationFactor),
            )),
        ),
        VarId::PriceAdjustmentAmount => (
            Currency,
            Formula(Expr::sub(v(VarId::NetAmount), v(VarId::GrossAmount))),
        ),
        VarId::PriceAdjustmentRate => {
            (Percentage, Formula(over_gross(VarId::PriceAdjustmentAmount)))
        }
        VarId::InstallmentGrossAmount => {
            (Currency, Formula(per_installment(VarId::GrossAmount)))
        }
        VarId::InstallmentDelta => (
            Currency,
            Formula(Expr::sub(
                v(VarId::InstallmentAmount),
                v(VarId::InstallmentGrossAmount),
            )),
        ),
        VarId::EffectiveRate => (Percentage, Formula(over_gross(VarId::NetAmount))),
        VarId::NetDiscountRate => (
            Percentage,
            Formula(Expr::abs(v(VarId::PriceAdjustmentRate))),
        ),

        // Platform economics
        VarId::CommissionAmount => (
            Currency,
            Formula(Expr::mul(v(VarId::NetAmount), v(VarId::CommissionRate))),
        ),
        VarId::AcquirerCostAmount => (
            Currency,
            Formula(Expr::mul(v(VarId::GrossAmount), v(VarId::AcquirerCostRate))),
        ),
        VarId::AcquirerNetAmount => (
            Currency,
            Formula(Expr::sub(v(VarId::GrossAmount), v(VarId::AcquirerCostAmount))),
        ),
        VarId::PlatformGrossRevenue => (
            Currency,
            Formula(Expr::add(
                v(VarId::CommissionAmount),
                v(VarId::AnticipationCost),
            )),
        ),
        VarId::PlatformGrossRevenueRate => {
            (Percentage, Formula(over_gross(VarId::PlatformGrossRevenue)))
        }
        VarId::TaxWithheldAmount => (
            Currency,
            Formula(Expr::mul(v(VarId::PlatformGrossRevenue), v(VarId::TaxRate))),
        ),
        VarId::MerchantPayableAmount => (
            Currency,
            Formula(Expr::sub(v(VarId::NetAmount), v(VarId::CommissionAmount))),
        ),
        VarId::MerchantPayableRate => {
            (Percentage, Formula(over_gross(VarId::MerchantPayableAmount)))
        }
        VarId::PartnerShareAmount => (
            Currency,
            Formula(Expr::mul(v(VarId::NetAmount), v(VarId::PartnerRate))),
        ),
        VarId::PartnerShareRate => (Percentage, Formula(over_gross(VarId::PartnerShareAmount))),
        VarId::PlatformMarginAmount => (
            Currency,
            Formula(Expr::sub(
                Expr::sub(
                    v(VarId::PlatformGrossRevenue),
                    v(VarId::PartnerShareAmount),
                ),
                v(VarId::TaxWithheldAmount),
            )),
        ),
        VarId::PlatformMarginRate => {
            (Percentage, Formula(over_gross(VarId::PlatformMarginAmount)))
        }
        VarId::AcquirerSpreadAmount => (
            Currency,
            Formula(Expr::sub(
                v(VarId::AcquirerNetAmount),
                v(VarId::MerchantPayableAmount),
            )),
        ),
        VarId::AcquirerSpreadRate => {
            (Percentage, Formula(over_gross(VarId::AcquirerSpreadAmount)))
        }
        VarId::NetRevenueAmount => (
            Currency,
            Formula(Expr::sub(
                v(VarId::PlatformMarginAmount),
                v(VarId::CashbackAmount),
            )),
        ),
        VarId::NetRevenueRate => (Percentage, Formula(over_gross(VarId::NetRevenueAmount))),
        VarId::FundingCostAmount => (Currency, Formula(v(VarId::AnticipationCost))),
        VarId::FundingCostRate => (Percentage, Formula(over_gross(VarId::FundingCostAmount))),
        VarId::OperatingResultAmount => (
            Currency,
            Formula(Expr::sub(
                v(VarId::NetRevenueAmount),
                v(VarId::FundingCostAmount),
            )),
        ),
        VarId::OperatingResultRate => {
            (Percentage, Formula(over_gross(VarId::OperatingResultAmount)))
        }

        // Cashback program
        VarId::CashbackRate => (Percentage, Formula(over_gross(VarId::CashbackAmount))),
        VarId::CashbackOnNetRate => (Percentage, Formula(over_net(VarId::CashbackAmount))),
        VarId::CashbackAccrualStatus => (
            Label,
            Formula(Expr::if_(
                gt_zero(VarId::CashbackAmount),
                Expr::Text("Accrued"),
                Expr::Text("None"),
            )),
        ),
        VarId::CashbackProgramDelta => (
            Currency,
            Formula(Expr::sub(
                v(VarId::CashbackBaseAmount),
                v(VarId::CashbackProgramNet),
            )),
        ),
        VarId::CashbackPerInstallment => {
            (Currency, Formula(per_installment(VarId::CashbackAmount)))
        }
        VarId::CashbackFundingAmount => (Currency, Formula(v(VarId::CashbackAmount))),
        VarId::CashbackPayoutStatus => (
            Label,
            Formula(Expr::if_(
                gt_zero(VarId::CashbackAmount),
                Expr::Text("Scheduled"),
                Expr::Text(""),
            )),
        ),
        VarId::ClubSavingsAmount => (
            Currency,
            Formula(Expr::add(
                v(VarId::DiscountAmount),
                v(VarId::CashbackAmount),
            )),
        ),
        VarId::ClubSavingsRate => (Percentage, Formula(over_gross(VarId::ClubSavingsAmount))),

        // Schedule and labels
        VarId::SettlementDueDate => (Label, Base(B::SettlementDueDate)),
        VarId::PaymentChannel => (
            Label,
            Formula(Expr::if_(
                Cond::LabelIs(VarId::PaymentMethodCode, "PIX"),
                Expr::Text("Instant"),
                Expr::if_(
                    Cond::LabelIs(VarId::PaymentMethodCode, "DEBIT"),
                    Expr::Text("Debit"),
                    Expr::Text("Credit"),
                ),
            )),
        ),
        VarId::InstallmentProfile => (
            Label,
            Formula(Expr::if_(
                Cond::Cmp(CmpOp::Gt, v(VarId::InstallmentCount), Expr::num(dec!(1))),
                Expr::Text("Installments"),
                Expr::Text("Single"),
            )),
        ),
        VarId::HasDiscountLabel => (
            Label,
            Formula(Expr::if_(
                Cond::Cmp(CmpOp::Lt, v(VarId::NetAmount), v(VarId::GrossAmount)),
                Expr::Text("Discount"),
                Expr::Text(""),
            )),
        ),
        VarId::HasSurchargeLabel => (
            Label,
            Formula(Expr::if_(
                Cond::Cmp(CmpOp::Gt, v(VarId::NetAmount), v(VarId::GrossAmount)),
                Expr::Text("Surcharge"),
                Expr::Text(""),
            )),
        ),

        // Ledger copies, fixed aliases consumed by the export layer
        VarId::LedgerGrossAmount => (Currency, Formula(v(VarId::GrossAmount))),
        VarId::LedgerNetAmount => (Currency, Formula(v(VarId::NetAmount))),
        VarId::LedgerDiscountRate => (Percentage, Formula(v(VarId::DiscountRate))),
        VarId::LedgerDiscountAmount => (Currency, Formula(v(VarId::DiscountAmount))),
        VarId::LedgerCommissionRate => (Percentage, Formula(v(VarId::CommissionRate))),
        VarId::LedgerCommissionAmount => (Currency, Formula(v(VarId::CommissionAmount))),
        VarId::LedgerCashbackAmount => (Currency, Formula(v(VarId::CashbackAmount))),
        VarId::LedgerInstallmentAmount => (Currency, Formula(v(VarId::InstallmentAmount))),
        VarId::LedgerPartnerShareAmount => (Currency, Formula(v(VarId::PartnerShareAmount))),
        VarId::LedgerMarginAmount => (Currency, Formula(v(VarId::PlatformMarginAmount))),

        // Finalization bases
        VarId::AcquirerSettledAmount => (Currency, Base(B::AcquirerSettledAmount)),
        VarId::AcquirerSettledDate => (Label, Base(B::AcquirerSettledDate)),
        VarId::MerchantRemittedAmount => (Currency, Base(B::MerchantRemittedAmount)),
        VarId::MerchantRemittedDate => (Label, Base(B::MerchantRemittedDate)),
        VarId::CashbackPaidAmount => (Currency, Base(B::CashbackPaidAmount)),
        VarId::PartnerInvoicedAmount => (Currency, Base(B::PartnerInvoicedAmount)),
        VarId::PartnerPaidAmount => (Currency, Base(B::PartnerPaidAmount)),

        // Finalized formulas
        VarId::SettlementVarianceAmount => (
            Currency,
            Formula(Expr::sub(
                v(VarId::AcquirerSettledAmount),
                v(VarId::AcquirerNetAmount),
            )),
        ),
        VarId::SettlementVarianceRate => (
            Percentage,
            Formula(over_gross(VarId::SettlementVarianceAmount)),
        ),
        VarId::RemittanceVarianceAmount => (
            Currency,
            Formula(Expr::sub(
                v(VarId::MerchantRemittedAmount),
                v(VarId::MerchantPayableAmount),
            )),
        ),
        VarId::RemittanceVarianceRate => (
            Percentage,
            Formula(over_gross(VarId::RemittanceVarianceAmount)),
        ),
        VarId::CashbackVarianceAmount => (
            Currency,
            Formula(Expr::sub(
                v(VarId::CashbackPaidAmount),
                v(VarId::CashbackAmount),
            )),
        ),
        VarId::RealizedRevenueAmount => (
            Currency,
            Formula(Expr::sub(
                v(VarId::AcquirerSettledAmount),
                v(VarId::MerchantRemittedAmount),
            )),
        ),
        VarId::RealizedRevenueRate => {
            (Percentage, Formula(over_gross(VarId::RealizedRevenueAmount)))
        }
        VarId::RealizedMarginAmount => (
            Currency,
            Formula(Expr::sub(
                Expr::sub(
                    v(VarId::RealizedRevenueAmount),
                    v(VarId::CashbackPaidAmount),
                ),
                v(VarId::TaxWithheldAmount),
            )),
        ),
        VarId::RealizedMarginRate => {
            (Percentage, Formula(over_gross(VarId::RealizedMarginAmount)))
        }
        VarId::RealizedVsExpectedAmount => (
            Currency,
            Formula(Expr::sub(
                v(VarId::RealizedMarginAmount),
                v(VarId::PlatformMarginAmount),
            )),
        ),
        VarId::RealizedVsExpectedRate => (
            Percentage,
            Formula(over_gross(VarId::RealizedVsExpectedAmount)),
        ),
        VarId::PartnerBalanceAmount => (
            Currency,
            Formula(Expr::sub(
                v(VarId::PartnerInvoicedAmount),
                v(VarId::PartnerPaidAmount),
            )),
        ),
        VarId::PartnerSettledShareAmount => (
            Currency,
            Formula(Expr::mul(
                v(VarId::RealizedRevenueAmount),
                v(VarId::PartnerRate),
            )),
        ),
        VarId::PartnerShareVarianceAmount => (
            Currency,
            Formula(Expr::sub(
                v(VarId::PartnerSettledShareAmount),
                v(VarId::PartnerShareAmount),
            )),
        ),
        VarId::FinalResultAmount => (
            Currency,
            Formula(Expr::sub(
                Expr::sub(
                    v(VarId::RealizedMarginAmount),
                    v(VarId::PartnerSettledShareAmount),
                ),
                v(VarId::FundingCostAmount),
            )),
        ),
        VarId::FinalResultRate => (Percentage, Formula(over_gross(VarId::FinalResultAmount))),
        VarId::FinalResultPerInstallment => {
            (Currency, Formula(per_installment(VarId::FinalResultAmount)))
        }
        VarId::SettlementStatus => (
            Label,
            Formula(Expr::if_(
                Cond::Cmp(
                    CmpOp::Ge,
                    v(VarId::AcquirerSettledAmount),
                    v(VarId::AcquirerNetAmount),
                ),
                Expr::Text("Settled in full"),
                Expr::Text("Settled short"),
            )),
        ),
        VarId::RemittanceStatus => (
            Label,
            Formula(Expr::if_(
                Cond::Cmp(
                    CmpOp::Ge,
                    v(VarId::MerchantRemittedAmount),
                    v(VarId::MerchantPayableAmount),
                ),
                Expr::Text("Remitted in full"),
                Expr::Text("Remitted short"),
            )),
        ),
        VarId::CashbackPaymentStatus => (
            Label,
            Formula(Expr::if_(
                Cond::Cmp(
                    CmpOp::Ge,
                    v(VarId::CashbackPaidAmount),
                    v(VarId::CashbackAmount),
                ),
                Expr::Text("Paid"),
                Expr::Text("Underpaid"),
            )),
        ),
        VarId::PartnerSettlementStatus => (
            Label,
            Formula(Expr::if_(
                gt_zero(VarId::PartnerBalanceAmount),
                Expr::Text("Outstanding"),
                Expr::Text("Cleared"),
            )),
        ),
        VarId::ReconciliationStatus => (
            Label,
            Formula(Expr::if_(
                Cond::Cmp(
                    CmpOp::Le,
                    Expr::abs(v(VarId::RealizedVsExpectedAmount)),
                    Expr::num(dec!(0.01)),
                ),
                Expr::Text("Reconciled"),
                Expr::Text("Variance"),
            )),
        ),
        VarId::RealizedCashbackRate => {
            (Percentage, Formula(over_gross(VarId::CashbackPaidAmount)))
        }
        VarId::NetCashPositionAmount => (
            Currency,
            Formula(Expr::sub(
                Expr::sub(
                    v(VarId::RealizedRevenueAmount),
                    v(VarId::CashbackPaidAmount),
                ),
                v(VarId::PartnerPaidAmount),
            )),
        ),
        VarId::NetCashPositionRate => {
            (Percentage, Formula(over_gross(VarId::NetCashPositionAmount)))
        }

        // Analysis extras
        VarId::AbsAdjustmentAmount => (
            Currency,
            Formula(Expr::abs(v(VarId::PriceAdjustmentAmount))),
        ),
        VarId::AbsSettlementVariance => (
            Currency,
            Formula(Expr::abs(v(VarId::SettlementVarianceAmount))),
        ),
        VarId::AbsRemittanceVariance => (
            Currency,
            Formula(Expr::abs(v(VarId::RemittanceVarianceAmount))),
        ),
        VarId::TaxOnNetRate => (Percentage, Formula(over_net(VarId::TaxWithheldAmount))),
        VarId::CommissionOnNetRate => (Percentage, Formula(over_net(VarId::CommissionAmount))),
        VarId::AnticipationOnNetRate => (Percentage, Formula(over_net(VarId::AnticipationCost))),
        VarId::MarginPerInstallment => (
            Currency,
            Formula(per_installment(VarId::PlatformMarginAmount)),
        ),
        VarId::RevenuePerInstallment => (
            Currency,
            Formula(per_installment(VarId::PlatformGrossRevenue)),
        ),
        VarId::CostTotalAmount => (
            Currency,
            Formula(Expr::add(
                Expr::add(
                    v(VarId::AcquirerCostAmount),
                    v(VarId::TaxWithheldAmount),
                ),
                Expr::add(v(VarId::FundingCostAmount), v(VarId::CashbackAmount)),
            )),
        ),
        VarId::CostTotalRate => (Percentage, Formula(over_gross(VarId::CostTotalAmount))),
        VarId::ContributionAmount => (
            Currency,
            Formula(Expr::sub(
                v(VarId::PlatformGrossRevenue),
                v(VarId::CostTotalAmount),
            )),
        ),
        VarId::ContributionRate => (Percentage, Formula(over_gross(VarId::ContributionAmount))),
        VarId::LedgerProgramTier => (Label, Formula(v(VarId::ProgramTier))),
    }
}
