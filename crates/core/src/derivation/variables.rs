use serde::{Deserialize, Serialize};

/// Identifier of one variable slot in the catalogue.
///
/// The enum is closed: adding, removing or reordering a variant is a new
/// catalogue version, because declaration order doubles as evaluation order
/// and as the column order of every ledger export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum VarId {
    // Transaction bases
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

    // Rate bases
    DiscountRate,
    CommissionRate,
    AcquirerCostRate,
    PartnerRate,
    AnticipationRate,
    TaxRate,
    CashbackProgramRate,
    SettlementDelayDays,

    // Pricing bases
    NetAmount,
    InstallmentAmount,
    CashbackBaseAmount,
    CashbackProgramNet,
    CashbackAmount,
    EffectiveCostRate,
    CashbackPayoutDate,
    ReceiptMessage,

    // Customer-facing formulas
    DiscountAmount,
    DiscountedAmount,
    AnticipationFactor,
    AnticipationCost,
    PriceAdjustmentAmount,
    PriceAdjustmentRate,
    InstallmentGrossAmount,
    InstallmentDelta,
    EffectiveRate,
    NetDiscountRate,

    // Platform economics
    CommissionAmount,
    AcquirerCostAmount,
    AcquirerNetAmount,
    PlatformGrossRevenue,
    PlatformGrossRevenueRate,
    TaxWithheldAmount,
    MerchantPayableAmount,
    MerchantPayableRate,
    PartnerShareAmount,
    PartnerShareRate,
    PlatformMarginAmount,
    PlatformMarginRate,
    AcquirerSpreadAmount,
    AcquirerSpreadRate,
    NetRevenueAmount,
    NetRevenueRate,
    FundingCostAmount,
    FundingCostRate,
    OperatingResultAmount,
    OperatingResultRate,

    // Cashback program
    CashbackRate,
    CashbackOnNetRate,
    CashbackAccrualStatus,
    CashbackProgramDelta,
    CashbackPerInstallment,
    CashbackFundingAmount,
    CashbackPayoutStatus,
    ClubSavingsAmount,
    ClubSavingsRate,

    // Schedule and labels
    SettlementDueDate,
    PaymentChannel,
    InstallmentProfile,
    HasDiscountLabel,
    HasSurchargeLabel,

    // Ledger copies
    LedgerGrossAmount,
    LedgerNetAmount,
    LedgerDiscountRate,
    LedgerDiscountAmount,
    LedgerCommissionRate,
    LedgerCommissionAmount,
    LedgerCashbackAmount,
    LedgerInstallmentAmount,
    LedgerPartnerShareAmount,
    LedgerMarginAmount,

    // Finalization bases
    AcquirerSettledAmount,
    AcquirerSettledDate,
    MerchantRemittedAmount,
    MerchantRemittedDate,
    CashbackPaidAmount,
    PartnerInvoicedAmount,
    PartnerPaidAmount,

    // Finalized formulas
    SettlementVarianceAmount,
    SettlementVarianceRate,
    RemittanceVarianceAmount,
    RemittanceVarianceRate,
    CashbackVarianceAmount,
    RealizedRevenueAmount,
    RealizedRevenueRate,
    RealizedMarginAmount,
    RealizedMarginRate,
    RealizedVsExpectedAmount,
    RealizedVsExpectedRate,
    PartnerBalanceAmount,
    PartnerSettledShareAmount,
    PartnerShareVarianceAmount,
    FinalResultAmount,
    FinalResultRate,
    FinalResultPerInstallment,
    SettlementStatus,
    RemittanceStatus,
    CashbackPaymentStatus,
    PartnerSettlementStatus,
    ReconciliationStatus,
    RealizedCashbackRate,
    NetCashPositionAmount,
    NetCashPositionRate,

    // Analysis extras
    AbsAdjustmentAmount,
    AbsSettlementVariance,
    AbsRemittanceVariance,
    TaxOnNetRate,
    CommissionOnNetRate,
    AnticipationOnNetRate,
    MarginPerInstallment,
    RevenuePerInstallment,
    CostTotalAmount,
    CostTotalRate,
    ContributionAmount,
    ContributionRate,
    LedgerProgramTier,
}

impl VarId {
    /// Every variable in catalogue (and evaluation/export) order.
    pub const ALL: [VarId; crate::constants::VARIABLE_COUNT] = [
        VarId::TransactionDate,
        VarId::TransactionTime,
        VarId::TerminalSerial,
        VarId::TerminalId,
        VarId::ChannelName,
        VarId::StoreName,
        VarId::StoreId,
        VarId::CustomerDocument,
        VarId::PaymentMethodCode,
        VarId::CardBrand,
        VarId::TransactionNsu,
        VarId::AcquirerNsu,
        VarId::GrossAmount,
        VarId::InstallmentCount,
        VarId::ProgramTier,
        VarId::DiscountRate,
        VarId::CommissionRate,
        VarId::AcquirerCostRate,
        VarId::PartnerRate,
        VarId::AnticipationRate,
        VarId::TaxRate,
        VarId::CashbackProgramRate,
        VarId::SettlementDelayDays,
        VarId::NetAmount,
        VarId::InstallmentAmount,
        VarId::CashbackBaseAmount,
        VarId::CashbackProgramNet,
        VarId::CashbackAmount,
        VarId::EffectiveCostRate,
        VarId::CashbackPayoutDate,
        VarId::ReceiptMessage,
        VarId::DiscountAmount,
        VarId::DiscountedAmount,
        VarId::AnticipationFactor,
        VarId::AnticipationCost,
        VarId::PriceAdjustmentAmount,
        VarId::PriceAdjustmentRate,
        VarId::InstallmentGrossAmount,
        VarId::InstallmentDelta,
        VarId::EffectiveRate,
        VarId::NetDiscountRate,
        VarId::CommissionAmount,
        VarId::AcquirerCostAmount,
        VarId::AcquirerNetAmount,
        VarId::PlatformGrossRevenue,
        VarId::PlatformGrossRevenueRate,
        VarId::TaxWithheldAmount,
        VarId::MerchantPayableAmount,
        VarId::MerchantPayableRate,
        VarId::PartnerShareAmount,
        VarId::PartnerShareRate,
        VarId::PlatformMarginAmount,
        VarId::PlatformMarginRate,
        VarId::AcquirerSpreadAmount,
        VarId::AcquirerSpreadRate,
        VarId::NetRevenueAmount,
        VarId::NetRevenueRate,
        VarId::FundingCostAmount,
        VarId::FundingCostRate,
        VarId::OperatingResultAmount,
        VarId::OperatingResultRate,
        VarId::CashbackRate,
        VarId::CashbackOnNetRate,
        VarId::CashbackAccrualStatus,
        VarId::CashbackProgramDelta,
        VarId::CashbackPerInstallment,
        VarId::CashbackFundingAmount,
        VarId::CashbackPayoutStatus,
        VarId::ClubSavingsAmount,
        VarId::ClubSavingsRate,
        VarId::SettlementDueDate,
        VarId::PaymentChannel,
        VarId::InstallmentProfile,
        VarId::HasDiscountLabel,
        VarId::HasSurchargeLabel,
        VarId::LedgerGrossAmount,
        VarId::LedgerNetAmount,
        VarId::LedgerDiscountRate,
        VarId::LedgerDiscountAmount,
        VarId::LedgerCommissionRate,
        VarId::LedgerCommissionAmount,
        VarId::LedgerCashbackAmount,
        VarId::LedgerInstallmentAmount,
        VarId::LedgerPartnerShareAmount,
        VarId::LedgerMarginAmount,
        VarId::AcquirerSettledAmount,
        VarId::AcquirerSettledDate,
        VarId::MerchantRemittedAmount,
        VarId::MerchantRemittedDate,
        VarId::CashbackPaidAmount,
        VarId::PartnerInvoicedAmount,
        VarId::PartnerPaidAmount,
        VarId::SettlementVarianceAmount,
        VarId::SettlementVarianceRate,
        VarId::RemittanceVarianceAmount,
        VarId::RemittanceVarianceRate,
        VarId::CashbackVarianceAmount,
        VarId::RealizedRevenueAmount,
        VarId::RealizedRevenueRate,
        VarId::RealizedMarginAmount,
        VarId::RealizedMarginRate,
        VarId::RealizedVsExpectedAmount,
        VarId::RealizedVsExpectedRate,
        VarId::PartnerBalanceAmount,
        VarId::PartnerSettledShareAmount,
        VarId::PartnerShareVarianceAmount,
        VarId::FinalResultAmount,
        VarId::FinalResultRate,
        VarId::FinalResultPerInstallment,
        VarId::SettlementStatus,
        VarId::RemittanceStatus,
        VarId::CashbackPaymentStatus,
        VarId::PartnerSettlementStatus,
        VarId::ReconciliationStatus,
        VarId::RealizedCashbackRate,
        VarId::NetCashPositionAmount,
        VarId::NetCashPositionRate,
        VarId::AbsAdjustmentAmount,
        VarId::AbsSettlementVariance,
        VarId::AbsRemittanceVariance,
        VarId::TaxOnNetRate,
        VarId::CommissionOnNetRate,
        VarId::AnticipationOnNetRate,
        VarId::MarginPerInstallment,
        VarId::RevenuePerInstallment,
        VarId::CostTotalAmount,
        VarId::CostTotalRate,
        VarId::ContributionAmount,
        VarId::ContributionRate,
        VarId::LedgerProgramTier,
    ];

    /// Position of this variable in catalogue order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case identifier used as the export column name.
    pub fn identifier(self) -> &'static str {
        match self {
            VarId::TransactionDate => "transaction_date",
            VarId::TransactionTime => "transaction_time",
            VarId::TerminalSerial => "terminal_serial",
            VarId::TerminalId => "terminal_id",
            VarId::ChannelName => "channel_name",
            VarId::StoreName => "store_name",
            VarId::StoreId => "store_id",
            VarId::CustomerDocument => "customer_document",
            VarId::PaymentMethodCode => "payment_method_code",
            VarId::CardBrand => "card_brand",
            VarId::TransactionNsu => "transaction_nsu",
            VarId::AcquirerNsu => "acquirer_nsu",
            VarId::GrossAmount => "gross_amount",
            VarId::InstallmentCount => "installment_count",
            VarId::ProgramTier => "program_tier",
            VarId::DiscountRate => "discount_rate",
            VarId::CommissionRate => "commission_rate",
            VarId::AcquirerCostRate => "acquirer_cost_rate",
            VarId::PartnerRate => "partner_rate",
            VarId::AnticipationRate => "anticipation_rate",
            VarId::TaxRate => "tax_rate",
            VarId::CashbackProgramRate => "cashback_program_rate",
            VarId::SettlementDelayDays => "settlement_delay_days",
            VarId::NetAmount => "net_amount",
            VarId::InstallmentAmount => "installment_amount",
            VarId::CashbackBaseAmount => "cashback_base_amount",
            VarId::CashbackProgramNet => "cashback_program_net",
            VarId::CashbackAmount => "cashback_amount",
            VarId::EffectiveCostRate => "effective_cost_rate",
            VarId::CashbackPayoutDate => "cashback_payout_date",
            VarId::ReceiptMessage => "receipt_message",
            VarId::DiscountAmount => "discount_amount",
            VarId::DiscountedAmount => "discounted_amount",
            VarId::AnticipationFactor => "anticipation_factor",
            VarId::AnticipationCost => "anticipation_cost",
            VarId::PriceAdjustmentAmount => "price_adjustment_amount",
            VarId::PriceAdjustmentRate => "price_adjustment_rate",
            VarId::InstallmentGrossAmount => "installment_gross_amount",
            VarId::InstallmentDelta => "installment_delta",
            VarId::EffectiveRate => "effective_rate",
            VarId::NetDiscountRate => "net_discount_rate",
            VarId::CommissionAmount => "commission_amount",
            VarId::AcquirerCostAmount => "acquirer_cost_amount",
            VarId::AcquirerNetAmount => "acquirer_net_amount",
            VarId::PlatformGrossRevenue => "platform_gross_revenue",
            VarId::PlatformGrossRevenueRate => "platform_gross_revenue_rate",
            VarId::TaxWithheldAmount => "tax_withheld_amount",
            VarId::MerchantPayableAmount => "merchant_payable_amount",
            VarId::MerchantPayableRate => "merchant_payable_rate",
            VarId::PartnerShareAmount => "partner_share_amount",
            VarId::PartnerShareRate => "partner_share_rate",
            VarId::PlatformMarginAmount => "platform_margin_amount",
            VarId::PlatformMarginRate => "platform_margin_rate",
            VarId::AcquirerSpreadAmount => "acquirer_spread_amount",
            VarId::AcquirerSpreadRate => "acquirer_spread_rate",
            VarId::NetRevenueAmount => "net_revenue_amount",
            VarId::NetRevenueRate => "net_revenue_rate",
            VarId::FundingCostAmount => "funding_cost_amount",
            VarId::FundingCostRate => "funding_cost_rate",
            VarId::OperatingResultAmount => "operating_result_amount",
            VarId::OperatingResultRate => "operating_result_rate",
            VarId::CashbackRate => "cashback_rate",
            VarId::CashbackOnNetRate => "cashback_on_net_rate",
            VarId::CashbackAccrualStatus => "cashback_accrual_status",
            VarId::CashbackProgramDelta => "cashback_program_delta",
            VarId::CashbackPerInstallment => "cashback_per_installment",
            VarId::CashbackFundingAmount => "cashback_funding_amount",
            VarId::CashbackPayoutStatus => "cashback_payout_status",
            VarId::ClubSavingsAmount => "club_savings_amount",
            VarId::ClubSavingsRate => "club_savings_rate",
            VarId::SettlementDueDate => "settlement_due_date",
            VarId::PaymentChannel => "payment_channel",
            VarId::InstallmentProfile => "installment_profile",
            VarId::HasDiscountLabel => "has_discount_label",
            VarId::HasSurchargeLabel => "has_surcharge_label",
            VarId::LedgerGrossAmount => "ledger_gross_amount",
            VarId::LedgerNetAmount => "ledger_net_amount",
            VarId::LedgerDiscountRate => "ledger_discount_rate",
            VarId::LedgerDiscountAmount => "ledger_discount_amount",
            VarId::LedgerCommissionRate => "ledger_commission_rate",
            VarId::LedgerCommissionAmount => "ledger_commission_amount",
            VarId::LedgerCashbackAmount => "ledger_cashback_amount",
            VarId::LedgerInstallmentAmount => "ledger_installment_amount",
            VarId::LedgerPartnerShareAmount => "ledger_partner_share_amount",
            VarId::LedgerMarginAmount => "ledger_margin_amount",
            VarId::AcquirerSettledAmount => "acquirer_settled_amount",
            VarId::AcquirerSettledDate => "acquirer_settled_date",
            VarId::MerchantRemittedAmount => "merchant_remitted_amount",
            VarId::MerchantRemittedDate => "merchant_remitted_date",
            VarId::CashbackPaidAmount => "cashback_paid_amount",
            VarId::PartnerInvoicedAmount => "partner_invoiced_amount",
            VarId::PartnerPaidAmount => "partner_paid_amount",
            VarId::SettlementVarianceAmount => "settlement_variance_amount",
            VarId::SettlementVarianceRate => "settlement_variance_rate",
            VarId::RemittanceVarianceAmount => "remittance_variance_amount",
            VarId::RemittanceVarianceRate => "remittance_variance_rate",
            VarId::CashbackVarianceAmount => "cashback_variance_amount",
            VarId::RealizedRevenueAmount => "realized_revenue_amount",
            VarId::RealizedRevenueRate => "realized_revenue_rate",
            VarId::RealizedMarginAmount => "realized_margin_amount",
            VarId::RealizedMarginRate => "realized_margin_rate",
            VarId::RealizedVsExpectedAmount => "realized_vs_expected_amount",
            VarId::RealizedVsExpectedRate => "realized_vs_expected_rate",
            VarId::PartnerBalanceAmount => "partner_balance_amount",
            VarId::PartnerSettledShareAmount => "partner_settled_share_amount",
            VarId::PartnerShareVarianceAmount => "partner_share_variance_amount",
            VarId::FinalResultAmount => "final_result_amount",
            VarId::FinalResultRate => "final_result_rate",
            VarId::FinalResultPerInstallment => "final_result_per_installment",
            VarId::SettlementStatus => "settlement_status",
            VarId::RemittanceStatus => "remittance_status",
            VarId::CashbackPaymentStatus => "cashback_payment_status",
            VarId::PartnerSettlementStatus => "partner_settlement_status",
            VarId::ReconciliationStatus => "reconciliation_status",
            VarId::RealizedCashbackRate => "realized_cashback_rate",
            VarId::NetCashPositionAmount => "net_cash_position_amount",
            VarId::NetCashPositionRate => "net_cash_position_rate",
            VarId::AbsAdjustmentAmount => "abs_adjustment_amount",
            VarId::AbsSettlementVariance => "abs_settlement_variance",
            VarId::AbsRemittanceVariance => "abs_remittance_variance",
            VarId::TaxOnNetRate => "tax_on_net_rate",
            VarId::CommissionOnNetRate => "commission_on_net_rate",
            VarId::AnticipationOnNetRate => "anticipation_on_net_rate",
            VarId::MarginPerInstallment => "margin_per_installment",
            VarId::RevenuePerInstallment => "revenue_per_installment",
            VarId::CostTotalAmount => "cost_total_amount",
            VarId::CostTotalRate => "cost_total_rate",
            VarId::ContributionAmount => "contribution_amount",
            VarId::ContributionRate => "contribution_rate",
            VarId::LedgerProgramTier => "ledger_program_tier",
        }
    }
}
