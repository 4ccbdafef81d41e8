//! Structural tests over the variable catalogue.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::constants::VARIABLE_COUNT;
    use crate::derivation::{Catalogue, VarId, VariableKind};

    #[test]
    fn test_catalogue_has_exactly_the_declared_slot_count() {
        assert_eq!(Catalogue::v1().len(), VARIABLE_COUNT);
        assert_eq!(VarId::ALL.len(), VARIABLE_COUNT);
    }

    #[test]
    fn test_catalogue_validates() {
        Catalogue::v1().validate().unwrap();
    }

    #[test]
    fn test_all_array_matches_declaration_order() {
        for (index, var) in VarId::ALL.iter().enumerate() {
            assert_eq!(var.index(), index, "{} out of order", var.identifier());
        }
    }

    #[test]
    fn test_identifiers_are_unique() {
        let identifiers: HashSet<&str> =
            VarId::ALL.iter().map(|var| var.identifier()).collect();
        assert_eq!(identifiers.len(), VARIABLE_COUNT);
    }

    #[test]
    fn test_kind_spot_checks() {
        let catalogue = Catalogue::v1();
        assert_eq!(catalogue.kind(VarId::GrossAmount), VariableKind::Currency);
        assert_eq!(catalogue.kind(VarId::DiscountRate), VariableKind::Percentage);
        assert_eq!(
            catalogue.kind(VarId::InstallmentCount),
            VariableKind::Quantity
        );
        assert_eq!(catalogue.kind(VarId::ReceiptMessage), VariableKind::Label);
        assert_eq!(
            catalogue.kind(VarId::SettlementStatus),
            VariableKind::Label
        );
    }

    #[test]
    fn test_version_is_stable() {
        assert_eq!(Catalogue::v1().version(), "v1");
    }
}
