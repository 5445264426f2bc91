//! Presentation labels for the small closed-set categorical columns.
//!
//! At the table level categorical codes are the identity transform: readers
//! keep the raw code exactly as published. The lookups here exist only for
//! chart legends and CLI summaries, so a code with no label is not an error.

/// Categorical column families carrying short raw codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeTable {
    Gender,
    AccountStatus,
    TradedLast12Months,
    OperationType,
    Channel,
}

impl CodeTable {
    fn entries(self) -> &'static [(&'static str, &'static str)] {
        match self {
            CodeTable::Gender => &[("M", "Male"), ("F", "Female")],
            CodeTable::AccountStatus => &[
                ("Ativa", "Active"),
                ("Inativa", "Inactive"),
                ("A", "Active"),
                ("I", "Inactive"),
            ],
            CodeTable::TradedLast12Months => &[("S", "Yes"), ("N", "No")],
            CodeTable::OperationType => &[
                ("C", "Purchase"),
                ("V", "Sale"),
                ("Compra", "Purchase"),
                ("Venda", "Sale"),
            ],
            CodeTable::Channel => &[
                ("Site", "Website"),
                ("APP", "Mobile app"),
                ("Aplicativo", "Mobile app"),
                ("Agendamento", "Scheduled order"),
                ("Home Broker", "Home broker"),
            ],
        }
    }

    /// Human label for a raw code, if one is known. Case-insensitive.
    pub fn label(self, code: &str) -> Option<&'static str> {
        let code = code.trim();
        self.entries()
            .iter()
            .find(|(raw, _)| raw.eq_ignore_ascii_case(code))
            .map(|(_, label)| *label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_have_labels() {
        assert_eq!(CodeTable::Gender.label("M"), Some("Male"));
        assert_eq!(CodeTable::OperationType.label("c"), Some("Purchase"));
        assert_eq!(CodeTable::TradedLast12Months.label(" S "), Some("Yes"));
        assert_eq!(CodeTable::AccountStatus.label("Ativa"), Some("Active"));
    }

    #[test]
    fn unknown_codes_pass_through_unlabeled() {
        assert_eq!(CodeTable::Channel.label("Telefone"), None);
        assert_eq!(CodeTable::Gender.label(""), None);
    }
}
