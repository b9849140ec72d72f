use crate::models::{Transaction, TransactionMode};

/// Totals over a list of transactions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    pub income: f64,
    pub expense: f64,
    pub count: usize,
}

impl Summary {
    pub fn of(transactions: &[Transaction]) -> Self {
        transactions
            .iter()
            .fold(Summary::default(), |mut summary, transaction| {
                match transaction.mode {
                    TransactionMode::Credit => summary.income += transaction.amount,
                    TransactionMode::Debit => summary.expense += transaction.amount,
                }
                summary.count += 1;
                summary
            })
    }

    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}
