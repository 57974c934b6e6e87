use rust_decimal::Decimal;

pub type AccountId = String;

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub balance: Decimal,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, opening_balance: Decimal) -> Self {
        Self {
            id: id.into(),
            balance: opening_balance,
        }
    }

    pub fn can_cover(&self, amount: Decimal) -> bool {
        self.balance >= amount
    }
}
