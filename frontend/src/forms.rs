//! Form state and the checks run before anything is sent.

use crate::error::ApiError;
use crate::format::{is_valid_email, is_valid_phone};
use crate::models::{
    Id, NewTransaction, RegisterForm, Transaction, TransactionMode, TransactionUpdate, User,
    UserPatch, UserUpdate,
};

pub fn validate_registration(form: &RegisterForm) -> Result<(), ApiError> {
    let required = [
        &form.name,
        &form.email,
        &form.phone,
        &form.password,
        &form.confirm_password,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(ApiError::validation("All fields are required"));
    }
    if !is_valid_email(form.email.trim()) {
        return Err(ApiError::validation("Enter a valid email"));
    }
    if !is_valid_phone(form.phone.trim()) {
        return Err(ApiError::validation("Enter a valid 10 digit phone number"));
    }
    if form.password != form.confirm_password {
        return Err(ApiError::validation("Passwords do not match"));
    }
    Ok(())
}

/// Add/edit transaction inputs, kept as typed text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionDraft {
    pub mode: TransactionMode,
    pub amount: String,
    pub category_id: String,
    pub description: String,
    pub time: String,
}

impl TransactionDraft {
    pub fn new(time: String) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            mode: transaction.mode,
            amount: transaction.amount.to_string(),
            category_id: transaction
                .category_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            description: transaction.description.clone().unwrap_or_default(),
            time: transaction.time.clone().unwrap_or_default(),
        }
    }

    fn amount(&self) -> Result<f64, ApiError> {
        match self.amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
            _ => Err(ApiError::validation("Enter a valid amount")),
        }
    }

    fn time(&self) -> Result<String, ApiError> {
        let time = self.time.trim();
        if time.is_empty() {
            Err(ApiError::validation("Time is required"))
        } else {
            Ok(time.to_string())
        }
    }

    pub fn to_new(&self, user_id: Id) -> Result<NewTransaction, ApiError> {
        let amount = self.amount()?;
        let category_id = self
            .category_id
            .trim()
            .parse::<Id>()
            .map_err(|_| ApiError::validation("Select a category"))?;
        Ok(NewTransaction {
            user_id,
            category_id,
            mode: self.mode,
            amount,
            description: self.description.trim().to_string(),
            time: self.time()?,
        })
    }

    /// Category is not part of an update.
    pub fn to_update(&self) -> Result<TransactionUpdate, ApiError> {
        Ok(TransactionUpdate {
            mode: self.mode,
            amount: self.amount()?,
            description: self.description.trim().to_string(),
            time: self.time()?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl ProfileDraft {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
            password: String::new(),
        }
    }

    /// The request body, plus the fields to merge into the session once the
    /// server accepts it. An empty password is left out.
    pub fn to_update(&self, id: Id) -> Result<(UserUpdate, UserPatch), ApiError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let phone = self.phone.trim();
        if name.is_empty() {
            return Err(ApiError::validation("Name is required"));
        }
        if !is_valid_email(email) {
            return Err(ApiError::validation("Enter a valid email"));
        }
        if !phone.is_empty() && !is_valid_phone(phone) {
            return Err(ApiError::validation("Enter a valid 10 digit phone number"));
        }

        let update = UserUpdate {
            id,
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            phone: Some(phone.to_string()),
            password: Some(self.password.clone()).filter(|p| !p.is_empty()),
            image: None,
        };
        let patch = UserPatch {
            name: update.name.clone(),
            email: update.email.clone(),
            phone: update.phone.clone(),
            image: None,
        };
        Ok((update, patch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registration() -> RegisterForm {
        RegisterForm {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: "9876543210".into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
            image: String::new(),
        }
    }

    fn message(result: Result<impl std::fmt::Debug, ApiError>) -> String {
        result.unwrap_err().user_message("")
    }

    #[test]
    fn registration_checks_run_in_order() {
        assert!(validate_registration(&registration()).is_ok());

        let mut form = registration();
        form.name = " ".into();
        assert_eq!(message(validate_registration(&form)), "All fields are required");

        let mut form = registration();
        form.email = "asha".into();
        assert_eq!(message(validate_registration(&form)), "Enter a valid email");

        let mut form = registration();
        form.phone = "12345".into();
        assert_eq!(
            message(validate_registration(&form)),
            "Enter a valid 10 digit phone number"
        );

        let mut form = registration();
        form.confirm_password = "other".into();
        assert_eq!(message(validate_registration(&form)), "Passwords do not match");
    }

    #[test]
    fn avatar_is_optional_when_registering() {
        let form = RegisterForm {
            image: String::new(),
            ..registration()
        };
        assert!(validate_registration(&form).is_ok());
    }

    #[test]
    fn new_transaction_needs_amount_category_and_time() {
        let mut draft = TransactionDraft::new("10:30 AM".into());
        draft.amount = "250".into();
        draft.category_id = "3".into();
        draft.description = " lunch ".into();

        assert_eq!(
            draft.to_new(7).unwrap(),
            NewTransaction {
                user_id: 7,
                category_id: 3,
                mode: TransactionMode::Debit,
                amount: 250.0,
                description: "lunch".into(),
                time: "10:30 AM".into(),
            }
        );

        let mut bad = draft.clone();
        bad.amount = "0".into();
        assert_eq!(message(bad.to_new(7)), "Enter a valid amount");

        let mut bad = draft.clone();
        bad.amount = "abc".into();
        assert_eq!(message(bad.to_new(7)), "Enter a valid amount");

        let mut bad = draft.clone();
        bad.category_id = String::new();
        assert_eq!(message(bad.to_new(7)), "Select a category");

        let mut bad = draft;
        bad.time = " ".into();
        assert_eq!(message(bad.to_new(7)), "Time is required");
    }

    #[test]
    fn edit_ignores_category() {
        let transaction = Transaction {
            id: 4,
            category_id: Some(9),
            mode: TransactionMode::Credit,
            amount: 1200.0,
            description: Some("salary".into()),
            time: Some("09:00 AM".into()),
            ..Transaction::default()
        };
        let mut draft = TransactionDraft::from_transaction(&transaction);
        assert_eq!(draft.category_id, "9");
        draft.category_id = String::new();

        assert_eq!(
            draft.to_update().unwrap(),
            TransactionUpdate {
                mode: TransactionMode::Credit,
                amount: 1200.0,
                description: "salary".into(),
                time: "09:00 AM".into(),
            }
        );
    }

    #[test]
    fn profile_update_omits_empty_password() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 7, "name": "A", "email": "a@b.com", "phone": 9876543210u64
        }))
        .unwrap();
        let mut draft = ProfileDraft::from_user(&user);
        draft.name = "Asha".into();

        let (update, patch) = draft.to_update(user.id).unwrap();
        assert_eq!(update.password, None);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"id": 7, "name": "Asha", "email": "a@b.com", "phone": "9876543210"})
        );
        assert_eq!(patch.name.as_deref(), Some("Asha"));
        assert_eq!(patch.image, None);

        draft.password = "new-secret".into();
        let (update, _) = draft.to_update(user.id).unwrap();
        assert_eq!(update.password.as_deref(), Some("new-secret"));

        draft.email = "nope".into();
        assert_eq!(message(draft.to_update(user.id)), "Enter a valid email");
    }
}
