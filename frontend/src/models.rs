use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub type Id = i64;

/// Stored in `User::image` when the account has no avatar.
pub const NO_IMAGE: &str = "NA";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_number"
    )]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Server fields the client does not interpret, kept so the persisted
    /// snapshot round-trips them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "User",
        }
    }

    /// Uploaded filename, unless missing or the `"NA"` sentinel.
    pub fn image_file(&self) -> Option<&str> {
        self.image
            .as_deref()
            .filter(|image| !image.is_empty() && *image != NO_IMAGE)
    }

    pub fn avatar_url(&self, image_base_url: &str) -> String {
        match self.image_file() {
            Some(file) => format!("{}{}", image_base_url, file),
            None => generated_avatar_url(Some(self.display_name())),
        }
    }

    /// Shallow merge: only fields present in `patch` are replaced.
    pub fn merge(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = Some(name);
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
    }
}

pub fn generated_avatar_url(name: Option<&str>) -> String {
    let name = name.filter(|n| !n.trim().is_empty()).unwrap_or("User");
    format!(
        "https://ui-avatars.com/api/?name={}&background=10a37f&color=fff&size=200",
        url::form_urlencoded::byte_serialize(name.as_bytes()).collect::<String>()
    )
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image: Option<String>,
}

impl UserPatch {
    pub fn image(filename: impl Into<String>) -> Self {
        Self {
            image: Some(filename.into()),
            ..Self::default()
        }
    }
}

/// Body of `PUT /user`. Absent fields are left untouched server-side.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UserUpdate {
    pub id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Id,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionMode {
    Credit,
    #[default]
    Debit,
}

impl TransactionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionMode::Credit => "CREDIT",
            TransactionMode::Debit => "DEBIT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CREDIT" => Some(TransactionMode::Credit),
            "DEBIT" => Some(TransactionMode::Debit),
            _ => None,
        }
    }

    pub fn sign(self) -> &'static str {
        match self {
            TransactionMode::Credit => "+",
            TransactionMode::Debit => "-",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            TransactionMode::Credit => "credit",
            TransactionMode::Debit => "debit",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Id,
    #[serde(default)]
    pub user_id: Option<Id>,
    #[serde(default)]
    pub category_id: Option<Id>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub mode: TransactionMode,
    #[serde(default, deserialize_with = "amount")]
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

impl Transaction {
    pub fn category_label(&self) -> &str {
        match self.category_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "Uncategorized",
        }
    }
}

/// Body of `POST /transaction`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub user_id: Id,
    pub category_id: Id,
    pub mode: TransactionMode,
    pub amount: f64,
    pub description: String,
    pub time: String,
}

/// Body of `PUT /transaction?id=`. Category is fixed once created.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub mode: TransactionMode,
    pub amount: f64,
    pub description: String,
    pub time: String,
}

/// Filters for `GET /transaction`. Every key is always sent, empty when unset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionQuery {
    pub user_id: Id,
    pub mode: Option<TransactionMode>,
    pub start_date: String,
    pub end_date: String,
    pub today: bool,
}

impl TransactionQuery {
    pub fn for_user(user_id: Id) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    pub fn today(user_id: Id) -> Self {
        Self {
            user_id,
            today: true,
            ..Self::default()
        }
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("userId".to_string(), self.user_id.to_string()),
            (
                "mode".to_string(),
                self.mode.map(|m| m.as_str().to_string()).unwrap_or_default(),
            ),
            ("startDate".to_string(), self.start_date.clone()),
            ("endDate".to_string(), self.end_date.clone()),
            (
                "today".to_string(),
                if self.today { "true".to_string() } else { String::new() },
            ),
        ]
    }
}

/// Body of `POST /register`, sent as entered.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub image: String,
}

/// `{success, message, data}` wrapper used by list endpoints.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

pub type Ack = Envelope<Value>;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OtpReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UploadedFile {
    pub filename: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UploadReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub file: Option<UploadedFile>,
}

/// Implemented by every reply carrying the backend's `success` flag.
pub trait Reply {
    fn success(&self) -> bool;
    fn message(&self) -> Option<&str>;
}

impl<T> Reply for Envelope<T> {
    fn success(&self) -> bool {
        self.success
    }
    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Reply for LoginReply {
    fn success(&self) -> bool {
        self.success
    }
    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Reply for OtpReply {
    fn success(&self) -> bool {
        self.success
    }
    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Reply for UploadReply {
    fn success(&self) -> bool {
        self.success
    }
    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn minimal_user_round_trips_without_padding() {
        let user: User = serde_json::from_value(json!({"id": 7, "name": "A"})).unwrap();
        assert_eq!(serde_json::to_value(&user).unwrap(), json!({"id": 7, "name": "A"}));
    }

    #[test]
    fn unknown_user_fields_survive() {
        let raw = json!({"id": 1, "name": "Asha", "createdAt": "2024-01-01", "phone": 9876543210u64});
        let user: User = serde_json::from_value(raw).unwrap();
        assert_eq!(user.phone.as_deref(), Some("9876543210"));
        assert_eq!(user.extra.get("createdAt"), Some(&json!("2024-01-01")));
        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["createdAt"], json!("2024-01-01"));
    }

    #[test]
    fn merge_replaces_only_given_fields() {
        let mut user = User {
            id: 3,
            name: Some("Old".into()),
            email: Some("old@x.io".into()),
            phone: Some("1112223334".into()),
            image: Some(NO_IMAGE.into()),
            extra: Map::new(),
        };
        user.merge(UserPatch {
            name: Some("New".into()),
            ..UserPatch::default()
        });
        assert_eq!(user.name.as_deref(), Some("New"));
        assert_eq!(user.email.as_deref(), Some("old@x.io"));
        assert_eq!(user.phone.as_deref(), Some("1112223334"));
        assert_eq!(user.image.as_deref(), Some(NO_IMAGE));
    }

    #[test]
    fn na_sentinel_means_no_image() {
        let mut user = User {
            id: 1,
            image: Some(NO_IMAGE.into()),
            ..User::default()
        };
        assert_eq!(user.image_file(), None);
        user.image = Some("me.png".into());
        assert_eq!(user.image_file(), Some("me.png"));
        assert_eq!(user.avatar_url("http://api/images/"), "http://api/images/me.png");
    }

    #[test]
    fn generated_avatar_encodes_name() {
        assert_eq!(
            generated_avatar_url(Some("Asha Rao")),
            "https://ui-avatars.com/api/?name=Asha+Rao&background=10a37f&color=fff&size=200"
        );
        assert!(generated_avatar_url(None).contains("name=User&"));
    }

    #[test]
    fn transaction_reads_loose_amounts() {
        let tx: Transaction = serde_json::from_value(json!({
            "id": 5,
            "mode": "CREDIT",
            "amount": "250",
            "categoryName": "Food",
            "time": "10:30 AM"
        }))
        .unwrap();
        assert_eq!(tx.mode, TransactionMode::Credit);
        assert_eq!(tx.amount, 250.0);
        assert_eq!(tx.category_label(), "Food");
    }

    #[test]
    fn query_sends_every_key() {
        let query = TransactionQuery {
            mode: Some(TransactionMode::Debit),
            start_date: "2024-05-01".into(),
            ..TransactionQuery::for_user(9)
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("userId".to_string(), "9".to_string()),
                ("mode".to_string(), "DEBIT".to_string()),
                ("startDate".to_string(), "2024-05-01".to_string()),
                ("endDate".to_string(), String::new()),
                ("today".to_string(), String::new()),
            ]
        );
        assert_eq!(TransactionQuery::today(9).to_pairs()[4].1, "true");
    }

    #[test]
    fn register_form_is_camel_case() {
        let form = RegisterForm {
            confirm_password: "pw".into(),
            ..RegisterForm::default()
        };
        let body = serde_json::to_value(&form).unwrap();
        assert_eq!(body["confirmPassword"], json!("pw"));
    }
}
