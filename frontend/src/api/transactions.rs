use super::{ApiClient, Method, Transport};
use crate::error::ApiError;
use crate::models::{
    Ack, Envelope, Id, NewTransaction, Transaction, TransactionQuery, TransactionUpdate,
};

impl<T: Transport> ApiClient<T> {
    pub async fn get_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<Vec<Transaction>, ApiError> {
        let request = self
            .request(Method::Get, "/transaction")
            .query_pairs(query.to_pairs());
        let reply: Envelope<Vec<Transaction>> = self.call(request).await?;
        Ok(reply.data.unwrap_or_default())
    }

    /// The only endpoint that checks the bearer token.
    pub async fn get_all_transactions(
        &self,
        id: Option<Id>,
        token: Option<String>,
    ) -> Result<Vec<Transaction>, ApiError> {
        let id = id.map(|id| id.to_string()).unwrap_or_default();
        let request = self
            .request(Method::Get, "/alltransaction")
            .query("id", id)
            .bearer(token);
        let reply: Envelope<Vec<Transaction>> = self.call(request).await?;
        Ok(reply.data.unwrap_or_default())
    }

    pub async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Ack, ApiError> {
        let request = self.request(Method::Post, "/transaction").json(transaction)?;
        self.call(request).await
    }

    pub async fn update_transaction(
        &self,
        id: Id,
        update: &TransactionUpdate,
    ) -> Result<Ack, ApiError> {
        let request = self
            .request(Method::Put, "/transaction")
            .query("id", id)
            .json(update)?;
        self.call(request).await
    }

    pub async fn delete_transaction(&self, id: Id) -> Result<Ack, ApiError> {
        let request = self.request(Method::Delete, "/transaction").query("id", id);
        self.call(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use crate::models::{NewTransaction, TransactionMode, TransactionQuery, TransactionUpdate};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[async_std::test]
    async fn todays_list_sets_today_flag() {
        let api = MockTransport::client();
        api.transport().reply_json(json!({
            "success": true,
            "data": [{"id": 1, "mode": "DEBIT", "amount": 40, "categoryName": "Food"}]
        }));

        let list = api.get_transactions(&TransactionQuery::today(7)).await.unwrap();

        assert_eq!(list.len(), 1);
        let sent = &api.transport().requests()[0];
        assert_eq!(sent.query_value("userId"), Some("7"));
        assert_eq!(sent.query_value("today"), Some("true"));
        assert_eq!(sent.query_value("mode"), Some(""));
    }

    #[async_std::test]
    async fn all_transactions_carry_bearer() {
        let api = MockTransport::client();
        api.transport().reply_json(json!({"success": true, "data": []}));

        api.get_all_transactions(None, Some("T1".into())).await.unwrap();

        let sent = &api.transport().requests()[0];
        assert_eq!(sent.url, "http://api.test/alltransaction");
        assert_eq!(sent.bearer.as_deref(), Some("T1"));
    }

    #[async_std::test]
    async fn create_posts_camel_case_body() {
        let api = MockTransport::client();
        api.transport().reply_json(json!({"success": true, "message": "Added"}));

        let tx = NewTransaction {
            user_id: 7,
            category_id: 2,
            mode: TransactionMode::Credit,
            amount: 500.0,
            description: "bonus".into(),
            time: "10:30 AM".into(),
        };
        api.create_transaction(&tx).await.unwrap();

        assert_eq!(
            api.transport().requests()[0].json_body(),
            Some(&json!({
                "userId": 7,
                "categoryId": 2,
                "mode": "CREDIT",
                "amount": 500.0,
                "description": "bonus",
                "time": "10:30 AM"
            }))
        );
    }

    #[async_std::test]
    async fn update_targets_id_in_query() {
        let api = MockTransport::client();
        api.transport().reply_json(json!({"success": true}));

        let update = TransactionUpdate {
            mode: TransactionMode::Debit,
            amount: 20.0,
            description: String::new(),
            time: "09:00 AM".into(),
        };
        api.update_transaction(11, &update).await.unwrap();

        let sent = &api.transport().requests()[0];
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.query_value("id"), Some("11"));
        assert_eq!(sent.json_body().unwrap()["mode"], json!("DEBIT"));
    }
}
