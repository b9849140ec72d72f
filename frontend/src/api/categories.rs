use serde::Serialize;

use super::{ApiClient, Method, Transport};
use crate::error::ApiError;
use crate::models::{Ack, Category, Envelope, Id};

#[derive(Serialize)]
struct NewCategory<'a> {
    name: &'a str,
}

impl<T: Transport> ApiClient<T> {
    /// All categories when `id` is `None`.
    pub async fn get_categories(&self, id: Option<Id>) -> Result<Vec<Category>, ApiError> {
        let id = id.map(|id| id.to_string()).unwrap_or_default();
        let request = self.request(Method::Get, "/category").query("id", id);
        let reply: Envelope<Vec<Category>> = self.call(request).await?;
        Ok(reply.data.unwrap_or_default())
    }

    pub async fn create_category(&self, name: &str) -> Result<Ack, ApiError> {
        let request = self
            .request(Method::Post, "/category")
            .json(&NewCategory { name })?;
        self.call(request).await
    }

    pub async fn update_category(&self, category: &Category) -> Result<Ack, ApiError> {
        let request = self.request(Method::Put, "/category").json(category)?;
        self.call(request).await
    }

    pub async fn delete_category(&self, id: Id) -> Result<Ack, ApiError> {
        let request = self.request(Method::Delete, "/category").query("id", id);
        self.call(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use crate::models::Category;
    use serde_json::json;

    #[async_std::test]
    async fn listing_sends_empty_id() {
        let api = MockTransport::client();
        api.transport().reply_json(json!({
            "success": true,
            "data": [{"id": 1, "name": "Food"}, {"id": 2, "name": "Transport"}]
        }));

        let categories = api.get_categories(None).await.unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(api.transport().requests()[0].query_value("id"), Some(""));
    }

    #[async_std::test]
    async fn update_puts_id_and_name() {
        let api = MockTransport::client();
        api.transport().reply_json(json!({"success": true}));

        api.update_category(&Category { id: 3, name: "Rent".into() })
            .await
            .unwrap();

        let sent = &api.transport().requests()[0];
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.json_body(), Some(&json!({"id": 3, "name": "Rent"})));
    }

    #[async_std::test]
    async fn delete_passes_id_in_query() {
        let api = MockTransport::client();
        api.transport().reply_json(json!({"success": true}));

        api.delete_category(4).await.unwrap();

        let sent = &api.transport().requests()[0];
        assert_eq!(sent.method, Method::Delete);
        assert_eq!(sent.query_value("id"), Some("4"));
        assert_eq!(sent.body, None);
    }
}
