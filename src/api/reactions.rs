use async_trait::async_trait;

use crate::emoji::ReactionSink;
use crate::error::Result;
use crate::types::ReactionRequest;

use super::client::ApiClient;

impl ApiClient {
    /// Record a reaction against a message
    ///
    /// # Arguments
    /// * `request` - The reaction to record (message id, type, code, name)
    ///
    /// # Returns
    /// A Result indicating success or failure
    pub async fn add_reaction(&self, request: &ReactionRequest) -> Result<()> {
        let endpoint = format!("messages/{}/reactions", request.message_id);

        let form = [
            ("emoji_name", request.emoji_name.clone()),
            ("emoji_code", request.emoji_code.clone()),
            (
                "reaction_type",
                request.reaction_type.as_str().to_string(),
            ),
        ];

        let response = self.post_form(&endpoint, &form).await?;
        self.check_response(response).await
    }
}

#[async_trait]
impl ReactionSink for ApiClient {
    async fn add_reaction(&self, request: &ReactionRequest) -> Result<()> {
        ApiClient::add_reaction(self, request).await
    }
}
