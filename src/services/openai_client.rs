use anyhow::{anyhow, Context};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;

use crate::domain::{PromptMessages, Role};

use super::CompletionProvider;

pub struct OpenaiClient {
    client: Client<OpenAIConfig>,
}

impl OpenaiClient {
    pub fn new(api_key: String, api_base: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);
        OpenaiClient {
            client: Client::with_config(config),
        }
    }
}

fn to_request_messages(
    messages: &PromptMessages,
) -> anyhow::Result<Vec<ChatCompletionRequestMessage>> {
    messages
        .messages
        .iter()
        .map(|m| -> anyhow::Result<ChatCompletionRequestMessage> {
            match m.role {
                Role::System => Ok(ChatCompletionRequestSystemMessageArgs::default()
                    .content(m.content.as_str())
                    .build()?
                    .into()),
            }
        })
        .collect()
}

#[async_trait]
impl CompletionProvider for OpenaiClient {
    async fn complete(&self, model: &str, messages: &PromptMessages) -> anyhow::Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(to_request_messages(messages)?)
            .build()?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .context("Chat completion request failed")?;
        log::debug!("Response: {:?}", response);

        response
            .choices
            .first()
            .ok_or_else(|| anyhow!("No choices in Openai response"))?
            .message
            .content
            .clone()
            .ok_or_else(|| anyhow!("No content"))
    }
}
