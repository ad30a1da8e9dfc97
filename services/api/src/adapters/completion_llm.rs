//! services/api/src/adapters/completion_llm.rs
//!
//! This module contains the adapter for the chat-completion LLM.
//! It implements the `CompletionService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};
use async_trait::async_trait;
use emotion_diary_core::ports::{CompletionService, PortError, PortResult};
use emotion_diary_core::prompts::{Prompt, PromptMessage, PromptRole};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `CompletionService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiCompletionAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiCompletionAdapter {
    /// Creates a new `OpenAiCompletionAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    fn to_request_message(message: &PromptMessage) -> PortResult<ChatCompletionRequestMessage> {
        let built: ChatCompletionRequestMessage = match message.role {
            PromptRole::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(message.content.clone())
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            PromptRole::User => ChatCompletionRequestUserMessageArgs::default()
                .content(message.content.clone())
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        };
        Ok(built)
    }

    fn build_request(&self, prompt: &Prompt) -> PortResult<CreateChatCompletionRequest> {
        let messages = prompt
            .messages
            .iter()
            .map(Self::to_request_message)
            .collect::<PortResult<Vec<_>>>()?;

        CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

/// Text of the first choice; an empty choice list or a text-less message is an error.
fn first_choice_text(response: CreateChatCompletionResponse) -> PortResult<String> {
    let choice = response.choices.into_iter().next().ok_or_else(|| {
        PortError::Unexpected("Completion LLM returned no choices in its response.".to_string())
    })?;

    choice.message.content.ok_or_else(|| {
        PortError::Unexpected("Completion LLM response contained no text content.".to_string())
    })
}

//=========================================================================================
// `CompletionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CompletionService for OpenAiCompletionAdapter {
    /// Sends the prompt as one chat completion and returns the first choice's text.
    async fn complete(&self, prompt: &Prompt) -> PortResult<String> {
        let request = self.build_request(prompt)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        first_choice_text(response)
    }
}
