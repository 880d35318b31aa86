use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImage,
        ChatCompletionRequestUserMessage, ChatCompletionRequestUserMessageContent,
        CreateChatCompletionRequest, ImageUrl,
    },
};
use async_trait::async_trait;
use base64::display::Base64Display;
use config::file::ClassifierConfig;
use error_stack::{Result, ResultExt};
use model::{CollectionVerification, ImageData, SubmissionClassification};
use simple_backend_utils::ContextExt;
use tracing::debug;

use crate::{ClassifierError, WasteClassifier, decode_image, parse, prompt};

/// Classifier which uses an OpenAI compatible chat completions API.
#[derive(Debug, Clone)]
pub struct OpenAiClassifier {
    config: ClassifierConfig,
    client: Client<OpenAIConfig>,
}

impl OpenAiClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        let client = Client::with_config(
            OpenAIConfig::new()
                .with_api_base(config.openai_api_url.to_string())
                .with_api_key(config.api_key.clone()),
        );
        Self { config, client }
    }

    /// Returns raw model output.
    async fn complete(
        &self,
        system_text: String,
        image: &ImageData,
    ) -> Result<String, ClassifierError> {
        let image_data = decode_image(image)?;

        let image_part = ChatCompletionRequestMessageContentPartImage {
            image_url: ImageUrl {
                url: format!(
                    "data:{};base64,{}",
                    image.mime_type,
                    Base64Display::new(&image_data, &base64::engine::general_purpose::STANDARD),
                ),
                detail: None,
            },
        };

        let message = ChatCompletionRequestUserMessage {
            content: ChatCompletionRequestUserMessageContent::Array(vec![image_part.into()]),
            name: None,
        };

        // Some OpenAI compatible servers do not support
        // max_completion_tokens yet.
        #[allow(deprecated)]
        let response = self
            .client
            .chat()
            .create(CreateChatCompletionRequest {
                messages: vec![
                    ChatCompletionRequestMessage::System(system_text.into()),
                    ChatCompletionRequestMessage::User(message),
                ],
                model: self.config.model.clone(),
                temperature: Some(0.0),
                seed: Some(0),
                max_completion_tokens: self.config.max_tokens,
                max_tokens: self.config.max_tokens,
                ..Default::default()
            })
            .await
            .change_context(ClassifierError::Request)?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        match content {
            Some(content) => {
                debug!("Classifier output: '{}'", content);
                Ok(content)
            }
            None => Err(ClassifierError::EmptyResponse.report()),
        }
    }
}

#[async_trait]
impl WasteClassifier for OpenAiClassifier {
    async fn classify_submission(
        &self,
        image: &ImageData,
    ) -> Result<SubmissionClassification, ClassifierError> {
        let output = self
            .complete(prompt::SUBMISSION_PROMPT.to_string(), image)
            .await?;
        parse::parse_submission(&output)
    }

    async fn verify_collection(
        &self,
        image: &ImageData,
        expected_waste_type: &str,
        expected_amount: &str,
    ) -> Result<CollectionVerification, ClassifierError> {
        let output = self
            .complete(
                prompt::verification_prompt(expected_waste_type, expected_amount),
                image,
            )
            .await?;
        parse::parse_verification(&output)
    }
}
