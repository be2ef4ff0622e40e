//! Single-word translation through the same model seam.

use vocab_harvest_pipeline::model::TextModel;

use crate::errors::Error;

/// Output budget of a translation call.
const TRANSLATE_MAX_TOKENS: u64 = 256;

/// Language used when a code is not in the table.
const DEFAULT_TARGET: &str = "Japanese";

const TARGET_LANGUAGES: [(&str, &str); 16] = [
    ("ja", "Japanese"),
    ("en", "English"),
    ("ko", "Korean"),
    ("zh", "Chinese"),
    ("zh-cn", "Chinese (Simplified)"),
    ("zh-tw", "Chinese (Traditional)"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("th", "Thai"),
    ("vi", "Vietnamese"),
];

/// Display name for a translation target. Unknown codes fall back to
/// Japanese.
#[must_use]
pub fn target_language_name(code: &str) -> &'static str {
    let code = code.trim().to_lowercase();
    TARGET_LANGUAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(DEFAULT_TARGET, |(_, name)| name)
}

fn translation_prompt(text: &str, target_name: &str) -> String {
    format!(
        "Translate the following word to {target_name}. Provide only the translation result without any additional explanation.\nWord: {text}"
    )
}

/// Translates one word or short phrase.
///
/// # Errors
///
/// `Error::InvalidInput` for blank text, `Error::ServiceUnavailable` when the
/// service denies the call, `Error::Model` for any other model failure.
pub async fn translate_word<M: TextModel + ?Sized>(
    model: &M,
    text: &str,
    target_language: &str,
) -> Result<String, Error> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::InvalidInput("nothing to translate".to_string()));
    }

    let target_name = target_language_name(target_language);
    tracing::info!(target = target_name, "translating word");

    let translated = model
        .generate(&translation_prompt(text, target_name), TRANSLATE_MAX_TOKENS)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "translation failed");
            Error::from(e)
        })?;

    Ok(translated.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use vocab_harvest_pipeline::model::ModelError;

    struct Recorder {
        response: Result<String, ModelError>,
        prompts: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn answering(response: Result<&str, &str>) -> Self {
            Self {
                response: response.map(str::to_string).map_err(ModelError::new),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextModel for Recorder {
        async fn generate(&self, prompt: &str, _max: u64) -> Result<String, ModelError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.response.clone()
        }
    }

    #[test]
    fn test_target_language_names() {
        assert_eq!(target_language_name("ja"), "Japanese");
        assert_eq!(target_language_name("ZH-TW"), "Chinese (Traditional)");
        assert_eq!(target_language_name("vi"), "Vietnamese");
        assert_eq!(target_language_name("xx"), "Japanese");
        assert_eq!(target_language_name(""), "Japanese");
    }

    #[tokio::test]
    async fn test_translation_is_trimmed() {
        let model = Recorder::answering(Ok("  同意する\n"));

        let translated = translate_word(&model, "agree", "ja").await.unwrap();

        assert_eq!(translated, "同意する");
        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("to Japanese"));
        assert!(prompts[0].ends_with("Word: agree"));
    }

    #[tokio::test]
    async fn test_denial_is_service_unavailable() {
        let model = Recorder::answering(Err("models/gemini-x is not found"));

        let err = translate_word(&model, "agree", "fr").await.unwrap_err();

        assert!(matches!(err, Error::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_blank_input_skips_the_model() {
        let model = Recorder::answering(Ok("unused"));

        let err = translate_word(&model, "   ", "ja").await.unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(model.prompts.lock().unwrap().is_empty());
    }
}
