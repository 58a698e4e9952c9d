use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// PDF → text. Default: `PdfTextExtractor`.
    pub extractor: Arc<dyn TextExtractor>,
    /// Prompt → reply. Default: the Gemini `LlmClient`.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
}

#[cfg(test)]
pub mod test_support {
    use async_trait::async_trait;

    use super::*;
    use crate::extraction::{ExtractionError, UploadedDocument};
    use crate::llm_client::LlmError;

    /// Reads upload bytes as text; files named `broken*` fail to extract.
    pub struct PlainTextExtractor;

    #[async_trait]
    impl TextExtractor for PlainTextExtractor {
        async fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractionError> {
            if document.filename.starts_with("broken") {
                return Err(ExtractionError::Parse {
                    filename: document.filename.clone(),
                    message: "unexpected end of file".to_string(),
                });
            }
            Ok(String::from_utf8_lossy(&document.bytes).into_owned())
        }
    }

    /// Answers every prompt with the same reply.
    pub struct CannedGenerator(pub String);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    pub fn test_config() -> Config {
        Config {
            gemini_api_key: "test-key".to_string(),
            gemini_model: "gemini-pro".to_string(),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            llm_timeout_secs: 1,
            max_upload_bytes: 1024 * 1024,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }

    /// Accepts connections on a local port and never answers them. Returns a
    /// config whose Gemini base URL points there.
    pub async fn unresponsive_llm_config() -> Config {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        Config {
            gemini_base_url: format!("http://{addr}"),
            ..test_config()
        }
    }

    pub fn test_state(reply: &str) -> AppState {
        AppState {
            extractor: Arc::new(PlainTextExtractor),
            generator: Arc::new(CannedGenerator(reply.to_string())),
            config: test_config(),
        }
    }
}
