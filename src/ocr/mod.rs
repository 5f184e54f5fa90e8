//! OCR client interface and the document analysis service.

use std::sync::Arc;

use serde_json::Value;

use crate::prelude::*;

pub mod tesseract;

/// Interface to an OCR engine.
///
/// Given a document path or URL and an orientation-correction flag, the
/// engine returns its raw detection structure: one entry per page, each
/// holding detections that pair region coordinates with a recognized text
/// string and a confidence score. The exact shape belongs to the engine;
/// callers treat it as an opaque JSON tree.
pub trait OcrClient: Send + Sync {
    /// Recognize text in the document at `document_path`. When `cls` is
    /// true, the engine should correct page orientation before recognition.
    fn ocr(&self, document_path: &str, cls: bool) -> Result<Value>;
}

/// Analyzes documents with an OCR engine and returns the raw results as
/// JSON text, with no reshaping of the engine's output.
pub struct OcrService {
    client: Option<Arc<dyn OcrClient>>,
}

impl OcrService {
    /// Create a new service. If `client` is `None`, the default OCR engine
    /// is constructed in its place; a client is never rebuilt once set.
    pub fn new(client: Option<Arc<dyn OcrClient>>) -> Self {
        let client =
            client.unwrap_or_else(|| Arc::new(tesseract::TesseractClient::new()));
        Self {
            client: Some(client),
        }
    }

    /// Analyze a document and return the raw OCR result as a JSON string.
    #[instrument(level = "debug", skip(self))]
    pub fn analyze_document(&self, document_path: &str) -> Result<String> {
        // The constructors always set a client, but guard anyway.
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| anyhow!("OCR client not initialized"))?;
        let result = client.ocr(document_path, true)?;
        Ok(serde_json::to_string(&result)?)
    }
}

impl Default for OcrService {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    /// Substitute client that records its calls and returns a canned result.
    struct FakeClient {
        result: Value,
        calls: Mutex<Vec<(String, bool)>>,
    }

    impl FakeClient {
        fn new(result: Value) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: Mutex::new(vec![]),
            })
        }
    }

    impl OcrClient for FakeClient {
        fn ocr(&self, document_path: &str, cls: bool) -> Result<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((document_path.to_owned(), cls));
            Ok(self.result.clone())
        }
    }

    #[test]
    fn analyze_document_passes_result_through() {
        let expected = json!([[[["1"], ["a", 0.1]], [["2"], ["b", 0.2]]]]);
        let client = FakeClient::new(expected.clone());
        let service = OcrService::new(Some(client.clone()));

        let result = service.analyze_document("path/to/document.png").unwrap();

        // Parsing the JSON text must reproduce the client's result exactly.
        let parsed: Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed, expected);

        // The client is called exactly once, with the exact path and
        // orientation correction requested.
        let calls = client.calls.lock().unwrap();
        assert_eq!(
            calls.as_slice(),
            &[("path/to/document.png".to_owned(), true)]
        );
    }

    #[test]
    fn analyze_document_without_client_fails() {
        let service = OcrService { client: None };
        let err = service.analyze_document("doc.png").unwrap_err();
        assert!(err.to_string().contains("OCR client not initialized"));
    }

    #[test]
    fn new_service_has_a_client() {
        let service = OcrService::new(None);
        assert!(service.client.is_some());
    }
}
