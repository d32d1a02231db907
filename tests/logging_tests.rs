//! Logging Tests
//!
//! Library warnings must reach the CLI's default `env_logger` output.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use env_logger::{Env, Target};

use prism::classifier::{AiTier, ModeClassifier};
use prism::provider::{MockBehavior, MockClassificationProvider};
use prism::Mode;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_failed_ai_call_is_logged_through_env_logger() {
    let capture = Capture::default();
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(capture.clone())))
        .try_init()
        .unwrap();

    let provider = Arc::new(MockClassificationProvider::new(MockBehavior::FailNetwork));
    let classifier = ModeClassifier::new(AiTier::Available {
        provider,
        timeout: Duration::from_secs(1),
    });

    let result = classifier.classify("show me some code").await;
    log::logger().flush();

    assert_eq!(result.mode, Mode::Lab);
    let captured = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    assert!(captured.contains("WARN"), "captured: {:?}", captured);
    assert!(captured.contains("using keyword fallback"), "captured: {:?}", captured);
}
