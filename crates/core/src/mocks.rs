//! Mock implementations of core traits for testing.
//!
//! Scripted providers with call counters, usable from unit and
//! integration tests across the workspace.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::{error::Error, traits::TranslationProvider, Result};

/// What a [`MockProvider`] does when invoked.
pub enum MockBehavior {
    /// Return `"{prefix}:{input}"` for each item.
    Translate(String),
    /// Return the scripted batches in order, one batch per call; fail once
    /// exhausted.
    Scripted(Mutex<Vec<Vec<String>>>),
    /// Return the input unchanged (an ineffective provider).
    Echo,
    /// Fail every call.
    Fail,
    /// Fail every call with a quota error.
    QuotaExhausted,
    /// Never answer; only useful under a timeout.
    Hang,
}

/// Scripted translation provider.
pub struct MockProvider {
    name: &'static str,
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new(name: &'static str, behavior: MockBehavior) -> Self {
        Self {
            name,
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// A provider that prefixes every input.
    pub fn translating(name: &'static str, prefix: &str) -> Self {
        Self::new(name, MockBehavior::Translate(prefix.to_string()))
    }

    /// A provider that replays `batches`, one per call.
    pub fn scripted(name: &'static str, batches: Vec<Vec<String>>) -> Self {
        Self::new(name, MockBehavior::Scripted(Mutex::new(batches)))
    }

    /// A provider that echoes its input unchanged.
    pub fn echoing(name: &'static str) -> Self {
        Self::new(name, MockBehavior::Echo)
    }

    /// A provider that always fails.
    pub fn failing(name: &'static str) -> Self {
        Self::new(name, MockBehavior::Fail)
    }

    /// Get the number of calls made to this mock.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn translate(&self, texts: &[String], _target: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Translate(prefix) => Ok(texts
                .iter()
                .map(|text| format!("{}:{}", prefix, text))
                .collect()),
            MockBehavior::Scripted(batches) => {
                let mut batches = batches.lock().unwrap();
                if batches.is_empty() {
                    Err(Error::provider(format!("{}: script exhausted", self.name)))
                } else {
                    Ok(batches.remove(0))
                }
            }
            MockBehavior::Echo => Ok(texts.to_vec()),
            MockBehavior::Fail => Err(Error::provider(format!("{}: scripted failure", self.name))),
            MockBehavior::QuotaExhausted => Err(Error::ProviderQuota {
                provider: self.name.to_string(),
                status: 456,
            }),
            MockBehavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}
