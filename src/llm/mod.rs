mod llm_client;
mod message;
pub mod providers;

pub use llm_client::*;
pub use message::*;

#[cfg(test)]
pub(crate) mod testing {
    use super::providers::LlmProvider;
    use super::ChatMessage;
    use crate::errors::Error;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Provider that returns pre-scripted replies in order.
    #[derive(Debug)]
    pub struct ScriptedProvider {
        replies: Mutex<VecDeque<String>>,
    }

    impl ScriptedProvider {
        pub fn new<I, S>(replies: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            }
        }
    }

    #[async_trait::async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn call_llm_api(&self, _messages: Vec<ChatMessage>) -> Result<String, Error> {
            self.replies
                .lock()
                .expect("scripted replies poisoned")
                .pop_front()
                .ok_or_else(|| Error::Llm("scripted provider exhausted".into()))
        }
    }
}
