//! Fixed conversation text: system prompt, greetings, and the failure reply.

pub const SYSTEM_INSTRUCTIONS_ENV_VAR: &str = "COMMERCE_CHAT_SYSTEM_INSTRUCTIONS";

pub const DEFAULT_SYSTEM_INSTRUCTIONS: &str = "You are an AI Commerce Assistant specialized in helping customers with online shopping, product recommendations, and e-commerce support. Your role is to:

Core responsibilities:
- Provide expert product recommendations based on customer needs and preferences
- Assist with order inquiries, tracking, and returns/exchanges
- Answer questions about product features, specifications, and comparisons
- Help customers navigate the shopping experience and find the best deals
- Provide information about shipping, delivery, and payment options
- Assist with account management and customer service issues

Communication style:
- Be friendly, helpful, and professional
- Ask clarifying questions to better understand customer needs
- Provide detailed but concise product information
- Offer multiple options when possible
- Always prioritize customer satisfaction

Guidelines:
- If you don't have specific product information, acknowledge this and suggest how the customer can find it
- For order-specific issues, direct customers to contact customer service with their order number
- Maintain customer privacy and never ask for sensitive information like passwords or full credit card numbers
- Provide honest assessments of products, including potential drawbacks

Remember: Your goal is to make the customer's shopping experience as smooth and satisfying as possible while helping them find exactly what they need.";

pub const GREETING: &str = "Welcome to your AI Commerce Assistant! I'm here to help you with product recommendations, shopping questions, order support, and finding the best deals. What can I help you shop for today?";

pub const RETURN_GREETING: &str = "Welcome back! I'm here to help you with product recommendations, shopping questions, order support, and finding the best deals. What can I help you shop for today?";

/// Appended as the assistant reply when a completion request fails.
pub const FALLBACK_REPLY: &str = "I apologize, but I'm having trouble processing your request right now. Please try again, and I'll be happy to assist you with your shopping needs!";

pub fn system_instructions_from_env() -> String {
    let from_env = std::env::var(SYSTEM_INSTRUCTIONS_ENV_VAR).ok();
    sanitize_system_instructions(from_env)
}

fn sanitize_system_instructions(raw: Option<String>) -> String {
    let Some(value) = raw else {
        return DEFAULT_SYSTEM_INSTRUCTIONS.to_string();
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        DEFAULT_SYSTEM_INSTRUCTIONS.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, MutexGuard, OnceLock};

    use super::*;

    struct EnvVarGuard {
        previous: Option<String>,
    }

    impl EnvVarGuard {
        fn set(value: Option<&str>) -> Self {
            let previous = std::env::var(SYSTEM_INSTRUCTIONS_ENV_VAR).ok();
            match value {
                Some(value) => std::env::set_var(SYSTEM_INSTRUCTIONS_ENV_VAR, value),
                None => std::env::remove_var(SYSTEM_INSTRUCTIONS_ENV_VAR),
            }

            Self { previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            match &self.previous {
                Some(value) => std::env::set_var(SYSTEM_INSTRUCTIONS_ENV_VAR, value),
                None => std::env::remove_var(SYSTEM_INSTRUCTIONS_ENV_VAR),
            }
        }
    }

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        match mutex.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn system_instructions_env_falls_back_to_default_when_unset_or_blank() {
        let _env_serialization = lock_unpoisoned(env_lock());

        {
            let _guard = EnvVarGuard::set(None);
            assert_eq!(system_instructions_from_env(), DEFAULT_SYSTEM_INSTRUCTIONS);
        }

        {
            let _guard = EnvVarGuard::set(Some("   \n\t"));
            assert_eq!(system_instructions_from_env(), DEFAULT_SYSTEM_INSTRUCTIONS);
        }
    }

    #[test]
    fn system_instructions_env_uses_trimmed_override_when_set() {
        let _env_serialization = lock_unpoisoned(env_lock());
        let _guard = EnvVarGuard::set(Some("  answer like a terse shop clerk  "));

        assert_eq!(
            system_instructions_from_env(),
            "answer like a terse shop clerk"
        );
    }
}
