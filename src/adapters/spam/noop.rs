//! Spam checker used when no oracle is configured.

use async_trait::async_trait;

use crate::ports::{SpamChecker, SpamContext};

/// Treats every comment as legitimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpamChecker;

#[async_trait]
impl SpamChecker for NoSpamChecker {
    async fn is_spam(&self, _context: &SpamContext) -> bool {
        false
    }
}
