//! Initial moderation state of a new comment.
//!
//! The decision is evaluated in strict priority order:
//!
//! 1. a moderator's submission is approved
//! 2. moderated domains, or anonymous authors under "moderate all anonymous",
//!    leave the comment unapproved
//! 3. with the auto spam filter on, the spam oracle decides between flagged
//!    and approved
//! 4. everything else is approved

use super::CommentState;
use crate::domain::site::ModerationPolicy;

/// Outcome of screening before the spam oracle is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screening {
    Decided(CommentState),
    NeedsSpamCheck,
}

impl Screening {
    /// Screens a submission against the domain policy.
    pub fn screen(policy: &ModerationPolicy, is_moderator: bool, is_anonymous: bool) -> Self {
        if is_moderator {
            return Screening::Decided(CommentState::Approved);
        }
        if policy.require_moderation || (is_anonymous && policy.moderate_all_anonymous) {
            return Screening::Decided(CommentState::Unapproved);
        }
        if policy.auto_spam_filter {
            return Screening::NeedsSpamCheck;
        }
        Screening::Decided(CommentState::Approved)
    }

    /// Completes the decision with the spam verdict.
    pub fn resolve(self, is_spam: bool) -> CommentState {
        match self {
            Screening::Decided(state) => state,
            Screening::NeedsSpamCheck if is_spam => CommentState::Flagged,
            Screening::NeedsSpamCheck => CommentState::Approved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn policy(rm: bool, maa: bool, spam: bool) -> ModerationPolicy {
        ModerationPolicy {
            require_identification: false,
            require_moderation: rm,
            moderate_all_anonymous: maa,
            auto_spam_filter: spam,
        }
    }

    #[test]
    fn anonymous_under_moderate_all_anonymous_is_unapproved() {
        let s = Screening::screen(&policy(false, true, true), false, true);
        assert_eq!(s, Screening::Decided(CommentState::Unapproved));
    }

    #[test]
    fn spam_filter_flags_spam() {
        let s = Screening::screen(&policy(false, false, true), false, false);
        assert_eq!(s, Screening::NeedsSpamCheck);
        assert_eq!(s.resolve(true), CommentState::Flagged);
        assert_eq!(s.resolve(false), CommentState::Approved);
    }

    #[test]
    fn no_filters_approves() {
        let s = Screening::screen(&policy(false, false, false), false, true);
        assert_eq!(s.resolve(true), CommentState::Approved);
    }

    proptest! {
        #[test]
        fn moderator_submission_is_always_approved(
            rm in any::<bool>(),
            maa in any::<bool>(),
            spam in any::<bool>(),
            anon in any::<bool>(),
            verdict in any::<bool>(),
        ) {
            let state = Screening::screen(&policy(rm, maa, spam), true, anon).resolve(verdict);
            prop_assert_eq!(state, CommentState::Approved);
        }

        #[test]
        fn required_moderation_always_leaves_non_moderators_unapproved(
            maa in any::<bool>(),
            spam in any::<bool>(),
            anon in any::<bool>(),
            verdict in any::<bool>(),
        ) {
            let state = Screening::screen(&policy(true, maa, spam), false, anon).resolve(verdict);
            prop_assert_eq!(state, CommentState::Unapproved);
        }
    }
}
