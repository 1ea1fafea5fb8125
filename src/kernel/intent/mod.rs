pub mod rules;
pub mod sites;
pub mod types;

pub use rules::{IntentRule, RuleContext, RULES};
pub use types::{Action, Greetee, IntentKind, Response, Slots, Utterance};

use crate::kernel::language::Language;
use crate::kernel::time::Clock;

/// Pure interpretation: `(utterance, language, clock) -> response`.
///
/// Rules are tried in [`RULES`] order and the first one that produces a
/// response wins. `None` means no intent matched; callers answer with
/// [`crate::kernel::localizer::fallback_text`].
pub fn interpret(utterance: &str, language: Language, clock: &dyn Clock) -> Option<Response> {
    let utterance = Utterance::new(utterance);
    let ctx = RuleContext { language, clock };

    for rule in RULES {
        if !(rule.matches)(utterance.normalized()) {
            continue;
        }
        let Some(slots) = (rule.extract)(&utterance) else {
            tracing::debug!(
                "Rule {:?} triggered but extracted nothing, falling through",
                rule.kind
            );
            continue;
        };
        if let Some(response) = (rule.respond)(slots, &ctx) {
            tracing::debug!("Matched intent {:?}", rule.kind);
            return Some(response);
        }
    }

    tracing::debug!("No intent matched");
    None
}
