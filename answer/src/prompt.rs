//! Prompt assembly.
//!
//! The persona, tone, and contact details are fixed: the model is only
//! ever asked to answer from the supplied context, never to improvise
//! company facts.

/// How many retrieved passages are interpolated into the prompt.
const MAX_CONTEXT_PASSAGES: usize = 3;

/// Build the generation prompt from retrieved passages and the question.
///
/// At most [`MAX_CONTEXT_PASSAGES`] passages are used, joined by blank
/// lines, in the order the retriever ranked them.
pub fn build_prompt(passages: &[String], question: &str) -> String {
    let context = passages
        .iter()
        .take(MAX_CONTEXT_PASSAGES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Yardstick AI assistant: helpful, professional, concise.\n\
         \n\
         Answer from context (2-3 sentences, benefit-focused). If missing info: \
         acknowledge + offer free strategy call. Pricing: \"Depends on needs - \
         what's your use case?\" Technical: redirect to team. Contact: \
         contact@yardstick.live | +917891053001\n\
         \n\
         Never fabricate. Stay positive.\n\
         {context}\n\
         \n\
         User QUESTION: {question}\n\
         \n\
         YOUR ANSWER:"
    )
}
