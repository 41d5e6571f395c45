/*!
 * Prompt templates for the generative-model analysis path.
 *
 * One prompt per category plus a shared system prompt. The discussion
 * text is truncated to a configured budget before being appended, with
 * an explicit marker so the model knows the text was cut.
 */

use crate::knowledge::Category;

/// Shared system prompt for every category request.
pub const SYSTEM_PROMPT: &str = "\
You are an expert at analyzing Wikipedia talk page discussions and identifying \
which Wikipedia policies, guidelines, and essays are explicitly mentioned or \
discussed.

You must be precise and only identify items that are actually present in the \
text. Do not infer or assume based on the topic being discussed. Only report \
what is explicitly mentioned.";

const POLICIES_PROMPT: &str = "\
You are analyzing a Wikipedia talk page discussion. Your task is to identify \
Wikipedia POLICIES that are actually DISCUSSED, MENTIONED, DEBATED, or \
REFERENCED in the conversation.

IMPORTANT: Only identify policies that are ACTUALLY mentioned or discussed in \
the text provided. Do NOT assume or infer policies based on topic - only list \
what is explicitly present.

Wikipedia POLICIES (mandatory rules) include core content policies (NPOV, \
Verifiability, No original research), biographical policy (BLP), and \
behavioral policies (Edit warring, Civility, No personal attacks, Consensus).

Common shortcuts: WP:NPOV, WP:V, WP:NOR, WP:BLP, WP:3RR, WP:CIVIL, WP:NPA, \
WP:CON, WP:NOT

Look for explicit mentions of policy names or shortcuts (e.g. \"per \
WP:NPOV\", \"violates BLP\"), direct quotes or paraphrasing of policy \
language, and disputes referencing policies.

For each policy found, give its name and a brief quote or explanation of how \
it is discussed.

If NO policies are actually mentioned in the discussion, respond with \
EXACTLY: \"No policies explicitly mentioned in this discussion.\"";

const GUIDELINES_PROMPT: &str = "\
You are analyzing a Wikipedia talk page discussion. Your task is to identify \
Wikipedia GUIDELINES that are actually DISCUSSED, MENTIONED, or REFERENCED in \
the conversation.

IMPORTANT: Only identify guidelines that are ACTUALLY mentioned or discussed \
in the text provided. Do NOT assume or infer guidelines based on topic - only \
list what is explicitly present.

Wikipedia GUIDELINES (best-practice recommendations) include Notability, \
Reliable sources, Manual of Style, Citing sources, External links, and the \
bold-revert-discuss cycle.

Common shortcuts: WP:N, WP:RS, WP:MOS, WP:CITE, WP:EL, WP:BRD

Look for explicit mentions of guideline names or shortcuts, discussions about \
notability, sourcing or citations, and article structure or style debates.

For each guideline found, give its name and a brief quote or explanation.

If NO guidelines are actually mentioned in the discussion, respond with \
EXACTLY: \"No guidelines explicitly mentioned in this discussion.\"";

const ESSAYS_PROMPT: &str = "\
You are analyzing a Wikipedia talk page discussion. Your task is to identify \
Wikipedia ESSAYS that are mentioned or referenced.

IMPORTANT: Only identify essays that are ACTUALLY mentioned in the text \
provided. Essays are opinion/advice pages written by editors - they are NOT \
official policy or guidelines.

Look for explicit mentions of essay shortcuts or titles, links to essay \
pages, and phrases like \"as the essay says\".

For each essay found, give its name and a brief quote or context.

If NO essays are actually mentioned in the discussion, respond with EXACTLY: \
\"No essays explicitly mentioned in this discussion.\"";

/// Marker appended when the discussion text had to be cut.
const TRUNCATION_MARKER: &str = "\n\n[Text truncated due to length]";

/// Build the full user prompt for one category.
pub fn analysis_prompt(category: Category, discussion_text: &str, max_chars: usize) -> String {
    let instructions = match category {
        Category::Policy => POLICIES_PROMPT,
        Category::Guideline => GUIDELINES_PROMPT,
        Category::Essay => ESSAYS_PROMPT,
    };

    let mut text: String = discussion_text.chars().take(max_chars).collect();
    if discussion_text.chars().count() > max_chars {
        text.push_str(TRUNCATION_MARKER);
    }

    format!(
        "{}\n\n=== DISCUSSION TEXT TO ANALYZE ===\n{}",
        instructions, text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysisPrompt_shortText_shouldNotBeTruncated() {
        let prompt = analysis_prompt(Category::Policy, "Short discussion.", 100);

        assert!(prompt.contains("Short discussion."));
        assert!(!prompt.contains("[Text truncated due to length]"));
    }

    #[test]
    fn test_analysisPrompt_longText_shouldCarryTruncationMarker() {
        let long = "word ".repeat(100);
        let prompt = analysis_prompt(Category::Essay, &long, 50);

        assert!(prompt.contains("[Text truncated due to length]"));
    }

    #[test]
    fn test_analysisPrompt_categories_shouldUseDistinctInstructions() {
        let text = "Discussion.";
        let policies = analysis_prompt(Category::Policy, text, 100);
        let guidelines = analysis_prompt(Category::Guideline, text, 100);
        let essays = analysis_prompt(Category::Essay, text, 100);

        assert!(policies.contains("POLICIES"));
        assert!(guidelines.contains("GUIDELINES"));
        assert!(essays.contains("ESSAYS"));
    }
}
