/// Substitutes the response language and the patch into a review template.
///
/// The language goes in first so a patch that happens to contain the text
/// `{language}` reaches the model unchanged.
pub fn build_review_prompt(template: &str, changes: &str, language: &str) -> String {
    template
        .replace("{language}", language)
        .replace("{changes}", changes)
}
