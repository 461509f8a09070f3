// Résumé flow: format the entered profile as a Markdown résumé, draft a cover
// letter from it, and look up the applicant's web reputation.

pub mod handlers;
pub mod profile;
pub mod prompts;
