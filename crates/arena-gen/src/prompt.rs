//! Prompt construction for initial generation and in-place repair.

use arena_core::ExampleSpec;

/// The prompt driving a fresh implementation of one spec.
///
/// Every agent writes to the same fixed relative path inside its own
/// sandbox, which is what lets the orchestrator find the artifact
/// without parsing any tool output.
pub fn initial(spec: &ExampleSpec) -> String {
    format!(
        r#"You are implementing a single self-contained HTML file.

## App: {title}

## Specification:
{prompt}

## Requirements:
- Create a single index.html file with ALL CSS and JavaScript inlined
- The file must be fully self-contained
- You may use CDN links for libraries (e.g., Tailwind CSS, React, Three.js) if needed
- Place the file at: output/index.html
- Do NOT create any other files

## Important:
This is a non-interactive session, so you will not be able to ask clarifying questions. Use your best judgment.

This implementation will be displayed in a competition alongside other AI models' implementations of the same specification. Your implementation should be the highest quality, most polished, and most impressive version possible. Put your best foot forward.

Begin implementation now."#,
        title = spec.title,
        prompt = spec.prompt,
    )
}

/// The follow-up prompt after validation found runtime defects.
///
/// Lists the exact error strings and demands a patch of the existing
/// file, not a rewrite, so working parts of the first attempt survive.
pub fn fix(spec: &ExampleSpec, errors: &[String]) -> String {
    let mut listing = String::new();
    for (i, error) in errors.iter().enumerate() {
        listing.push_str(&format!("{}. {}\n", i + 1, error));
    }

    format!(
        r#"You are fixing a defective implementation of "{title}".

The file output/index.html already exists in this directory. Loading it in a browser produced the following runtime errors:

{listing}
## Instructions:
- Patch the EXISTING output/index.html in place to eliminate these errors
- Do NOT rewrite the implementation from scratch
- Do NOT create any other files
- Keep the existing look and behavior wherever it is not broken

This is a non-interactive session, so you will not be able to ask clarifying questions. Use your best judgment.

Begin fixing now."#,
        title = spec.title,
        listing = listing,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ExampleSpec {
        ExampleSpec {
            id: "pomodoro-timer".to_string(),
            title: "Pomodoro Timer".to_string(),
            prompt: "Build a pomodoro timer with work/break cycles.".to_string(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn initial_prompt_carries_title_spec_and_output_path() {
        let prompt = initial(&spec());
        assert!(prompt.contains("## App: Pomodoro Timer"));
        assert!(prompt.contains("Build a pomodoro timer with work/break cycles."));
        assert!(prompt.contains("output/index.html"));
        assert!(prompt.contains("non-interactive session"));
    }

    #[test]
    fn fix_prompt_lists_errors_verbatim_and_in_order() {
        let errors = vec![
            "Uncaught ReferenceError: foo is not defined".to_string(),
            "Failed to load resource: net::ERR_FILE_NOT_FOUND".to_string(),
        ];
        let prompt = fix(&spec(), &errors);
        assert!(prompt.contains("\"Pomodoro Timer\""));
        assert!(prompt.contains("1. Uncaught ReferenceError: foo is not defined"));
        assert!(prompt.contains("2. Failed to load resource: net::ERR_FILE_NOT_FOUND"));
        assert!(prompt.contains("Patch the EXISTING output/index.html"));
        assert!(prompt.contains("Do NOT rewrite"));
    }
}
