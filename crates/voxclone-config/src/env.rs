use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// An optional fallback is supported via
/// `{{ env.VAR | default("fallback") }}`. A placeholder for an unset
/// variable without a fallback is an error. Comment lines pass through
/// unchanged so commented-out secrets don't have to resolve.
pub fn expand_env(input: &str) -> Result<String, String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("must be valid regex")
    });

    let mut failure: Option<String> = None;
    let mut lines = Vec::with_capacity(input.lines().count());

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_owned());
            continue;
        }

        let expanded = re.replace_all(line, |captures: &Captures<'_>| {
            let var_name = &captures[1];

            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => match captures.get(2) {
                    Some(fallback) => fallback.as_str().to_owned(),
                    None => {
                        failure.get_or_insert_with(|| format!("environment variable not found: `{var_name}`"));
                        String::new()
                    }
                },
            }
        });

        lines.push(expanded.into_owned());
    }

    if let Some(message) = failure {
        return Err(message);
    }

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_input_is_untouched() {
        let input = "address = \"jonorl/voice-clone\"";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn placeholder_expands_to_env_value() {
        temp_env::with_var("VOX_TEST_TOKEN", Some("hf_abc"), || {
            let result = expand_env("auth_token = \"{{ env.VOX_TEST_TOKEN }}\"").unwrap();
            assert_eq!(result, "auth_token = \"hf_abc\"");
        });
    }

    #[test]
    fn missing_variable_without_default_errors() {
        temp_env::with_var_unset("VOX_TEST_MISSING", || {
            let err = expand_env("auth_token = \"{{ env.VOX_TEST_MISSING }}\"").unwrap_err();
            assert!(err.contains("VOX_TEST_MISSING"));
        });
    }

    #[test]
    fn default_applies_only_when_unset() {
        temp_env::with_var_unset("VOX_TEST_OPT", || {
            let result = expand_env("auth_token = \"{{ env.VOX_TEST_OPT | default(\"\") }}\"").unwrap();
            assert_eq!(result, "auth_token = \"\"");
        });

        temp_env::with_var("VOX_TEST_OPT", Some("set"), || {
            let result = expand_env("auth_token = \"{{ env.VOX_TEST_OPT | default(\"\") }}\"").unwrap();
            assert_eq!(result, "auth_token = \"set\"");
        });
    }

    #[test]
    fn comment_lines_are_not_expanded() {
        temp_env::with_var_unset("VOX_TEST_MISSING", || {
            let input = "# auth_token = \"{{ env.VOX_TEST_MISSING }}\"\naddress = \"a/b\"";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }

    #[test]
    fn trailing_newline_is_preserved() {
        assert_eq!(expand_env("a = 1\n").unwrap(), "a = 1\n");
    }
}
