//! `{variable}` substitution for the scaffold status file.
//!
//! # Syntax
//!
//! - `{name}` substitutes the value bound to `name` (surrounding spaces in
//!   the name are ignored)
//! - `{{` renders a literal `{`
//! - `}}` renders a literal `}`; a lone `}` is kept as is
//!
//! Undefined variables are an error rather than an empty substitution, so a
//! typo in a template never silently drops a field.

use thiserror::Error;

/// Template rendering failure. Positions are byte offsets into the template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("undefined variable '{name}' at position {position} in template")]
    UndefinedVariable { name: String, position: usize },

    #[error("unmatched '{{' at position {position} in template")]
    UnmatchedBrace { position: usize },

    #[error("empty variable name '{{}}' at position {position} in template")]
    EmptyVariableName { position: usize },
}

/// Render `template`, looking variables up in `variables`.
///
/// Values are inserted verbatim; braces inside a value are not re-parsed.
pub fn render_template(
    template: &str,
    variables: &[(&str, &str)],
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(idx) = rest.find(['{', '}']) {
        out.push_str(&rest[..idx]);
        let position = offset + idx;
        let tail = &rest[idx..];

        let consumed = if tail.starts_with("{{") {
            out.push('{');
            2
        } else if tail.starts_with("}}") {
            out.push('}');
            2
        } else if tail.starts_with('}') {
            out.push('}');
            1
        } else {
            let close = tail
                .find('}')
                .ok_or(TemplateError::UnmatchedBrace { position })?;
            let name = tail[1..close].trim();
            if name.is_empty() {
                return Err(TemplateError::EmptyVariableName { position });
            }
            let value = lookup(variables, name).ok_or_else(|| {
                TemplateError::UndefinedVariable {
                    name: name.to_string(),
                    position,
                }
            })?;
            out.push_str(value);
            close + 1
        };

        rest = &tail[consumed..];
        offset = position + consumed;
    }

    out.push_str(rest);
    Ok(out)
}

fn lookup<'a>(variables: &[(&str, &'a str)], name: &str) -> Option<&'a str> {
    variables
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
}
