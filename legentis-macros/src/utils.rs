use proc_macro::{TokenStream, TokenTree};

/// Splits a `TokenStream` on top-level commas.
///
/// Each argument comes back as a `Vec<TokenTree>`. Commas inside
/// groups (parentheses, braces, brackets) are already hidden by the
/// tokenizer, so only separator commas are seen here.
pub(crate) fn split_args(input: TokenStream) -> Vec<Vec<TokenTree>> {
    let mut args = Vec::new();
    let mut current = Vec::new();

    for token in input {
        match &token {
            TokenTree::Punct(p) if p.as_char() == ',' => {
                if !current.is_empty() {
                    args.push(current);
                    current = Vec::new();
                }
            }
            _ => current.push(token),
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}

/// Renders a slice of tokens back into Rust source.
///
/// Inserts a space between consecutive identifiers so that `foo bar`
/// does not collapse into `foobar` when re-parsed.
pub(crate) fn tokens_to_string(tokens: &[TokenTree]) -> String {
    let mut out = String::new();
    let mut prev_was_ident = false;

    for t in tokens {
        let s = t.to_string();

        if prev_was_ident && matches!(t, TokenTree::Ident(_)) {
            out.push(' ');
        }

        out.push_str(&s);
        prev_was_ident = matches!(t, TokenTree::Ident(_));
    }

    out
}

/// Finds the first `=>` in a branch and returns the position of its
/// leading `=` token, if any.
fn arrow_position(tokens: &[TokenTree]) -> Option<usize> {
    tokens.windows(2).position(|pair| {
        matches!(
            (&pair[0], &pair[1]),
            (TokenTree::Punct(p1), TokenTree::Punct(p2))
                if p1.as_char() == '=' && p2.as_char() == '>'
        )
    })
}

/// Parses `select`-style branches of the form:
///
/// ```text
/// future_expr => handler_expr
/// ```
///
/// Branches are comma-separated. Each parsed branch yields a
/// `(future, handler)` pair of source strings. Branches missing an
/// arrow or either side of it are dropped.
pub(crate) fn parse_select_branches(input: TokenStream) -> Vec<(String, String)> {
    let mut branches = Vec::new();

    for tokens in split_args(input) {
        let Some(arrow) = arrow_position(&tokens) else {
            continue;
        };

        let future = tokens_to_string(&tokens[..arrow]);
        let handler = tokens_to_string(&tokens[arrow + 2..]);

        if !future.trim().is_empty() && !handler.trim().is_empty() {
            branches.push((future, handler));
        }
    }

    branches
}
